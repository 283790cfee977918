//! Structural predicates over interval sequences.

use crate::partition::{self, Partition};

/// Tells whether two semitone steps directly follow each other, i.e. whether three notes of the scale are
/// chromatically adjacent.
///
/// The intervals are read cyclically, so a semitone at the end of the sequence is a neighbor of a semitone at the
/// start.
///
/// # Examples
///
/// ```
/// # use scalegen::classify;
/// assert!(classify::contains_chromatic_triplet(&[1, 1, 4, 6]));
/// assert!(classify::contains_chromatic_triplet(&[1, 4, 6, 1]));
/// assert!(!classify::contains_chromatic_triplet(&[2, 4, 6]));
/// assert!(!classify::contains_chromatic_triplet(&[1, 5, 1, 5]));
/// ```
pub fn contains_chromatic_triplet(intervals: &[u16]) -> bool {
    let is_semitone_pair = |a: &u16, b: &u16| *a == 1 && *b == 1;

    let inner = intervals
        .windows(2)
        .any(|pair| is_semitone_pair(&pair[0], &pair[1]));

    let wrapping = match (intervals.first(), intervals.last()) {
        (Some(first), Some(last)) if intervals.len() >= 2 => is_semitone_pair(last, first),
        _ => false,
    };

    inner || wrapping
}

/// Lists all interval sequences that emerge from splitting exactly one interval of `intervals` into a proper
/// partition of itself.
///
/// The parts of the split interval are spliced in place of the original interval. Intervals of size 1 cannot be
/// split. The result is ordered by the position of the split interval, then by the order of
/// [`partition::proper_partitions_of`].
///
/// # Examples
///
/// ```
/// # use scalegen::classify;
/// assert_eq!(
///     classify::refinements(&[3, 1]),
///     [vec![1, 1, 1, 1], vec![1, 2, 1], vec![2, 1, 1]]
/// );
/// assert!(classify::refinements(&[1, 1, 1]).is_empty());
/// ```
pub fn refinements(intervals: &[u16]) -> Vec<Partition> {
    let mut refinements = Vec::new();

    for (position, &interval) in intervals.iter().enumerate() {
        if interval <= 1 {
            continue;
        }

        let (head, tail) = intervals.split_at(position);
        for sub_partition in partition::proper_partitions_of(interval) {
            let mut refinement = Vec::with_capacity(intervals.len() + sub_partition.len() - 1);
            refinement.extend_from_slice(head);
            refinement.extend_from_slice(&sub_partition);
            refinement.extend_from_slice(&tail[1..]);
            refinements.push(refinement);
        }
    }

    refinements
}

/// Returns the largest interval or `None` if there are no intervals.
pub fn largest_interval(intervals: &[u16]) -> Option<u16> {
    intervals.iter().copied().max()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn chromatic_triplets() {
        assert!(contains_chromatic_triplet(&[1, 1, 4, 6]));
        assert!(contains_chromatic_triplet(&[6, 1, 1, 4]));
        assert!(contains_chromatic_triplet(&[1, 4, 6, 1]));
        assert!(contains_chromatic_triplet(&[1, 1]));
        assert!(!contains_chromatic_triplet(&[6, 1, 4, 1]));
        assert!(!contains_chromatic_triplet(&[2, 4, 6]));
        assert!(!contains_chromatic_triplet(&[2, 2, 1, 2, 2, 2, 1]));
        assert!(!contains_chromatic_triplet(&[12]));
        assert!(!contains_chromatic_triplet(&[1]));
        assert!(!contains_chromatic_triplet(&[]));
    }

    #[test]
    fn chromatic_triplet_equals_cyclic_run_of_two_ones() {
        for intervals in partition::partitions_of(8, Default::default()) {
            let doubled = [intervals.as_slice(), intervals.as_slice()].concat();
            let has_cyclic_run = intervals.len() >= 2
                && doubled[..intervals.len() + 1]
                    .windows(2)
                    .any(|pair| pair == [1, 1]);
            assert_eq!(contains_chromatic_triplet(&intervals), has_cyclic_run);
        }
    }

    #[test]
    fn refinements_of_diminished_scale_split_whole_tones_only() {
        let diminished = [1, 2, 1, 2, 1, 2, 1, 2];
        let refinements = refinements(&diminished);

        assert_eq!(
            refinements,
            [
                vec![1, 1, 1, 1, 2, 1, 2, 1, 2],
                vec![1, 2, 1, 1, 1, 1, 2, 1, 2],
                vec![1, 2, 1, 2, 1, 1, 1, 1, 2],
                vec![1, 2, 1, 2, 1, 2, 1, 1, 1],
            ]
        );
    }

    #[test]
    fn refinements_preserve_total_and_grow_in_length() {
        let intervals = [2, 2, 1, 2, 2, 2, 1];
        let refinements = refinements(&intervals);

        assert_eq!(refinements.len(), 5);
        for refinement in refinements {
            assert_eq!(refinement.iter().sum::<u16>(), 12);
            assert_eq!(refinement.len(), intervals.len() + 1);
        }
    }

    #[test]
    fn refinements_of_large_interval() {
        assert_eq!(refinements(&[4]).len(), 7);
        assert_eq!(refinements(&[4, 4]).len(), 14);
    }

    #[test]
    fn largest() {
        assert_eq!(largest_interval(&[2, 5, 1, 4]), Some(5));
        assert_eq!(largest_interval(&[]), None);
    }
}
