//! Enumeration of ordered integer partitions (compositions).
//!
//! A partition of `n` is an ordered sequence of positive parts summing to `n`. For `n = 12` the partitions
//! correspond to all possible interval patterns of a scale in 12-tone equal temperament.

/// An ordered sequence of positive parts.
pub type Partition = Vec<u16>;

/// Selects which partitions are produced by [`partitions_of`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PartitionKind {
    /// Exclude the trivial partition `[n]` consisting of a single part.
    pub proper_only: bool,

    /// Exclude partitions in which a part of size 1 is directly followed by another part of size 1.
    ///
    /// Only adjacent parts are checked. The last and first part are *not* considered to be neighbors.
    pub forbid_consecutive_ones: bool,
}

impl PartitionKind {
    /// All partitions including the trivial one.
    pub fn all() -> Self {
        Self::default()
    }

    /// All partitions except for the trivial one.
    pub fn proper() -> Self {
        Self {
            proper_only: true,
            ..Self::default()
        }
    }
}

/// Lists all ordered partitions of `total` of the given [`PartitionKind`].
///
/// The result is ordered by the first part (ascending), then recursively by the remaining parts. The trivial
/// partition `[total]` comes last. An empty list is returned for `total == 0` and for a proper partition of 1 since
/// neither of them can be split into positive parts.
///
/// The recursion depth is bounded by `total`.
///
/// # Examples
///
/// ```
/// # use scalegen::partition::{self, PartitionKind};
/// assert_eq!(
///     partition::partitions_of(3, PartitionKind::all()),
///     [vec![1, 1, 1], vec![1, 2], vec![2, 1], vec![3]]
/// );
/// assert_eq!(
///     partition::partitions_of(3, PartitionKind::proper()),
///     [vec![1, 1, 1], vec![1, 2], vec![2, 1]]
/// );
/// assert!(partition::partitions_of(1, PartitionKind::proper()).is_empty());
/// ```
pub fn partitions_of(total: u16, kind: PartitionKind) -> Vec<Partition> {
    let mut partitions = Vec::new();
    if total > 0 {
        collect_partitions(&mut Vec::new(), total, kind, &mut partitions);
    }
    partitions
}

/// Shortcut for [`partitions_of`] with [`PartitionKind::proper`].
pub fn proper_partitions_of(total: u16) -> Vec<Partition> {
    partitions_of(total, PartitionKind::proper())
}

fn collect_partitions(
    prefix: &mut Partition,
    remaining: u16,
    kind: PartitionKind,
    partitions: &mut Vec<Partition>,
) {
    let follows_one = prefix.last() == Some(&1);

    for first_part in 1..remaining {
        if kind.forbid_consecutive_ones && follows_one && first_part == 1 {
            continue;
        }
        prefix.push(first_part);
        collect_partitions(prefix, remaining - first_part, kind, partitions);
        prefix.pop();
    }

    let is_trivial = prefix.is_empty();
    let is_forbidden = kind.forbid_consecutive_ones && follows_one && remaining == 1;
    if !(is_trivial && kind.proper_only) && !is_forbidden {
        let mut partition = Vec::with_capacity(prefix.len() + 1);
        partition.extend_from_slice(prefix);
        partition.push(remaining);
        partitions.push(partition);
    }
}
