//! Heuristics rating how "major" a 12-tone scale sounds.

use crate::reorder;

/// Size of a major third in semitones.
pub const MAJOR_THIRD: u16 = 4;
/// Size of a perfect fifth in semitones.
pub const PERFECT_FIFTH: u16 = 7;
/// Size of a minor ("flat") seventh in semitones.
pub const FLAT_SEVENTH: u16 = 10;
/// Size of a major seventh in semitones.
pub const MAJOR_SEVENTH: u16 = 11;

/// Tells whether a note of the scale lies exactly `interval_size` steps above the root.
///
/// # Examples
///
/// ```
/// # use scalegen::character;
/// let major = [2, 2, 1, 2, 2, 2, 1];
/// assert!(character::contains_cumulative_interval(&major, 4));
/// assert!(!character::contains_cumulative_interval(&major, 3));
/// ```
pub fn contains_cumulative_interval(intervals: &[u16], interval_size: u16) -> bool {
    let mut total = 0u32;
    for &interval in intervals {
        total += u32::from(interval);
        if total >= u32::from(interval_size) {
            return total == u32::from(interval_size);
        }
    }
    false
}

pub fn contains_major_third(intervals: &[u16]) -> bool {
    contains_cumulative_interval(intervals, MAJOR_THIRD)
}

pub fn contains_perfect_fifth(intervals: &[u16]) -> bool {
    contains_cumulative_interval(intervals, PERFECT_FIFTH)
}

pub fn contains_flat_seventh(intervals: &[u16]) -> bool {
    contains_cumulative_interval(intervals, FLAT_SEVENTH)
}

pub fn contains_major_seventh(intervals: &[u16]) -> bool {
    contains_cumulative_interval(intervals, MAJOR_SEVENTH)
}

/// Rates a scale by how close it is to the major scale.
///
/// The criteria are weighted by priority: a major third (8) beats a major seventh (4) beats a perfect fifth (2) beats
/// the absence of a flat seventh (1). The major scale achieves the maximum score of 15.
///
/// ```
/// # use scalegen::character;
/// assert_eq!(character::majority_score(&[2, 2, 1, 2, 2, 2, 1]), 15);
/// assert_eq!(character::majority_score(&[2, 1, 2, 2, 1, 2, 2]), 2);
/// ```
pub fn majority_score(intervals: &[u16]) -> u8 {
    let mut score = 0;
    if contains_major_third(intervals) {
        score += 8;
    }
    if contains_major_seventh(intervals) {
        score += 4;
    }
    if contains_perfect_fifth(intervals) {
        score += 2;
    }
    if !contains_flat_seventh(intervals) {
        score += 1;
    }
    score
}

/// Finds the mode with the highest [`majority_score`].
///
/// Ties are resolved in favor of the mode with the smallest rotation. `None` is returned if no mode achieves a
/// positive score.
///
/// ```
/// # use scalegen::character;
/// let aeolian = [2, 1, 2, 2, 1, 2, 2];
/// assert_eq!(
///     character::most_major_mode(&aeolian),
///     Some(vec![2, 2, 1, 2, 2, 2, 1])
/// );
/// ```
pub fn most_major_mode(intervals: &[u16]) -> Option<Vec<u16>> {
    let mut best = None;
    let mut best_score = 0;

    for mode in reorder::cyclic_permutations(intervals, true) {
        let score = majority_score(&mode);
        if score > best_score {
            best_score = score;
            best = Some(mode);
        }
    }

    best
}
