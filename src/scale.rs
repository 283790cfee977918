//! Scales as cyclic interval patterns and the tone systems they live in.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    character, classify,
    partition::{self, Partition, PartitionKind},
    reorder,
};

/// Note names of 12-tone equal temperament relative to the root.
pub const TWELVE_TONE_NOTE_NAMES: [&str; 12] = [
    "R", "m2", "M2", "m3", "M3", "M4", "s4", "M5", "s5", "M6", "♭7", "M7",
];

/// A scale given by the sizes of the steps between consecutive notes.
///
/// The intervals are read cyclically: The last interval leads from the highest note back to the root one period
/// above. A [`Scale`] is immutable and every interval is at least 1.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Scale {
    intervals: Vec<u16>,
}

impl Scale {
    /// Creates a [`Scale`] from a non-empty list of positive intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scalegen::scale::{Scale, ScaleError};
    /// let major = Scale::from_intervals(vec![2, 2, 1, 2, 2, 2, 1]).unwrap();
    /// assert_eq!(major.num_steps(), 12);
    /// assert_eq!(major.len(), 7);
    ///
    /// assert_eq!(Scale::from_intervals(vec![]), Err(ScaleError::Empty));
    /// assert_eq!(
    ///     Scale::from_intervals(vec![3, 0, 9]),
    ///     Err(ScaleError::ZeroInterval { position: 1 })
    /// );
    /// ```
    pub fn from_intervals(intervals: Vec<u16>) -> Result<Self, ScaleError> {
        if intervals.is_empty() {
            return Err(ScaleError::Empty);
        }
        if let Some(position) = intervals.iter().position(|&interval| interval == 0) {
            return Err(ScaleError::ZeroInterval { position });
        }
        Ok(Self { intervals })
    }

    pub fn intervals(&self) -> &[u16] {
        &self.intervals
    }

    /// The number of notes (or intervals) per period.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always `false` since a [`Scale`] has at least one interval.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The size of the period in steps, i.e. the sum of all intervals.
    pub fn num_steps(&self) -> u32 {
        self.intervals.iter().copied().map(u32::from).sum()
    }

    /// The size of the largest step.
    pub fn largest_interval(&self) -> u16 {
        classify::largest_interval(&self.intervals).unwrap_or_default()
    }

    /// See [`classify::contains_chromatic_triplet`].
    pub fn contains_chromatic_triplet(&self) -> bool {
        classify::contains_chromatic_triplet(&self.intervals)
    }

    /// See [`classify::refinements`].
    pub fn refinements(&self) -> Vec<Scale> {
        classify::refinements(&self.intervals)
            .into_iter()
            .map(Scale::from_partition)
            .collect()
    }

    /// The scale rotated to the left by `n` intervals, i.e. the mode starting on the `n`-th note.
    pub fn rotated(&self, n: usize) -> Scale {
        Scale::from_partition(reorder::cyclic_shift(&self.intervals, n))
    }

    /// The distinct modes of the scale, see [`reorder::cyclic_permutations`].
    pub fn modes(&self, include_self: bool) -> Vec<Scale> {
        reorder::cyclic_permutations(&self.intervals, include_self)
            .into_iter()
            .map(Scale::from_partition)
            .collect()
    }

    pub fn is_mode_of(&self, other: &Scale) -> bool {
        reorder::is_rotation_of(&self.intervals, &other.intervals)
    }

    /// See [`character::majority_score`].
    pub fn majority_score(&self) -> u8 {
        character::majority_score(&self.intervals)
    }

    /// See [`character::most_major_mode`].
    pub fn most_major_mode(&self) -> Option<Scale> {
        character::most_major_mode(&self.intervals).map(Scale::from_partition)
    }

    /// The positions of the notes in steps above the root, starting with the root itself and ending with the period.
    ///
    /// ```
    /// # use scalegen::scale::Scale;
    /// let scale: Scale = "3,4,5".parse().unwrap();
    /// assert_eq!(scale.note_positions(), [0, 3, 7, 12]);
    /// ```
    pub fn note_positions(&self) -> Vec<u32> {
        let mut position = 0;
        let mut positions = Vec::with_capacity(self.intervals.len() + 1);
        positions.push(position);
        for &interval in &self.intervals {
            position += u32::from(interval);
            positions.push(position);
        }
        positions
    }

    fn from_partition(partition: Partition) -> Scale {
        Scale {
            intervals: partition,
        }
    }
}

impl Display for Scale {
    /// ```
    /// # use scalegen::scale::Scale;
    /// let scale: Scale = "2,2,1,2,2,2,1".parse().unwrap();
    /// assert_eq!(scale.to_string(), "[2, 2, 1, 2, 2, 2, 1]");
    /// assert_eq!(format!("{:#}", scale), "2-2-1-2-2-2-1");
    /// assert_eq!(format!("{:<8}", "5,7".parse::<Scale>().unwrap()), "[5, 7]  ");
    /// ```
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let separator = if f.alternate() { "-" } else { ", " };
        let joined = self
            .intervals
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(separator);
        if f.alternate() {
            f.pad(&joined)
        } else {
            f.pad(&format!("[{}]", joined))
        }
    }
}

/// Parses comma, space or dash separated intervals, optionally enclosed in brackets.
///
/// ```
/// # use scalegen::scale::Scale;
/// let expected = Scale::from_intervals(vec![2, 2, 1, 2, 2, 2, 1]).unwrap();
/// assert_eq!("2,2,1,2,2,2,1".parse::<Scale>().unwrap(), expected);
/// assert_eq!("[2, 2, 1, 2, 2, 2, 1]".parse::<Scale>().unwrap(), expected);
/// assert_eq!("2-2-1-2-2-2-1".parse::<Scale>().unwrap(), expected);
/// assert!("2,x".parse::<Scale>().is_err());
/// ```
impl FromStr for Scale {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(s);

        let intervals = s
            .split(|c: char| c == ',' || c == '-' || c.is_whitespace())
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse()
                    .map_err(|_| ScaleError::InvalidInterval(item.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Scale::from_intervals(intervals)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScaleError {
    /// The scale does not contain any intervals.
    Empty,

    /// The interval at the given position has size 0.
    ZeroInterval { position: usize },

    /// An interval could not be parsed as a positive integer.
    InvalidInterval(String),
}

impl Display for ScaleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ScaleError::Empty => write!(f, "The scale is empty"),
            ScaleError::ZeroInterval { position } => {
                write!(f, "The interval at position {} is zero", position)
            }
            ScaleError::InvalidInterval(item) => write!(f, "Invalid interval '{}'", item),
        }
    }
}

impl Error for ScaleError {}

/// The tone system all scales are built in: the number of steps per period (octave) and the names of these steps.
#[derive(Clone, Debug)]
pub struct ScaleSystem {
    note_names: Vec<String>,
}

impl ScaleSystem {
    /// Creates a [`ScaleSystem`] with `num_steps` steps named by `note_names`.
    ///
    /// ```
    /// # use scalegen::scale::{ScaleSystem, ScaleSystemError};
    /// assert!(ScaleSystem::new(3, vec!["a".into(), "b".into(), "c".into()]).is_ok());
    /// assert_eq!(
    ///     ScaleSystem::new(3, vec!["a".into()]).unwrap_err(),
    ///     ScaleSystemError::NoteNamesMismatch { num_steps: 3, num_note_names: 1 }
    /// );
    /// assert_eq!(
    ///     ScaleSystem::new(0, vec![]).unwrap_err(),
    ///     ScaleSystemError::EmptyPeriod
    /// );
    /// ```
    pub fn new(num_steps: u16, note_names: Vec<String>) -> Result<Self, ScaleSystemError> {
        if num_steps == 0 {
            return Err(ScaleSystemError::EmptyPeriod);
        }
        if note_names.len() != usize::from(num_steps) {
            return Err(ScaleSystemError::NoteNamesMismatch {
                num_steps,
                num_note_names: note_names.len(),
            });
        }
        Ok(Self { note_names })
    }

    /// The 12-tone octave named by [`TWELVE_TONE_NOTE_NAMES`].
    pub fn twelve_tone() -> Self {
        Self {
            note_names: TWELVE_TONE_NOTE_NAMES
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
        }
    }

    /// A system of `num_steps` steps named `0`, `1`, `2`, ... .
    pub fn with_numbered_notes(num_steps: u16) -> Result<Self, ScaleSystemError> {
        Self::new(
            num_steps,
            (0..num_steps).map(|step| step.to_string()).collect(),
        )
    }

    /// The number of steps per period.
    pub fn num_steps(&self) -> u16 {
        // The length is validated on construction
        self.note_names.len() as u16
    }

    /// Every scale of this system, i.e. all partitions of the period, stably sorted by ascending length.
    ///
    /// ```
    /// # use scalegen::scale::ScaleSystem;
    /// let scales = ScaleSystem::twelve_tone().all_scales();
    /// assert_eq!(scales.len(), 2048);
    /// assert_eq!(scales[0].intervals(), [12]);
    /// assert_eq!(scales[2047].intervals(), [1; 12]);
    /// ```
    pub fn all_scales(&self) -> Vec<Scale> {
        let mut scales = partition::partitions_of(self.num_steps(), PartitionKind::all())
            .into_iter()
            .map(Scale::from_partition)
            .collect::<Vec<_>>();
        scales.sort_by_key(Scale::len);
        scales
    }

    /// Ensures that `scale` spans exactly one period of this system.
    pub fn check(&self, scale: &Scale) -> Result<(), ScaleSystemError> {
        let num_steps = scale.num_steps();
        if num_steps != u32::from(self.num_steps()) {
            return Err(ScaleSystemError::PeriodMismatch {
                expected: self.num_steps(),
                actual: num_steps,
            });
        }
        Ok(())
    }

    /// Names the notes reached by walking through the intervals of `scale`, starting at step `root`.
    ///
    /// The walk includes the final note which is the root shifted by one period.
    ///
    /// ```
    /// # use scalegen::scale::{Scale, ScaleSystem};
    /// let system = ScaleSystem::twelve_tone();
    /// let scale: Scale = "2,2,1,2,2,2,1".parse().unwrap();
    /// assert_eq!(
    ///     system.note_names(&scale, 0),
    ///     ["R", "M2", "M3", "M4", "M5", "M6", "M7", "R"]
    /// );
    /// assert_eq!(
    ///     system.note_names(&"5,7".parse::<Scale>().unwrap(), 9),
    ///     ["M6", "M2", "M6"]
    /// );
    /// ```
    pub fn note_names(&self, scale: &Scale, root: u16) -> Vec<&str> {
        let num_steps = self.note_names.len() as u32;
        scale
            .note_positions()
            .into_iter()
            .map(|position| {
                let index = (position + u32::from(root)) % num_steps;
                self.note_names[index as usize].as_str()
            })
            .collect()
    }
}

impl Default for ScaleSystem {
    fn default() -> Self {
        Self::twelve_tone()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScaleSystemError {
    /// The period contains no steps.
    EmptyPeriod,

    /// The number of note names differs from the number of steps.
    NoteNamesMismatch {
        num_steps: u16,
        num_note_names: usize,
    },

    /// The scale does not span exactly one period.
    PeriodMismatch { expected: u16, actual: u32 },
}

impl Display for ScaleSystemError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ScaleSystemError::EmptyPeriod => write!(f, "The period must contain at least one step"),
            ScaleSystemError::NoteNamesMismatch {
                num_steps,
                num_note_names,
            } => write!(
                f,
                "Expected {} note names but got {}",
                num_steps, num_note_names
            ),
            ScaleSystemError::PeriodMismatch { expected, actual } => write!(
                f,
                "The scale spans {} steps but the period has {} steps",
                actual, expected
            ),
        }
    }
}

impl Error for ScaleSystemError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scale(intervals: &[u16]) -> Scale {
        Scale::from_intervals(intervals.to_vec()).unwrap()
    }

    #[test]
    fn modes_of_scale() {
        let major = scale(&[2, 2, 1, 2, 2, 2, 1]);
        let aeolian = scale(&[2, 1, 2, 2, 1, 2, 2]);

        assert_eq!(major.rotated(5), aeolian);
        assert!(aeolian.is_mode_of(&major));
        assert_eq!(major.modes(true).len(), 7);
        assert!(major.modes(false).contains(&aeolian));
        assert_eq!(aeolian.most_major_mode(), Some(major.clone()));
        assert_eq!(major.majority_score(), 15);
    }

    #[test]
    fn refinements_are_scales() {
        let whole_tone = scale(&[2, 2, 2, 2, 2, 2]);
        let refinements = whole_tone.refinements();

        assert_eq!(refinements.len(), 6);
        assert_eq!(refinements[0], scale(&[1, 1, 2, 2, 2, 2, 2]));
        for refinement in &refinements {
            assert_eq!(refinement.num_steps(), 12);
        }
    }

    #[test]
    fn largest_interval_of_scale() {
        assert_eq!(scale(&[2, 5, 1, 4]).largest_interval(), 5);
        assert_eq!(scale(&[12]).largest_interval(), 12);
        assert_eq!(scale(&[1; 12]).largest_interval(), 1);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Scale>(), Err(ScaleError::Empty));
        assert_eq!("[]".parse::<Scale>(), Err(ScaleError::Empty));
        assert_eq!(
            "2,0".parse::<Scale>(),
            Err(ScaleError::ZeroInterval { position: 1 })
        );
        assert_eq!(
            "2,3.5".parse::<Scale>(),
            Err(ScaleError::InvalidInterval("3.5".to_owned()))
        );
    }

    #[test]
    fn period_check() {
        let system = ScaleSystem::twelve_tone();
        assert_eq!(system.check(&scale(&[5, 7])), Ok(()));
        assert_eq!(
            system.check(&scale(&[5, 5])),
            Err(ScaleSystemError::PeriodMismatch {
                expected: 12,
                actual: 10
            })
        );
    }

    #[test]
    fn numbered_notes() {
        let system = ScaleSystem::with_numbered_notes(5).unwrap();
        assert_eq!(system.num_steps(), 5);
        assert_eq!(system.note_names(&scale(&[2, 3]), 4), ["4", "1", "4"]);
        assert_eq!(system.all_scales().len(), 16);
        assert_eq!(
            ScaleSystem::with_numbered_notes(0).unwrap_err(),
            ScaleSystemError::EmptyPeriod
        );
    }

    #[test]
    fn all_scales_are_sorted_by_length() {
        let scales = ScaleSystem::twelve_tone().all_scales();
        assert!(scales.windows(2).all(|pair| pair[0].len() <= pair[1].len()));
        assert!(scales.iter().all(|scale| scale.num_steps() == 12));
        assert_eq!(scales.iter().filter(|scale| scale.len() == 2).count(), 11);
        assert_eq!(scales[1], scale(&[1, 11]));
    }
}
