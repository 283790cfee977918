//! Reduction of scale lists by musically motivated criteria.
//!
//! Every filter maps a list of scales to the list of its survivors, preserving their order. The stages of a
//! [`FilterConfig`] are applied in a fixed order: chromatic triplets, subscales, modes, interval size, length.

use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Display, Formatter},
};

use log::{debug, info};

use crate::scale::Scale;

/// A single filter stage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Filter {
    /// Removes scales containing two consecutive semitone steps, see [`Scale::contains_chromatic_triplet`].
    ChromaticTriplets,

    /// Removes scales with a refinement that is part of the same list, see [`remove_subscales`].
    Subscales,

    /// Removes scales that are a mode of a scale listed earlier, see [`remove_modes`].
    Modes,

    /// Removes scales containing an interval larger than the given size.
    MaxInterval(u16),

    /// Removes scales with fewer than `min` or more than `max` notes.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl Filter {
    pub fn apply(self, scales: &[Scale]) -> Vec<Scale> {
        match self {
            Filter::ChromaticTriplets => remove_chromatic_triplets(scales),
            Filter::Subscales => remove_subscales(scales),
            Filter::Modes => remove_modes(scales),
            Filter::MaxInterval(max_interval) => limit_interval_size(scales, max_interval),
            Filter::Length { min, max } => limit_length(scales, min, max),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Filter::ChromaticTriplets => write!(f, "chromatic triplets"),
            Filter::Subscales => write!(f, "subscales"),
            Filter::Modes => write!(f, "modes"),
            Filter::MaxInterval(max_interval) => write!(f, "interval size <= {}", max_interval),
            Filter::Length { min, max } => {
                write!(f, "length")?;
                if let Some(min) = min {
                    write!(f, " >= {}", min)?;
                }
                if let Some(max) = max {
                    write!(f, " <= {}", max)?;
                }
                Ok(())
            }
        }
    }
}

/// Selects the filters to apply.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterConfig {
    pub filter_chromatic_triplets: bool,
    pub filter_subscales: bool,
    pub filter_modes: bool,
    pub max_interval: Option<u16>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FilterConfig {
    /// The enabled filters in order of application.
    ///
    /// ```
    /// # use scalegen::filter::{Filter, FilterConfig};
    /// let config = FilterConfig {
    ///     filter_chromatic_triplets: true,
    ///     filter_modes: true,
    ///     min_length: Some(6),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     config.filters(),
    ///     [
    ///         Filter::ChromaticTriplets,
    ///         Filter::Modes,
    ///         Filter::Length { min: Some(6), max: None },
    ///     ]
    /// );
    /// ```
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if self.filter_chromatic_triplets {
            filters.push(Filter::ChromaticTriplets);
        }
        if self.filter_subscales {
            filters.push(Filter::Subscales);
        }
        if self.filter_modes {
            filters.push(Filter::Modes);
        }
        if let Some(max_interval) = self.max_interval {
            filters.push(Filter::MaxInterval(max_interval));
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            filters.push(Filter::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }
        filters
    }

    /// Runs all enabled filters on `scales`.
    pub fn apply(&self, scales: Vec<Scale>) -> FilterOutcome {
        let mut survivors = scales;
        let mut stages = Vec::new();

        for filter in self.filters() {
            let num_scales_in = survivors.len();
            survivors = filter.apply(&survivors);
            info!(
                "Filtered by {}: {} -> {} scales",
                filter,
                num_scales_in,
                survivors.len()
            );
            stages.push(StageReport {
                filter,
                num_scales_in,
                num_scales_out: survivors.len(),
            });
        }

        FilterOutcome { survivors, stages }
    }
}

/// The result of [`FilterConfig::apply`].
#[derive(Clone, Debug)]
pub struct FilterOutcome {
    pub survivors: Vec<Scale>,
    pub stages: Vec<StageReport>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StageReport {
    pub filter: Filter,
    pub num_scales_in: usize,
    pub num_scales_out: usize,
}

pub fn remove_chromatic_triplets(scales: &[Scale]) -> Vec<Scale> {
    retain_logged(scales, |scale| {
        if scale.contains_chromatic_triplet() {
            Err("it contains a chromatic triplet".to_owned())
        } else {
            Ok(())
        }
    })
}

/// Removes every scale that has a refinement (see [`Scale::refinements`]) within `scales`.
///
/// The refinements are looked up in the complete input list, not only in the scales accepted so far. As a
/// consequence, the result does not depend on the order of `scales`.
///
/// ```
/// # use scalegen::{filter, scale::Scale};
/// let scales: Vec<Scale> = ["4,4,4", "2,2,4,4", "2,2,2,2,4", "3,3,3,3"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
///
/// assert_eq!(
///     filter::remove_subscales(&scales),
///     [scales[2].clone(), scales[3].clone()]
/// );
/// ```
pub fn remove_subscales(scales: &[Scale]) -> Vec<Scale> {
    let candidates = scales.iter().collect::<HashSet<_>>();

    retain_logged(scales, |scale| {
        match scale
            .refinements()
            .into_iter()
            .find(|refinement| candidates.contains(refinement))
        {
            Some(refinement) => Err(format!("it is a subscale of {}", refinement)),
            None => Ok(()),
        }
    })
}

/// Removes every scale that is a mode of a scale accepted before.
///
/// The first representative of each mode class survives, so the result depends on the order of `scales`. An empty
/// input list yields an empty output list.
///
/// ```
/// # use scalegen::{filter, scale::Scale};
/// let scales: Vec<Scale> = ["2,2,1,2,2,2,1", "5,7", "2,1,2,2,1,2,2", "7,5"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
///
/// assert_eq!(
///     filter::remove_modes(&scales),
///     [scales[0].clone(), scales[1].clone()]
/// );
/// assert!(filter::remove_modes(&[]).is_empty());
/// ```
pub fn remove_modes(scales: &[Scale]) -> Vec<Scale> {
    let mut roots_by_mode = HashMap::<Scale, Scale>::new();

    retain_logged(scales, |scale| {
        if let Some(root) = roots_by_mode.get(scale) {
            return Err(format!("it is a mode of {}", root));
        }
        for mode in scale.modes(true) {
            roots_by_mode.insert(mode, scale.clone());
        }
        Ok(())
    })
}

pub fn limit_interval_size(scales: &[Scale], max_interval: u16) -> Vec<Scale> {
    retain_logged(scales, |scale| {
        let largest_interval = scale.largest_interval();
        if largest_interval > max_interval {
            Err(format!(
                "its largest interval ({}) exceeds {}",
                largest_interval, max_interval
            ))
        } else {
            Ok(())
        }
    })
}

/// Keeps the scales with at least `min` and at most `max` notes. A bound of `None` is not checked.
pub fn limit_length(scales: &[Scale], min: Option<usize>, max: Option<usize>) -> Vec<Scale> {
    retain_logged(scales, |scale| {
        let too_short = min.is_some_and(|min| scale.len() < min);
        let too_long = max.is_some_and(|max| scale.len() > max);
        if too_short || too_long {
            Err(format!("its length ({}) is out of bounds", scale.len()))
        } else {
            Ok(())
        }
    })
}

fn retain_logged(
    scales: &[Scale],
    mut check: impl FnMut(&Scale) -> Result<(), String>,
) -> Vec<Scale> {
    scales
        .iter()
        .filter(|&scale| match check(scale) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Removed {} because {}", scale, reason);
                false
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::scale::ScaleSystem;

    use super::*;

    fn scales(items: &[&[u16]]) -> Vec<Scale> {
        items
            .iter()
            .map(|intervals| Scale::from_intervals(intervals.to_vec()).unwrap())
            .collect()
    }

    fn major() -> Scale {
        Scale::from_intervals(vec![2, 2, 1, 2, 2, 2, 1]).unwrap()
    }

    #[test]
    fn chromatic_triplet_filter() {
        let major = [2, 2, 1, 2, 2, 2, 1];
        let input = scales(&[&[1, 1, 10], &major, &[1, 10, 1], &[1, 11]]);
        assert_eq!(
            remove_chromatic_triplets(&input),
            scales(&[&[2, 2, 1, 2, 2, 2, 1], &[1, 11]])
        );
    }

    #[test]
    fn subscale_filter_keeps_most_refined_scales() {
        let input = scales(&[&[6, 6], &[3, 3, 6], &[3, 3, 3, 3], &[4, 8]]);
        assert_eq!(remove_subscales(&input), scales(&[&[3, 3, 3, 3], &[4, 8]]));
    }

    #[test]
    fn subscale_filter_is_order_independent() {
        let mut input = scales(&[&[6, 6], &[3, 3, 6], &[3, 3, 3, 3], &[4, 8]]);
        input.reverse();
        assert_eq!(remove_subscales(&input), scales(&[&[4, 8], &[3, 3, 3, 3]]));
    }

    #[test]
    fn subscale_filter_on_all_scales_leaves_chromatic_scale() {
        let all_scales = ScaleSystem::twelve_tone().all_scales();
        assert_eq!(remove_subscales(&all_scales), scales(&[&[1; 12]]));
    }

    #[test]
    fn mode_filter_keeps_first_representative() {
        let input = scales(&[&[5, 7], &[7, 5], &[4, 4, 4], &[2, 5, 5], &[5, 2, 5]]);
        assert_eq!(
            remove_modes(&input),
            scales(&[&[5, 7], &[4, 4, 4], &[2, 5, 5]])
        );
    }

    #[test]
    fn mode_filter_is_idempotent() {
        let once = remove_modes(&ScaleSystem::twelve_tone().all_scales());
        let twice = remove_modes(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn mode_filter_on_all_scales_yields_necklaces() {
        // Number of binary necklaces of length 12 minus the necklace with no notes at all
        let survivors = remove_modes(&ScaleSystem::twelve_tone().all_scales());
        assert_eq!(survivors.len(), 351);
        for (index, scale) in survivors.iter().enumerate() {
            assert!(survivors[..index]
                .iter()
                .all(|previous| !scale.is_mode_of(previous)));
        }
    }

    #[test]
    fn interval_size_filter() {
        let input = scales(&[&[5, 7], &[4, 4, 4], &[2, 5, 5], &[3, 4, 5]]);
        assert_eq!(limit_interval_size(&input, 4), scales(&[&[4, 4, 4]]));
        assert_eq!(
            limit_interval_size(&input, 5),
            scales(&[&[4, 4, 4], &[2, 5, 5], &[3, 4, 5]])
        );
        assert_eq!(limit_interval_size(&input, 7), input);
        assert_eq!(limit_interval_size(&input, 3), Vec::<Scale>::new());
    }

    #[test]
    fn length_filter() {
        let input = scales(&[&[12], &[6, 6], &[4, 4, 4], &[3, 3, 3, 3]]);
        assert_eq!(
            limit_length(&input, Some(2), Some(3)),
            scales(&[&[6, 6], &[4, 4, 4]])
        );
        assert_eq!(
            limit_length(&input, Some(3), None),
            scales(&[&[4, 4, 4], &[3, 3, 3, 3]])
        );
        assert_eq!(limit_length(&input, None, None), input);
    }

    #[test]
    fn empty_input_for_every_filter() {
        let config = FilterConfig {
            filter_chromatic_triplets: true,
            filter_subscales: true,
            filter_modes: true,
            max_interval: Some(3),
            min_length: Some(5),
            max_length: Some(9),
        };
        for filter in config.filters() {
            assert!(filter.apply(&[]).is_empty());
        }
    }

    #[test]
    fn major_scale_survives_pipeline() {
        let config = FilterConfig {
            filter_chromatic_triplets: true,
            filter_modes: true,
            min_length: Some(6),
            ..Default::default()
        };

        let outcome = config.apply(ScaleSystem::twelve_tone().all_scales());

        assert!(outcome
            .survivors
            .iter()
            .any(|scale| scale.is_mode_of(&major())));
        assert!(outcome.survivors.iter().all(|scale| scale.len() >= 6));
        assert!(outcome
            .survivors
            .iter()
            .all(|scale| !scale.contains_chromatic_triplet()));

        assert_eq!(outcome.stages.len(), 3);
        assert_eq!(outcome.stages[0].filter, Filter::ChromaticTriplets);
        assert_eq!(outcome.stages[0].num_scales_in, 2048);
        for pair in outcome.stages.windows(2) {
            assert_eq!(pair[0].num_scales_out, pair[1].num_scales_in);
        }
        assert_eq!(
            outcome.stages.last().unwrap().num_scales_out,
            outcome.survivors.len()
        );
    }

    #[test]
    fn pipeline_without_filters_is_identity() {
        let all_scales = ScaleSystem::twelve_tone().all_scales();
        let outcome = FilterConfig::default().apply(all_scales.clone());
        assert_eq!(outcome.survivors, all_scales);
        assert!(outcome.stages.is_empty());
    }

    #[test]
    fn filter_names() {
        assert_eq!(Filter::MaxInterval(4).to_string(), "interval size <= 4");
        assert_eq!(
            Filter::Length {
                min: Some(5),
                max: None
            }
            .to_string(),
            "length >= 5"
        );
    }
}
