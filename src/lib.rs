//! Generate musical scales by partitioning an octave into intervals and filter them down to a curated list.
//!
//! ```
//! # use scalegen::{filter::FilterConfig, scale::ScaleSystem};
//! let config = FilterConfig {
//!     filter_chromatic_triplets: true,
//!     filter_modes: true,
//!     min_length: Some(7),
//!     ..Default::default()
//! };
//!
//! let outcome = config.apply(ScaleSystem::twelve_tone().all_scales());
//! assert!(outcome
//!     .survivors
//!     .iter()
//!     .any(|scale| scale.is_mode_of(&"2,2,1,2,2,2,1".parse().unwrap())));
//! ```

pub mod character;
pub mod classify;
pub mod filter;
pub mod partition;
pub mod reorder;
pub mod scale;
