use std::io::Read;

use scalegen::filter::FilterConfig;
use serde::{Deserialize, Serialize};

use crate::{error::ResultExt, CliError, CliResult};

/// Filter settings as read from a YAML file. Missing keys leave the corresponding filter disabled.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfigDto {
    pub filter_chromatic_triplets: bool,
    pub filter_subscales: bool,
    pub filter_modes: bool,
    pub max_interval: Option<u16>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FilterConfigDto {
    pub fn read(input: impl Read) -> CliResult<FilterConfigDto> {
        serde_yaml::from_reader(input).handle_error::<CliError>("Could not parse filter config")
    }

    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig {
            filter_chromatic_triplets: self.filter_chromatic_triplets,
            filter_subscales: self.filter_subscales,
            filter_modes: self.filter_modes,
            max_interval: self.max_interval,
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ScalegenDto {
    ScaleList(ScaleListDto),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleListDto {
    pub num_steps_per_octave: u16,
    pub stages: Vec<StageDto>,
    pub scales: Vec<ScaleItemDto>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StageDto {
    pub filter: String,
    pub num_scales_in: usize,
    pub num_scales_out: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleItemDto {
    pub index: usize,
    pub intervals: Vec<u16>,
    pub notes: Vec<String>,
}
