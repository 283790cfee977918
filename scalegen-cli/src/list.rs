use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use clap::Parser;
use scalegen::{
    filter::{FilterConfig, FilterOutcome},
    scale::{Scale, ScaleSystem},
};

use crate::{
    dto::{FilterConfigDto, ScaleItemDto, ScaleListDto, ScalegenDto, StageDto},
    error::ResultExt,
    midi::{self, MidiSettings},
    App, CliError, CliResult, SystemOptions,
};

#[derive(Parser)]
pub(crate) struct ListOptions {
    #[clap(flatten)]
    system: SystemOptions,

    #[clap(flatten)]
    filters: FilterOptions,

    /// YAML file with filter settings. Command-line filters are applied on top. Flags can enable filters but
    /// cannot disable a filter enabled in the file
    #[clap(long = "config")]
    config_file: Option<PathBuf>,

    /// Print a YAML document instead of a table
    #[clap(long = "yaml")]
    yaml: bool,

    /// Prefix every table row with the current local time
    #[clap(long = "stamp")]
    stamp: bool,

    /// Write every listed scale to a MIDI file in the given directory
    #[clap(long = "midi-dir")]
    midi_dir: Option<PathBuf>,

    #[clap(flatten)]
    midi: MidiSettings,
}

#[derive(Parser)]
struct FilterOptions {
    /// Remove scales with two consecutive semitone steps (three chromatically adjacent notes)
    #[clap(long = "no-triplets")]
    no_chromatic_triplets: bool,

    /// Remove scales that are part of a more refined scale in the list
    #[clap(long = "no-subscales")]
    no_subscales: bool,

    /// Remove scales that are a mode of a scale listed earlier
    #[clap(long = "no-modes")]
    no_modes: bool,

    /// Largest permitted interval
    #[clap(long = "max-interval")]
    max_interval: Option<u16>,

    /// Smallest permitted number of notes
    #[clap(long = "min-len")]
    min_length: Option<usize>,

    /// Largest permitted number of notes
    #[clap(long = "max-len")]
    max_length: Option<usize>,
}

impl FilterOptions {
    fn apply_to(&self, config: &mut FilterConfig) {
        config.filter_chromatic_triplets |= self.no_chromatic_triplets;
        config.filter_subscales |= self.no_subscales;
        config.filter_modes |= self.no_modes;
        if self.max_interval.is_some() {
            config.max_interval = self.max_interval;
        }
        if self.min_length.is_some() {
            config.min_length = self.min_length;
        }
        if self.max_length.is_some() {
            config.max_length = self.max_length;
        }
    }
}

impl ListOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let system = self.system.to_system()?;
        let config = self.filter_config()?;

        let outcome = config.apply(system.all_scales());

        if self.yaml {
            self.print_yaml(app, &system, &outcome)?;
        } else {
            self.print_table(app, &system, &outcome.survivors)?;
        }

        if let Some(midi_dir) = &self.midi_dir {
            self.export_midi_files(app, midi_dir, &outcome.survivors)?;
        }

        Ok(())
    }

    fn filter_config(&self) -> CliResult<FilterConfig> {
        let mut config = match &self.config_file {
            Some(config_file) => {
                let file = File::open(config_file)
                    .handle_file_error::<CliError>("read config file", config_file)?;
                FilterConfigDto::read(file)?.to_filter_config()
            }
            None => FilterConfig::default(),
        };
        self.filters.apply_to(&mut config);
        Ok(config)
    }

    fn print_table(&self, app: &mut App, system: &ScaleSystem, scales: &[Scale]) -> CliResult<()> {
        for (index, scale) in scales.iter().enumerate() {
            let row = format!(
                "{:>4}  {:>2}  {:<38}  {}",
                index + 1,
                scale.len(),
                scale,
                system.note_names(scale, self.system.root()).join(" ")
            );
            if self.stamp {
                app.writeln_stamped(row)?;
            } else {
                app.writeln(row)?;
            }
        }
        Ok(())
    }

    fn print_yaml(
        &self,
        app: &mut App,
        system: &ScaleSystem,
        outcome: &FilterOutcome,
    ) -> CliResult<()> {
        let stages = outcome
            .stages
            .iter()
            .map(|stage| StageDto {
                filter: stage.filter.to_string(),
                num_scales_in: stage.num_scales_in,
                num_scales_out: stage.num_scales_out,
            })
            .collect();

        let scales = outcome
            .survivors
            .iter()
            .enumerate()
            .map(|(index, scale)| ScaleItemDto {
                index: index + 1,
                intervals: scale.intervals().to_vec(),
                notes: system
                    .note_names(scale, self.system.root())
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            })
            .collect();

        let dto = ScalegenDto::ScaleList(ScaleListDto {
            num_steps_per_octave: system.num_steps(),
            stages,
            scales,
        });

        let yaml = serde_yaml::to_string(&dto)
            .handle_error::<CliError>("Could not write scale list")?;
        app.write_all(yaml.as_bytes())?;
        Ok(())
    }

    fn export_midi_files(&self, app: &mut App, midi_dir: &Path, scales: &[Scale]) -> CliResult<()> {
        fs::create_dir_all(midi_dir).handle_file_error::<CliError>("create directory", midi_dir)?;
        for (index, scale) in scales.iter().enumerate() {
            let file_name = midi_dir.join(midi::file_name_for(index + 1, scale));
            midi::write_midi_file(scale, &file_name, &self.midi)?;
        }
        app.errln(format_args!(
            "Wrote {} MIDI files to {}",
            scales.len(),
            midi_dir.display()
        ))?;
        Ok(())
    }
}
