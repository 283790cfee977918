use clap::Parser;
use scalegen::scale::{Scale, ScaleSystem};

use crate::{App, CliResult, SystemOptions};

const MOST_MAJOR_MODE_LEGEND: &str =
    "(*) means most major mode i.e. the mode closest to the major scale";

#[derive(Parser)]
pub(crate) struct ModesOptions {
    /// Scale to analyze, e.g. 2,1,2,2,1,2,2
    scale: Scale,

    /// Step at which note naming starts
    #[clap(long = "root", default_value = "0")]
    root: u16,
}

impl ModesOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let system = ScaleSystem::twelve_tone();
        system.check(&self.scale)?;

        let most_major_mode = self.scale.most_major_mode();

        for (index, mode) in self.scale.modes(true).iter().enumerate() {
            let marker = if Some(mode) == most_major_mode.as_ref() {
                "*"
            } else {
                " "
            };
            app.writeln(format_args!(
                "{} {:>2}  {:<38}  score = {:>2}  {}",
                marker,
                index + 1,
                mode,
                mode.majority_score(),
                system.note_names(mode, self.root).join(" ")
            ))?;
        }

        app.writeln(MOST_MAJOR_MODE_LEGEND)?;

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct RefineOptions {
    /// Scale to refine, e.g. 2,2,2,2,2,2
    scale: Scale,

    #[clap(flatten)]
    system: SystemOptions,
}

impl RefineOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let system = self.system.to_system()?;
        system.check(&self.scale)?;

        for (index, refinement) in self.scale.refinements().iter().enumerate() {
            app.writeln(format_args!(
                "{:>4}  {:>2}  {:<38}  {}",
                index + 1,
                refinement.len(),
                refinement,
                system.note_names(refinement, self.system.root()).join(" ")
            ))?;
        }

        Ok(())
    }
}
