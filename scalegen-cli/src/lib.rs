mod dto;
mod error;
mod list;
mod midi;
mod scale;

use std::{
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use chrono::Local;
use clap::{Parser, Subcommand};
use list::ListOptions;
use midi::MidiOptions;
use scale::{ModesOptions, RefineOptions};
use scalegen::scale::{ScaleError, ScaleSystem, ScaleSystemError};

/// Largest supported number of steps per octave. The number of scales doubles with every step.
pub const MAX_OCTAVE_SIZE: u16 = 20;

#[derive(Parser)]
#[clap(
    version,
    about = "Enumerate the scales of an octave and filter them by musical criteria"
)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[clap(long = "of")]
    output_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: MainCommand,
}

#[derive(Subcommand)]
enum MainCommand {
    /// Enumerate all scales of the octave and apply the selected filters
    #[clap(name = "list")]
    List(ListOptions),

    /// Display the modes of a 12-tone scale rated by how major they sound
    #[clap(name = "modes")]
    Modes(ModesOptions),

    /// Display all scales emerging from splitting one interval of a scale
    #[clap(name = "refine")]
    Refine(RefineOptions),

    /// Write a scale to a MIDI file
    #[clap(name = "midi")]
    Midi(MidiOptions),
}

impl MainOptions {
    fn run(self) -> CliResult<()> {
        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let stderr = io::stderr();
        let error = Box::new(stderr.lock());

        let mut app = App { output, error };

        self.command.run(&mut app)
    }
}

impl MainCommand {
    fn run(self, app: &mut App) -> CliResult<()> {
        match self {
            MainCommand::List(options) => options.run(app),
            MainCommand::Modes(options) => options.run(app),
            MainCommand::Refine(options) => options.run(app),
            MainCommand::Midi(options) => options.run(app),
        }
    }
}

/// Describes the tone system scales are generated in.
#[derive(Parser)]
pub(crate) struct SystemOptions {
    /// Number of steps per octave. 12 uses interval names, other sizes use step numbers
    #[clap(long = "octave", default_value = "12")]
    octave_size: u16,

    /// Step at which note naming starts
    #[clap(long = "root", default_value = "0")]
    root: u16,
}

impl SystemOptions {
    pub fn to_system(&self) -> CliResult<ScaleSystem> {
        if self.octave_size > MAX_OCTAVE_SIZE {
            return Err(CliError::CommandError(format!(
                "Octave size {} exceeds the maximum of {}",
                self.octave_size, MAX_OCTAVE_SIZE
            )));
        }
        Ok(match self.octave_size {
            12 => ScaleSystem::twelve_tone(),
            octave_size => ScaleSystem::with_numbered_notes(octave_size)?,
        })
    }

    pub fn root(&self) -> u16 {
        self.root
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                err.print()?;
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    output: Box<dyn 'a + Write>,
    error: Box<dyn 'a + Write>,
}

impl App<'_> {
    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{}", message)
    }

    /// Writes a line prefixed by the current local time.
    pub fn writeln_stamped(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(
            &mut self.output,
            "<{}> {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            message
        )
    }

    pub fn write_all(&mut self, content: &[u8]) -> io::Result<()> {
        self.output.write_all(content)
    }

    pub fn errln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.error, "{}", message)
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {}", err),
            CliError::CommandError(err) => write!(f, "The command failed / {}", err),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<ScaleError> for CliError {
    fn from(v: ScaleError) -> Self {
        CliError::CommandError(format!("Invalid scale ({})", v))
    }
}

impl From<ScaleSystemError> for CliError {
    fn from(v: ScaleSystemError) -> Self {
        CliError::CommandError(v.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
