use std::{env, io::ErrorKind};

use scalegen_cli::{CliError, CliResult};

fn main() -> CliResult<()> {
    env_logger::init();

    match scalegen_cli::run_in_shell_env(env::args()) {
        // Output piped into a process that has already terminated, e.g. `scalegen list | head`
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
