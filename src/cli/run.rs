use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, plan::plan},
    exit_status::ExitStatus,
};

/// Dispatch a parsed command line to its handler.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Plan(cmd)) => plan(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
