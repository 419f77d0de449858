//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `plan`: Compute the `QueryList.get()` → `QueryList.at()` replacements (dry-run)
//! - `init`: Initialize a `.queryshiftrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Plan(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Reference manifest path (overrides config file)
    #[arg(long, env = "QUERYSHIFT_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style human readable output
    #[default]
    Text,
    /// Machine readable JSON on stdout
    Json,
}

#[derive(Debug, Parser)]
pub struct PlanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct PlanCommand {
    #[command(flatten)]
    pub args: PlanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show where QueryList.get() calls would be rewritten to QueryList.at()
    Plan(PlanCommand),
    /// Initialize a new .queryshiftrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_json() {
        let args = Arguments::try_parse_from([
            "queryshift",
            "plan",
            "--format",
            "json",
            "--manifest",
            "refs.json",
            "-v",
        ])
        .unwrap();

        let Some(Command::Plan(cmd)) = &args.command else {
            panic!("Expected plan command");
        };
        assert_eq!(cmd.args.format, OutputFormat::Json);
        assert_eq!(cmd.args.common.manifest, Some(PathBuf::from("refs.json")));
        assert!(args.verbose());
    }

    #[test]
    fn test_plan_defaults_to_text() {
        let args = Arguments::try_parse_from(["queryshift", "plan"]).unwrap();
        let Some(Command::Plan(cmd)) = &args.command else {
            panic!("Expected plan command");
        };
        assert_eq!(cmd.args.format, OutputFormat::Text);
        assert!(!args.verbose());
    }
}
