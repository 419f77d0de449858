use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Nothing left to migrate
/// - `Failure` (1): Replacements are pending (the plan is not empty)
/// - `Error` (2): Inputs could not be loaded (config, manifest, unreadable or unparsable files)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing left to migrate.
    Success,
    /// Replacements are pending.
    Failure,
    /// Inputs could not be loaded.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
