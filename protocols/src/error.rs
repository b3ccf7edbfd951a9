use thiserror::Error;

/// Error replies NX-OS prints in place of command output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("device rejected the command: {0}")]
    InvalidCommand(String),
    #[error("device could not parse the command: {0}")]
    Syntax(String),
    #[error("not authorized to run the command: {0}")]
    PermissionDenied(String),
    #[error("port-profile feature is not available: {0}")]
    FeatureDisabled(String),
}

/// Fails when `output` is an error reply rather than command output.
pub fn check_cli_error(output: &str) -> Result<(), CliError> {
    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_ascii_lowercase();
        let message = line.to_string();

        if lower.starts_with("% invalid command") || lower.starts_with("invalid command") {
            return Err(CliError::InvalidCommand(message));
        }
        if lower.starts_with("syntax error while parsing")
            || lower.starts_with("% syntax error while parsing")
        {
            return Err(CliError::Syntax(message));
        }
        if lower.starts_with("% permission denied") || lower.starts_with("% authorization failed")
        {
            return Err(CliError::PermissionDenied(message));
        }
        if lower.starts_with('%') && lower.contains("feature") && lower.contains("not enabled") {
            return Err(CliError::FeatureDisabled(message));
        }
    }
    Ok(())
}
