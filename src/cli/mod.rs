//! CLI command implementations

pub mod error;
pub mod export;
pub mod summary;

pub use error::CliError;
pub use export::{Cli, Commands, ExportArgs};
pub use summary::SummaryArgs;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` command-line date
pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    crate::parse_file_date(input).map_err(|e| format!("invalid date '{input}' (use YYYY-MM-DD): {e}"))
}

/// Reject a window whose start is after its end
pub(crate) fn check_window(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<(), CliError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(CliError::InvalidArgument(format!(
            "--from {from} is after --to {to}"
        ))),
        _ => Ok(()),
    }
}
