//! CLI error types and conversions

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::fetcher::FetcherError;
use crate::output::OutputError;
use crate::summary::SummaryError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Export error
    #[error("export failed: {0}")]
    ExportError(#[from] ExportError),

    /// Summary error
    #[error("summary failed: {0}")]
    SummaryError(#[from] SummaryError),

    /// Fetcher error
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Output error
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),
}
