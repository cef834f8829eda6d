//! Command-line surface and the `export` command

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{parse_date_arg, CliError, SummaryArgs};
use crate::config::{ExportConfig, DATA_DIR_ENV, DEFAULT_DATA_DIR, PASSWORD_ENV, USERNAME_ENV};
use crate::exporter::{ExportOptions, ExportOrchestrator};
use crate::fetcher::journal_api::JournalApi;

/// Trade Journal Exporter CLI
#[derive(Parser, Debug)]
#[command(name = "trade-journal-exporter")]
#[command(about = "Export a Tradervue journal incrementally and summarize it by day", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding day archives and the progress cursor
    #[arg(short = 'd', long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export trades from the journal API
    Export(ExportArgs),

    /// Show daily trade summaries from exported data
    Summary(SummaryArgs),

    /// Print version
    Version,
}

/// Arguments for the `export` command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Journal username
    #[arg(short = 'u', long, env = USERNAME_ENV, hide_env_values = true)]
    pub username: Option<String>,

    /// Journal password
    #[arg(short = 'p', long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// First day to export (YYYY-MM-DD); overrides the progress cursor
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last day to export (YYYY-MM-DD); defaults to today in New York
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Fetch individual executions per trade (one extra request per trade)
    #[arg(long, default_value_t = false)]
    pub with_executions: bool,

    /// Re-export days that were already exported
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

impl ExportArgs {
    /// Options for the orchestrator
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            from: self.from,
            to: self.to,
            with_executions: self.with_executions,
            overwrite: self.force,
        }
    }

    /// Run the export against the live API
    pub fn execute(&self, data_dir: &Path) -> Result<(), CliError> {
        let options = self.options();
        let config = ExportConfig::new(self.username.clone(), self.password.clone(), data_dir)?;
        info!(
            username = config.username(),
            data_dir = %config.data_dir().display(),
            "Starting export"
        );

        let api = JournalApi::new(config.transport_config())?;
        let mut orchestrator = ExportOrchestrator::new(api, config.data_dir());
        let outcome = orchestrator.run(&options)?;

        println!("{outcome}");
        Ok(())
    }
}
