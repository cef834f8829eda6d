//! `summary` command: daily P&L from exported archives

use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{check_window, parse_date_arg, CliError};
use crate::output::csv::CsvSummaryWriter;
use crate::output::table::write_table;
use crate::output::OutputError;
use crate::summary::{DailySummary, SummaryGenerator};

/// Message printed when there is nothing to summarize
pub const NO_DATA_MESSAGE: &str = "No exported data found. Run 'export' first.";

/// Arguments for the `summary` command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Output as CSV instead of a table
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Write to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl SummaryArgs {
    /// Build and render the summary for `data_dir`
    pub fn execute(&self, data_dir: &Path) -> Result<(), CliError> {
        check_window(self.from, self.to)?;

        let generator = SummaryGenerator::new(data_dir);
        let summaries = generator.generate(self.from, self.to)?;

        if summaries.is_empty() {
            println!("{NO_DATA_MESSAGE}");
            return Ok(());
        }

        match &self.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    OutputError::IoError(format!("Failed to create {}: {e}", path.display()))
                })?;
                self.render(BufWriter::new(file), &summaries)?;
                info!(path = %path.display(), days = summaries.len(), "Summary written");
            }
            None => self.render(io::stdout().lock(), &summaries)?,
        }
        Ok(())
    }

    fn render<W: Write>(&self, mut out: W, summaries: &[DailySummary]) -> Result<(), CliError> {
        if self.csv {
            CsvSummaryWriter::new(out).write_all(summaries)?;
        } else {
            write_table(&mut out, summaries)?;
        }
        Ok(())
    }
}
