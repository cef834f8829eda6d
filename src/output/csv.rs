//! CSV output for daily summaries

use csv::Writer;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use super::{format_decimal, OutputError, OutputResult};
use crate::summary::DailySummary;

/// CSV record for one summarized day
#[derive(Debug, Serialize)]
struct SummaryRecord {
    date: String,
    trades: usize,
    gross_pl: String,
    net_pl: String,
    commission: String,
    fees: String,
    win_rate: String,
    winners: usize,
    losers: usize,
    volume: i64,
    symbols: String,
}

impl From<&DailySummary> for SummaryRecord {
    fn from(summary: &DailySummary) -> Self {
        Self {
            date: summary.date.format(crate::FILE_DATE_FORMAT).to_string(),
            trades: summary.trade_count,
            gross_pl: format_decimal(summary.gross_pl, 2),
            net_pl: format_decimal(summary.net_pl, 2),
            commission: format_decimal(summary.commission, 2),
            fees: format_decimal(summary.fees, 2),
            win_rate: format_decimal(summary.win_rate(), 1),
            winners: summary.winners,
            losers: summary.losers,
            volume: summary.volume,
            symbols: symbols_field(summary),
        }
    }
}

/// `SNGX(L) MULN(S) AAPL(L/S)`
fn symbols_field(summary: &DailySummary) -> String {
    summary
        .symbols
        .iter()
        .map(|s| format!("{}({})", s.symbol, s.side))
        .collect::<Vec<_>>()
        .join(" ")
}

/// CSV writer for daily summaries
pub struct CsvSummaryWriter<W: Write> {
    writer: Writer<W>,
    rows_written: u64,
}

impl<W: Write> CsvSummaryWriter<W> {
    /// Wrap any writer; the header is emitted with the first row
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
            rows_written: 0,
        }
    }

    /// Number of rows written so far
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Write one day
    pub fn write_summary(&mut self, summary: &DailySummary) -> OutputResult<()> {
        self.writer
            .serialize(SummaryRecord::from(summary))
            .map_err(|e| OutputError::CsvError(format!("Failed to write row: {}", e)))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write every day then flush
    pub fn write_all(mut self, summaries: &[DailySummary]) -> OutputResult<()> {
        if summaries.is_empty() {
            self.write_header()?;
        }
        for summary in summaries {
            self.write_summary(summary)?;
        }
        self.close()
    }

    /// Flush buffered rows to the inner writer
    pub fn close(mut self) -> OutputResult<()> {
        self.writer
            .flush()
            .map_err(|e| OutputError::IoError(format!("Failed to flush: {}", e)))?;
        debug!(rows = self.rows_written, "CSV summary written");
        Ok(())
    }

    fn write_header(&mut self) -> OutputResult<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| OutputError::CsvError(format!("Failed to write header: {}", e)))
    }
}

/// Column names, in order
pub const HEADER: [&str; 11] = [
    "date",
    "trades",
    "gross_pl",
    "net_pl",
    "commission",
    "fees",
    "win_rate",
    "winners",
    "losers",
    "volume",
    "symbols",
];
