//! Aligned text table for daily summaries

use std::io::Write;

use super::{format_decimal, format_pl, OutputError, OutputResult};
use crate::summary::{DailySummary, SummaryTotals};

const HEADERS: [&str; 7] = ["DATE", "TRADES", "GROSS P&L", "NET P&L", "WIN%", "VOLUME", "SYMBOLS"];
const COLUMN_GAP: usize = 2;

/// Render `summaries` as a left-aligned table followed by a TOTAL row
pub fn write_table<W: Write>(out: &mut W, summaries: &[DailySummary]) -> OutputResult<()> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(summaries.len() + 4);
    rows.push(HEADERS.iter().map(|h| h.to_string()).collect());
    rows.push(rule());

    for summary in summaries {
        rows.push(vec![
            summary.date.format(crate::FILE_DATE_FORMAT).to_string(),
            summary.trade_count.to_string(),
            format_pl(summary.gross_pl),
            format_pl(summary.net_pl),
            format!("{}%", format_decimal(summary.win_rate(), 0)),
            summary.volume.to_string(),
            symbols_cell(summary),
        ]);
    }

    let totals = SummaryTotals::from_days(summaries);
    rows.push(rule());
    rows.push(vec![
        "TOTAL".to_string(),
        totals.trade_count.to_string(),
        format_pl(totals.gross_pl),
        format_pl(totals.net_pl),
        format!("{}%", format_decimal(totals.win_rate(), 0)),
        totals.volume.to_string(),
        format!("{} days", totals.days),
    ]);

    let mut widths = [0usize; HEADERS.len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in &rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                line.extend(std::iter::repeat(' ').take(pad));
            }
        }
        writeln!(out, "{}", line.trim_end())
            .map_err(|e| OutputError::IoError(format!("Failed to write table: {}", e)))?;
    }

    out.flush()
        .map_err(|e| OutputError::IoError(format!("Failed to flush: {}", e)))
}

fn rule() -> Vec<String> {
    HEADERS
        .iter()
        .map(|h| "─".repeat(h.chars().count().min(9)))
        .collect()
}

/// `SNGX(L)+$120.00 MULN(S)-$5.00`
fn symbols_cell(summary: &DailySummary) -> String {
    summary
        .symbols
        .iter()
        .map(|s| format!("{}({}){}", s.symbol, s.side, format_pl(s.gross_pl)))
        .collect::<Vec<_>>()
        .join(" ")
}
