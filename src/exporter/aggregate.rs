//! Day bucketing and execution enrichment
//!
//! Trades are keyed by the New York calendar day of their start time. A trade
//! whose timestamp cannot be parsed is logged and left out; one bad record
//! must not stop an incremental export.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::fetcher::JournalSource;
use crate::{Execution, SideMix, Trade, TradeId};

/// Trades of one calendar day, optionally with their executions
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// Calendar day in the reference timezone
    pub date: NaiveDate,
    /// Trades in fetched order
    pub trades: Vec<Trade>,
    /// Executions by trade id; `None` when not requested or enrichment failed
    pub executions: Option<BTreeMap<TradeId, Vec<Execution>>>,
}

impl DayBucket {
    /// Compact per-symbol direction digest, e.g. `SNGX(L) MULN(S) AAPL(L/S)`.
    ///
    /// Symbols appear in first-seen order.
    pub fn digest(&self) -> String {
        symbol_digest(&self.trades)
    }
}

/// Group trades into ascending day buckets
pub fn group_by_day(trades: Vec<Trade>) -> Vec<DayBucket> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Trade>> = BTreeMap::new();

    for trade in trades {
        match trade.session_date() {
            Ok(date) => by_date.entry(date).or_default().push(trade),
            Err(e) => warn!(
                trade_id = trade.id,
                "Skipping trade with unparseable date: {}", e
            ),
        }
    }

    by_date
        .into_iter()
        .map(|(date, trades)| DayBucket {
            date,
            trades,
            executions: None,
        })
        .collect()
}

/// Fetch executions for every trade of every bucket.
///
/// The first failure inside a bucket stops enrichment for that bucket, which
/// is then archived without executions. Returns how many buckets degraded.
pub fn enrich_with_executions<S>(source: &mut S, buckets: &mut [DayBucket]) -> usize
where
    S: JournalSource + ?Sized,
{
    let mut degraded = 0;

    for bucket in buckets.iter_mut() {
        match fetch_bucket_executions(source, &bucket.trades) {
            Ok(executions) => {
                debug!(
                    date = %bucket.date,
                    trades_with_executions = executions.len(),
                    "Fetched executions"
                );
                bucket.executions = Some(executions);
            }
            Err((trade_id, e)) => {
                warn!(
                    date = %bucket.date,
                    trade_id,
                    "Failed to fetch executions, archiving day without them: {}", e
                );
                bucket.executions = None;
                degraded += 1;
            }
        }
    }

    degraded
}

fn fetch_bucket_executions<S>(
    source: &mut S,
    trades: &[Trade],
) -> Result<BTreeMap<TradeId, Vec<Execution>>, (TradeId, crate::fetcher::FetcherError)>
where
    S: JournalSource + ?Sized,
{
    let mut executions = BTreeMap::new();
    for trade in trades {
        let fills = source
            .list_executions(trade.id)
            .map_err(|e| (trade.id, e))?;
        if !fills.is_empty() {
            executions.insert(trade.id, fills);
        }
    }
    Ok(executions)
}

/// Per-symbol direction digest in first-seen order
pub fn symbol_digest(trades: &[Trade]) -> String {
    let mut order: Vec<(&str, SideMix)> = Vec::new();

    for trade in trades {
        match order.iter_mut().find(|(symbol, _)| *symbol == trade.symbol) {
            Some((_, mix)) => *mix = mix.merge(trade.side),
            None => order.push((trade.symbol.as_str(), trade.side.into())),
        }
    }

    order
        .iter()
        .map(|(symbol, mix)| format!("{symbol}({mix})"))
        .collect::<Vec<_>>()
        .join(" ")
}
