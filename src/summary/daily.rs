//! Per-day and whole-range P&L statistics

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{SideMix, Trade};

/// One symbol's activity within a day
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSummary {
    /// Ticker symbol
    pub symbol: String,
    /// Directions traded
    pub side: SideMix,
    /// Gross P&L across the symbol's trades
    pub gross_pl: Decimal,
    /// Total volume
    pub volume: i64,
    /// Number of trades
    pub count: usize,
}

/// Statistics for one archived day
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// Calendar day
    pub date: NaiveDate,
    /// Number of trades
    pub trade_count: usize,
    /// Symbols in first-seen order
    pub symbols: Vec<SymbolSummary>,
    /// Sum of gross P&L
    pub gross_pl: Decimal,
    /// Gross P&L minus commission and fees
    pub net_pl: Decimal,
    /// Sum of commissions
    pub commission: Decimal,
    /// Sum of fees
    pub fees: Decimal,
    /// Sum of volume
    pub volume: i64,
    /// Trades with positive gross P&L
    pub winners: usize,
    /// Trades with zero or negative gross P&L
    pub losers: usize,
}

impl DailySummary {
    /// Build the statistics for one day's trades
    pub fn from_trades(date: NaiveDate, trades: &[Trade]) -> Self {
        let mut summary = Self {
            date,
            trade_count: trades.len(),
            symbols: Vec::new(),
            gross_pl: Decimal::ZERO,
            net_pl: Decimal::ZERO,
            commission: Decimal::ZERO,
            fees: Decimal::ZERO,
            volume: 0,
            winners: 0,
            losers: 0,
        };

        for trade in trades {
            summary.gross_pl += trade.gross_pl;
            summary.commission += trade.commission;
            summary.fees += trade.fees;
            summary.volume += trade.volume;

            if trade.gross_pl > Decimal::ZERO {
                summary.winners += 1;
            } else {
                summary.losers += 1;
            }

            match summary
                .symbols
                .iter_mut()
                .find(|entry| entry.symbol == trade.symbol)
            {
                Some(entry) => {
                    entry.side = entry.side.merge(trade.side);
                    entry.gross_pl += trade.gross_pl;
                    entry.volume += trade.volume;
                    entry.count += 1;
                }
                None => summary.symbols.push(SymbolSummary {
                    symbol: trade.symbol.clone(),
                    side: trade.side.into(),
                    gross_pl: trade.gross_pl,
                    volume: trade.volume,
                    count: 1,
                }),
            }
        }

        summary.net_pl = summary.gross_pl - summary.commission - summary.fees;
        summary
    }

    /// Winning percentage, 0 when the day has no trades
    pub fn win_rate(&self) -> Decimal {
        win_rate(self.winners, self.losers)
    }
}

/// Totals across a range of days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTotals {
    /// Number of days
    pub days: usize,
    /// Number of trades
    pub trade_count: usize,
    /// Sum of gross P&L
    pub gross_pl: Decimal,
    /// Sum of net P&L
    pub net_pl: Decimal,
    /// Sum of commissions
    pub commission: Decimal,
    /// Sum of fees
    pub fees: Decimal,
    /// Sum of volume
    pub volume: i64,
    /// Winning trades
    pub winners: usize,
    /// Losing trades
    pub losers: usize,
}

impl SummaryTotals {
    /// Sum a set of daily summaries
    pub fn from_days(days: &[DailySummary]) -> Self {
        days.iter().fold(
            Self {
                days: days.len(),
                ..Self::default()
            },
            |mut totals, day| {
                totals.trade_count += day.trade_count;
                totals.gross_pl += day.gross_pl;
                totals.net_pl += day.net_pl;
                totals.commission += day.commission;
                totals.fees += day.fees;
                totals.volume += day.volume;
                totals.winners += day.winners;
                totals.losers += day.losers;
                totals
            },
        )
    }

    /// Winning percentage across all days
    pub fn win_rate(&self) -> Decimal {
        win_rate(self.winners, self.losers)
    }
}

fn win_rate(winners: usize, losers: usize) -> Decimal {
    let total = winners + losers;
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(winners as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64)
}
