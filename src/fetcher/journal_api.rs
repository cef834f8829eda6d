//! Tradervue v1 endpoints
//!
//! Thin typed wrappers over [`HttpTransport`]: the listing endpoints wrap
//! their payload in a single-key envelope that is stripped here.

use serde::Deserialize;
use tracing::debug;

use super::http::HttpTransport;
use super::{FetcherResult, JournalSource, TradeQuery};
use crate::exporter::config::TransportConfig;
use crate::{Execution, Trade, TradeId};

/// Trade listing endpoint
pub const TRADES_ENDPOINT: &str = "/trades";

#[derive(Debug, Deserialize)]
struct TradesResponse {
    #[serde(default)]
    trades: Vec<Trade>,
}

#[derive(Debug, Deserialize)]
struct ExecutionsResponse {
    #[serde(default)]
    executions: Vec<Execution>,
}

/// Path of the execution listing for one trade
pub fn executions_endpoint(trade_id: TradeId) -> String {
    format!("{TRADES_ENDPOINT}/{trade_id}/executions")
}

/// Journal source backed by the live API
pub struct JournalApi {
    transport: HttpTransport,
}

impl JournalApi {
    /// Build the API client and its transport
    pub fn new(config: TransportConfig) -> FetcherResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    /// Wrap an existing transport
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

impl JournalSource for JournalApi {
    fn list_trades(&mut self, query: &TradeQuery) -> FetcherResult<Vec<Trade>> {
        let response: TradesResponse = self.transport.get(TRADES_ENDPOINT, &query.to_params())?;
        debug!(
            page = query.page,
            trades = response.trades.len(),
            "Received trade page"
        );
        Ok(response.trades)
    }

    fn list_executions(&mut self, trade_id: TradeId) -> FetcherResult<Vec<Execution>> {
        let response: ExecutionsResponse =
            self.transport.get(&executions_endpoint(trade_id), &[])?;
        Ok(response.executions)
    }
}
