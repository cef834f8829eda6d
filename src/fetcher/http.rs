//! Rate-limited, retrying HTTP transport for the journal API
//!
//! Provides a single blocking client for every endpoint with:
//! - HTTP Basic authentication and a fixed `User-Agent`
//! - Minimum spacing between request issue times
//! - Retry with exponential backoff for server faults and network failures
//! - Generic JSON deserialization of the response body

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::thread;
use tracing::{debug, error, info, warn};

use super::failure::{classify, AttemptReport, FailureKind};
use super::{FetcherError, FetcherResult};
use crate::exporter::config::{calculate_backoff, TransportConfig};
use crate::exporter::rate_limit::RateLimiter;

/// Longest response body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Blocking HTTP transport shared by all journal endpoints
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
    rate_limiter: RateLimiter,
}

impl HttpTransport {
    /// Create a transport from its configuration
    ///
    /// # Errors
    /// Returns [`FetcherError::Network`] if the TLS backend cannot be initialized
    pub fn new(config: TransportConfig) -> FetcherResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetcherError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.min_spacing),
            config,
        })
    }

    /// Transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Execute a GET request and deserialize the JSON body
    ///
    /// # Arguments
    /// * `endpoint` - Path below the base URL (e.g., "/trades")
    /// * `params` - Query parameters as key-value pairs
    ///
    /// # Errors
    /// Auth, validation, unexpected-status and parse failures return at once;
    /// server and network failures are retried and end in
    /// [`FetcherError::RetriesExhausted`] once the attempt budget is spent.
    pub fn get<T>(&mut self, endpoint: &str, params: &[(&str, String)]) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;
        let mut last_kind = FailureKind::Network;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                thread::sleep(calculate_backoff(self.config.backoff_base, attempt));
            }

            self.rate_limiter.wait_turn();
            debug!(
                endpoint,
                params = params.len(),
                attempt = attempt + 1,
                "GET {}",
                url
            );

            let (kind, error) = match self.send_once(&url, params) {
                Ok(body) => {
                    if attempt > 0 {
                        let report =
                            AttemptReport::new(endpoint, attempt + 1, max_attempts, last_kind);
                        info!("{}", report.recovered_line());
                    }
                    return serde_json::from_str(&body).map_err(|e| {
                        FetcherError::Parse(format!(
                            "failed to deserialize response from {endpoint}: {e}"
                        ))
                    });
                }
                Err(failure) => failure,
            };

            let report = AttemptReport::new(endpoint, attempt + 1, max_attempts, kind)
                .waiting(calculate_backoff(self.config.backoff_base, attempt + 1));

            if !kind.is_retryable() {
                error!("{}", report.gave_up_lines(&error));
                return Err(error);
            }

            if attempt + 1 < max_attempts {
                warn!("{}", report.retry_line());
            } else {
                error!("{}", report.gave_up_lines(&error));
            }
            last_kind = kind;
            last_error = Some(error);
        }

        Err(FetcherError::RetriesExhausted {
            attempts: max_attempts,
            last: Box::new(last_error.unwrap_or_else(|| {
                FetcherError::Network("no request attempt was made".to_string())
            })),
        })
    }

    /// Issue one request; classify any failure
    fn send_once(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<String, (FailureKind, FetcherError)> {
        let response = self
            .client
            .get(url)
            .query(params)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                (
                    classify(None, Some(&e)),
                    FetcherError::Network(format!("request failed: {e}")),
                )
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            (
                classify(None, Some(&e)),
                FetcherError::Network(format!("reading response: {e}")),
            )
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let kind = classify(Some(status), None);
        Err((kind, kind.into_error(truncate_body(&body))))
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
