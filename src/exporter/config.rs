//! Export configuration constants and transport tunables

use std::time::Duration;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://app.tradervue.com/api/v1";

/// Page size sent as `count` on listing requests.
/// The listing endpoints cap pages at 100 records.
pub const PAGE_SIZE: usize = 100;

/// Minimum spacing between the issue times of two consecutive requests.
pub const MIN_REQUEST_SPACING_MS: u64 = 200;

/// Total attempts per request, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base of the exponential backoff between attempts.
/// Attempt index `i > 0` waits `base * 2^i` (2s, then 4s).
pub const BACKOFF_BASE_MS: u64 = 1000;

/// Maximum backoff delay, regardless of attempt count.
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Per-request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Hard ceiling on pages requested by one pagination or discovery scan.
/// The short-page heuristic is what normally ends a scan; this only stops a
/// source that keeps returning full pages forever.
pub const MAX_PAGES: u32 = 10_000;

/// Calculate the wait before attempt `attempt` (0-based) for the given base
pub fn calculate_backoff(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
        .min(Duration::from_millis(MAX_BACKOFF_MS))
}

/// Connection and pacing settings for the HTTP transport
#[derive(Clone)]
pub struct TransportConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Minimum spacing between request issue times
    pub min_spacing: Duration,
    /// Total attempts per request
    pub max_attempts: u32,
    /// Backoff base
    pub backoff_base: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl TransportConfig {
    /// Production settings for the given credentials
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password: password.into(),
            user_agent: user_agent.into(),
            min_spacing: Duration::from_millis(MIN_REQUEST_SPACING_MS),
            max_attempts: MAX_ATTEMPTS,
            backoff_base: Duration::from_millis(BACKOFF_BASE_MS),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Point the transport at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the request spacing
    pub fn with_min_spacing(mut self, spacing: Duration) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Override the retry budget and backoff base
    pub fn with_retry(mut self, max_attempts: u32, backoff_base: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_base = backoff_base;
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("min_spacing", &self.min_spacing)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base", &self.backoff_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
