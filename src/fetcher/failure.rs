//! Failed-attempt classification and the messages logged for it.
//!
//! A failed request is classified once. The [`FailureKind`] decides whether
//! the transport tries again, which [`FetcherError`] the caller sees, and what
//! advice ends up in the log.

use reqwest::{Error as ReqwestError, StatusCode};
use std::fmt;
use std::time::Duration;

use super::FetcherError;

/// What went wrong with one request attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response within the request timeout
    Timeout,
    /// Could not connect at all
    Offline,
    /// Any other transport-level failure
    Network,
    /// 5xx
    Server(u16),
    /// 400
    BadRequest,
    /// 401 or 403
    Auth(u16),
    /// 429; requests are already paced, so another attempt would not help
    TooManyRequests,
    /// Any other non-success status
    Status(u16),
}

impl FailureKind {
    /// Classify a response status
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest,
            code @ (401 | 403) => Self::Auth(code),
            429 => Self::TooManyRequests,
            code if status.is_server_error() => Self::Server(code),
            code => Self::Status(code),
        }
    }

    /// Classify a failure that produced no response
    pub fn from_transport(err: &ReqwestError) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Offline
        } else {
            Self::Network
        }
    }

    /// Server faults and transport failures get another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Offline | Self::Network | Self::Server(_)
        )
    }

    /// What to tell the user once the request has failed for good
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Timeout | Self::Offline | Self::Network => {
                "Check the network connection; the export resumes from the last saved day"
            }
            Self::Server(_) => "Tradervue is having trouble; run the export again later",
            Self::BadRequest => "Check the --from/--to dates",
            Self::Auth(_) => {
                "Verify TRADERVUE_USERNAME/TRADERVUE_PASSWORD or the --username/--password flags"
            }
            Self::TooManyRequests => "Wait a few minutes before running the export again",
            Self::Status(_) => "Check the API base URL and the Tradervue API documentation",
        }
    }

    /// Error reported for a non-success response of this kind
    pub fn into_error(self, body: String) -> FetcherError {
        match self {
            Self::Auth(status) => FetcherError::Auth { status },
            Self::BadRequest => FetcherError::Validation(body),
            Self::Server(status) => FetcherError::Server { status, body },
            Self::TooManyRequests => FetcherError::UnexpectedStatus { status: 429, body },
            Self::Status(status) => FetcherError::UnexpectedStatus { status, body },
            Self::Timeout | Self::Offline | Self::Network => FetcherError::Network(body),
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Offline => f.write_str("connection refused"),
            Self::Network => f.write_str("network error"),
            Self::BadRequest => f.write_str("HTTP 400"),
            Self::TooManyRequests => f.write_str("HTTP 429"),
            Self::Server(code) | Self::Auth(code) | Self::Status(code) => {
                match StatusCode::from_u16(*code).ok().and_then(|s| s.canonical_reason()) {
                    Some(reason) => write!(f, "HTTP {code} {reason}"),
                    None => write!(f, "HTTP {code}"),
                }
            }
        }
    }
}

/// One failed (or finally successful) attempt, as logged by the transport
#[derive(Debug, Clone)]
pub struct AttemptReport<'a> {
    /// Endpoint path below the API root
    pub endpoint: &'a str,
    /// 1-based attempt number
    pub attempt: u32,
    /// Attempt budget
    pub max_attempts: u32,
    /// Failure classification
    pub kind: FailureKind,
    /// Wait before the next attempt
    pub wait: Duration,
}

impl<'a> AttemptReport<'a> {
    /// Report for attempt `attempt` of `max_attempts` against `endpoint`
    pub fn new(endpoint: &'a str, attempt: u32, max_attempts: u32, kind: FailureKind) -> Self {
        Self {
            endpoint,
            attempt,
            max_attempts,
            kind,
            wait: Duration::ZERO,
        }
    }

    /// Set the wait before the next attempt
    pub fn waiting(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// `GET /trades failed (attempt 1/3, HTTP 503 Service Unavailable); retrying in 2.0s`
    pub fn retry_line(&self) -> String {
        format!(
            "GET {} failed (attempt {}/{}, {}); retrying in {:.1}s",
            self.endpoint,
            self.attempt,
            self.max_attempts,
            self.kind,
            self.wait.as_secs_f64()
        )
    }

    /// Logged when an attempt after the first goes through
    pub fn recovered_line(&self) -> String {
        format!(
            "GET {} succeeded on attempt {}/{}",
            self.endpoint, self.attempt, self.max_attempts
        )
    }

    /// Multi-line summary for a request that will not be tried again
    pub fn gave_up_lines(&self, error: &FetcherError) -> String {
        format!(
            "GET {} gave up after attempt {}/{} ({})\n  Error: {}\n  Hint: {}",
            self.endpoint,
            self.attempt,
            self.max_attempts,
            self.kind,
            error,
            self.kind.advice()
        )
    }
}

/// Classify a failed attempt from its status or its transport error
pub fn classify(status: Option<StatusCode>, err: Option<&ReqwestError>) -> FailureKind {
    match (status, err) {
        (Some(status), _) => FailureKind::from_status(status),
        (None, Some(err)) => FailureKind::from_transport(err),
        (None, None) => FailureKind::Network,
    }
}
