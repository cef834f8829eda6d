//! Request spacing for the journal API
//!
//! The remote service wants serialized traffic with a minimum gap between
//! requests. The limiter measures from the *issue* time of the previous request,
//! not its completion, and blocks the calling thread until the gap has passed.

use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

/// Minimum-spacing rate limiter.
///
/// The last issue time is owned by the limiter value, so two transports (or two
/// tests) never share pacing state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_spacing: Duration,
    last_issued: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter enforcing `min_spacing` between issue times
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_issued: None,
        }
    }

    /// Configured spacing
    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Time still to wait before the next request may be issued
    pub fn remaining(&self) -> Duration {
        match self.last_issued {
            Some(last) => self.min_spacing.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Block until the next request may go out, then record its issue time.
    ///
    /// Returns how long the call slept.
    pub fn wait_turn(&mut self) -> Duration {
        let wait = self.remaining();
        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "Spacing request");
            thread::sleep(wait);
        }
        self.last_issued = Some(Instant::now());
        wait
    }
}
