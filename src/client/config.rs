//! Client tuning knobs.

use std::time::Duration;

/// Server endpoint used when none is given.
pub const DEFAULT_URL: &str = "ws://localhost:3001/ws";

/// Delay between readiness checks while a send waits for the connection.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(200);

/// Readiness checks a send makes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Configuration for a [`Client`](super::Client).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use isegame_client::client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_retry_interval(Duration::from_millis(50))
///     .with_max_attempts(4);
/// assert_eq!(config.max_attempts, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Delay between readiness checks in `send`.
    pub retry_interval: Duration,
    /// Readiness checks before `send` fails with `SendTimeout`.
    /// Zero makes a send on a connection that is not open fail at once.
    pub max_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}
