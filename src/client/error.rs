//! Client error types.

use std::time::Duration;

/// Errors surfaced by [`Client`](super::Client) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The connection never reached the open state.
    #[error("failed to connect to {address}: {reason}")]
    ConnectionFailed { address: String, reason: String },

    /// `send` gave up waiting for the connection to open. Nothing was sent.
    #[error("connection not open after {attempts} attempts {interval:?} apart")]
    SendTimeout { attempts: u32, interval: Duration },

    /// The socket writer has shut down.
    #[error("connection closed")]
    ConnectionClosed,

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
