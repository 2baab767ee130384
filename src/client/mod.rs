//! Typed publish/subscribe client for the game server.
//!
//! One [`Client`] owns one WebSocket connection. Consumers register handlers
//! per inbound tag with [`Client::subscribe`] and send with [`Client::send`],
//! which waits a bounded time for the connection to open.

mod client;
mod config;
mod error;
mod registry;

pub use client::{Client, ConnectionState};
pub use config::{ClientConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL, DEFAULT_URL};
pub use error::ClientError;
pub use registry::Handler;
