//! # isegame-client
//!
//! Client for the isegame multiplayer quiz. The core is [`Client`], a typed
//! publish/subscribe handle on a WebSocket connection to the game server;
//! [`run`] drives a terminal UI on top of it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use isegame_client::client::{Client, ClientError};
//! use isegame_client::protocol::{InboundMessage, InboundTag, OutboundMessage};
//!
//! # async fn example() -> Result<(), ClientError> {
//! let client = Client::connect("ws://localhost:3001/ws").await?;
//!
//! client.subscribe(InboundTag::Timer, |msg| {
//!     if let InboundMessage::Timer { time } = msg {
//!         println!("{time} seconds left");
//!     }
//! });
//!
//! client
//!     .send(OutboundMessage::Join {
//!         name: "Ann".to_string(),
//!         piece: 2,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod protocol;
pub mod terminal;
mod tui;

pub use client::{Client, ClientConfig, ClientError, ConnectionState};
pub use tui::run;
