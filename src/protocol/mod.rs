//! Wire protocol shared with the game server.

mod messages;

pub use messages::*;
