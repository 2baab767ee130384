//! Subscriber registry: inbound tag to ordered handler list.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::error;

use crate::protocol::{InboundMessage, InboundTag};

/// A subscriber callback. Receives the full decoded message for its tag.
pub type Handler = Arc<dyn Fn(&InboundMessage) + Send + Sync>;

/// Handlers keyed by tag, kept in registration order.
///
/// Subscriptions are permanent for the lifetime of the registry.
#[derive(Default)]
pub struct Registry {
    handlers: Mutex<HashMap<InboundTag, Vec<Handler>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the slot for `tag`.
    pub fn subscribe(&self, tag: InboundTag, handler: Handler) {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        handlers.entry(tag).or_default().push(handler);
    }

    /// Number of handlers registered for `tag`.
    pub fn len(&self, tag: InboundTag) -> usize {
        let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        handlers.get(&tag).map_or(0, Vec::len)
    }

    /// Invoke every handler for the message's tag, in registration order.
    ///
    /// Returns how many handlers ran. The lock is released before any handler
    /// runs, so handlers may subscribe further handlers; those only see later
    /// messages. A panicking handler is logged and skipped; the rest still run.
    pub fn dispatch(&self, msg: &InboundMessage) -> usize {
        let snapshot: Vec<Handler> = {
            let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
            match handlers.get(&msg.tag()) {
                Some(list) => list.clone(),
                None => return 0,
            }
        };

        for handler in &snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(msg))).is_err() {
                error!(tag = %msg.tag(), "subscriber panicked");
            }
        }
        snapshot.len()
    }
}
