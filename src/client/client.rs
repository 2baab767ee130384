//! WebSocket connection client.

use std::fmt;
use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::protocol::{InboundMessage, InboundTag, OutboundMessage};

use super::config::ClientConfig;
use super::error::ClientError;
use super::registry::Registry;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Lifecycle of the underlying connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Frames flow both ways.
    Open,
    /// The server closed the connection.
    Closed,
    /// The transport failed. Terminal.
    Error(String),
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// State shared with the background connection task.
struct Shared {
    registry: Registry,
    state: watch::Sender<ConnectionState>,
}

impl Shared {
    fn set_state(&self, state: ConnectionState) {
        self.state.send_replace(state);
    }

    /// Decode one text frame and hand it to the subscribers of its tag.
    ///
    /// Malformed frames are logged and dropped; the loop keeps going.
    fn dispatch_frame(&self, text: &str) {
        let msg = match InboundMessage::from_json(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, frame = text, "dropping malformed frame");
                return;
            }
        };

        let tag = msg.tag();
        match self.registry.dispatch(&msg) {
            0 => trace!(%tag, "no subscribers, message dropped"),
            handled => trace!(%tag, handled, "message dispatched"),
        }
    }
}

struct Inner {
    address: String,
    config: ClientConfig,
    shared: Arc<Shared>,
    outbound: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Handle to the game server connection.
///
/// Cheap to clone; every clone talks to the same connection and registry.
/// The connection is torn down when the last clone is dropped.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl Client {
    /// Connect with the default configuration and wait until the connection
    /// is open.
    pub async fn connect(address: impl Into<String>) -> Result<Self, ClientError> {
        Self::connect_with(address, ClientConfig::default()).await
    }

    /// Connect and wait until the connection is open.
    ///
    /// There is no built-in timeout; wrap the call in
    /// [`tokio::time::timeout`] to impose one.
    pub async fn connect_with(
        address: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let client = Self::spawn(address, config);
        client.ready().await?;
        Ok(client)
    }

    /// Start connecting in the background and return at once.
    ///
    /// The client starts out [`ConnectionState::Connecting`]. Subscriptions and
    /// sends are accepted right away. Must be called inside a tokio runtime.
    pub fn spawn(address: impl Into<String>, config: ClientConfig) -> Self {
        let address = address.into();
        let (state, _) = watch::channel(ConnectionState::Connecting);
        let shared = Arc::new(Shared {
            registry: Registry::new(),
            state,
        });
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_connection(
            address.clone(),
            Arc::clone(&shared),
            outbound_rx,
        ));

        Self {
            inner: Arc::new(Inner {
                address,
                config,
                shared,
                outbound,
                task,
            }),
        }
    }

    /// Wait for the connection to leave the connecting state.
    ///
    /// Fails with [`ClientError::ConnectionFailed`] unless it ends up open.
    pub async fn ready(&self) -> Result<(), ClientError> {
        let mut state_rx = self.inner.shared.state.subscribe();
        let state = state_rx
            .wait_for(|state| *state != ConnectionState::Connecting)
            .await
            .map_err(|_| self.connection_failed("connection task ended"))?
            .clone();

        match state {
            ConnectionState::Open => Ok(()),
            ConnectionState::Error(reason) => Err(self.connection_failed(reason)),
            ConnectionState::Closed | ConnectionState::Connecting => {
                Err(self.connection_failed("closed before becoming ready"))
            }
        }
    }

    /// Register a handler for every inbound message tagged `tag`.
    ///
    /// Handlers for the same tag run in registration order on the
    /// connection's reader task, so they must not block.
    pub fn subscribe<F>(&self, tag: InboundTag, handler: F)
    where
        F: Fn(&InboundMessage) + Send + Sync + 'static,
    {
        self.inner.shared.registry.subscribe(tag, Arc::new(handler));
    }

    /// Send a message, waiting for the connection to open if needed.
    ///
    /// While the connection is not open, its state is checked every
    /// `retry_interval` up to `max_attempts` times. Returns once the frame is
    /// handed to the socket writer.
    pub async fn send(&self, msg: OutboundMessage) -> Result<(), ClientError> {
        if !self.is_open() {
            self.wait_for_open().await?;
        }
        self.transmit(&msg)
    }

    /// Send in the background. Failures are logged and otherwise ignored.
    pub fn post(&self, msg: OutboundMessage) {
        let client = self.clone();
        tokio::spawn(async move {
            let action = msg.action();
            if let Err(e) = client.send(msg).await {
                warn!(action, error = %e, "outbound message dropped");
            }
        });
    }

    /// Number of handlers registered for `tag`.
    pub fn subscribers(&self, tag: InboundTag) -> usize {
        self.inner.shared.registry.len(tag)
    }

    /// Snapshot of the connection state.
    pub fn state(&self) -> ConnectionState {
        self.inner.shared.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.shared.state.borrow().is_open()
    }

    pub fn address(&self) -> &str {
        &self.inner.address
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    async fn wait_for_open(&self) -> Result<(), ClientError> {
        let ClientConfig {
            retry_interval,
            max_attempts,
        } = self.inner.config;

        for attempt in 1..=max_attempts {
            tokio::time::sleep(retry_interval).await;
            if self.is_open() {
                debug!(attempt, "connection open after waiting");
                return Ok(());
            }
            trace!(attempt, max_attempts, "connection not open yet");
        }

        Err(ClientError::SendTimeout {
            attempts: max_attempts,
            interval: retry_interval,
        })
    }

    fn transmit(&self, msg: &OutboundMessage) -> Result<(), ClientError> {
        let json = msg.to_json()?;
        self.inner
            .outbound
            .send(json)
            .map_err(|_| ClientError::ConnectionClosed)?;
        debug!(action = msg.action(), "message sent");
        Ok(())
    }

    fn connection_failed(&self, reason: impl Into<String>) -> ClientError {
        ClientError::ConnectionFailed {
            address: self.inner.address.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("address", &self.inner.address)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Connect, then read frames until the connection ends.
async fn run_connection(
    address: String,
    shared: Arc<Shared>,
    outbound: mpsc::UnboundedReceiver<String>,
) {
    debug!(%address, "connecting");
    let ws_stream = match tokio_tungstenite::connect_async(address.as_str()).await {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            warn!(%address, error = %e, "failed to connect");
            shared.set_state(ConnectionState::Error(e.to_string()));
            return;
        }
    };

    let (ws_sender, mut ws_receiver) = ws_stream.split();
    let writer = tokio::spawn(write_frames(ws_sender, outbound));
    shared.set_state(ConnectionState::Open);
    info!(%address, "connected");

    let mut final_state = ConnectionState::Closed;
    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => shared.dispatch_frame(text.as_str()),
            Ok(Message::Close(_)) => {
                info!(%address, "connection closed by server");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!(%address, error = %e, "connection error");
                final_state = ConnectionState::Error(e.to_string());
                break;
            }
        }
    }

    shared.set_state(final_state);
    writer.abort();
}

/// Forward encoded frames from the channel to the socket.
async fn write_frames(mut ws_sender: WsSink, mut outbound: mpsc::UnboundedReceiver<String>) {
    while let Some(json) = outbound.recv().await {
        if let Err(e) = ws_sender.send(Message::Text(json.into())).await {
            warn!(error = %e, "failed to write frame");
            break;
        }
    }
}
