//! WebSocket implementation of the realtime messaging channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, SplitSink, SplitStream};
use futures::{SinkExt, StreamExt, future};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, instrument, trace, warn};

use super::{MessagingError, MessagingErrorKind, RealtimeMessagingClient, StateStream};
use crate::games::tictactoe::MakeTurn;
use crate::protocol;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Outgoing = SplitSink<Socket, Message>;
type Incoming = SplitStream<Socket>;

/// How long a send or close may wait on a peer that stopped reading.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Messaging client speaking the text-frame protocol over a WebSocket.
///
/// The outbound half of the current session lives behind a mutex so that
/// sends and close are serialized. Both give up after the send timeout so a
/// stalled peer cannot hold the lock forever. The inbound half belongs to
/// whoever polls the stream returned by [`RealtimeMessagingClient::state_stream`].
#[derive(Clone)]
pub struct WebSocketMessagingClient {
    url: String,
    outgoing: Arc<Mutex<Option<Outgoing>>>,
    send_timeout: Duration,
}

impl WebSocketMessagingClient {
    /// Creates a client for the given `ws://` or `wss://` endpoint.
    ///
    /// Does not connect; see [`RealtimeMessagingClient::state_stream`].
    #[instrument(skip(url), fields(url = %url.as_ref()))]
    pub fn new(url: impl AsRef<str>) -> Self {
        debug!("Creating WebSocket messaging client");
        Self {
            url: url.as_ref().to_string(),
            outgoing: Arc::new(Mutex::new(None)),
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Sets how long `send_action` and `close` wait before failing.
    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connects and installs the new session's outbound half.
    #[instrument(skip(outgoing))]
    async fn open_session(
        url: String,
        outgoing: Arc<Mutex<Option<Outgoing>>>,
    ) -> Result<Incoming, MessagingError> {
        info!("Opening game session");
        let (socket, response) = connect_async(url.as_str()).await.map_err(|e| {
            warn!(error = %e, "Failed to connect to game server");
            MessagingError::new(MessagingErrorKind::Connect, e.to_string())
        })?;
        debug!(status = %response.status(), "WebSocket handshake complete");

        let (sink, incoming) = socket.split();
        let previous = outgoing.lock().await.replace(sink);
        if let Some(mut previous) = previous {
            debug!("Replacing previous session");
            if let Err(e) = previous.close().await {
                debug!(error = %e, "Previous session was already gone");
            }
        }

        info!("Game session open");
        Ok(incoming)
    }

    /// Turns inbound frames into snapshots, ending after a close frame or
    /// after yielding one transport error.
    fn decode_frames(incoming: Incoming) -> StateStream {
        stream::unfold(Some(incoming), |incoming| async move {
            let Some(mut incoming) = incoming else {
                return None;
            };
            loop {
                let Some(message) = incoming.next().await else {
                    return None;
                };
                match message {
                    Ok(Message::Text(text)) => match protocol::decode_state(text.as_str()) {
                        Ok(state) => {
                            trace!(?state, "Received state frame");
                            return Some((Ok(state), Some(incoming)));
                        }
                        Err(e) => debug!(error = %e, "Dropping malformed state frame"),
                    },
                    Ok(Message::Close(frame)) => {
                        info!(?frame, "Server closed the session");
                        return None;
                    }
                    Ok(_) => trace!("Ignoring non-text frame"),
                    Err(e) => {
                        warn!(error = %e, "Game session failed");
                        let err = MessagingError::new(MessagingErrorKind::Receive, e.to_string());
                        return Some((Err(err), None));
                    }
                }
            }
        })
        .boxed()
    }
}

impl std::fmt::Debug for WebSocketMessagingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketMessagingClient")
            .field("url", &self.url)
            .field("send_timeout", &self.send_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RealtimeMessagingClient for WebSocketMessagingClient {
    fn state_stream(&self) -> StateStream {
        let url = self.url.clone();
        let outgoing = Arc::clone(&self.outgoing);
        stream::once(Self::open_session(url, outgoing))
            .flat_map(|opened| match opened {
                Ok(incoming) => Self::decode_frames(incoming),
                Err(e) => stream::once(future::ready(Err(e))).boxed(),
            })
            .boxed()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn send_action(&self, turn: MakeTurn) -> Result<(), MessagingError> {
        let frame = protocol::encode_turn(&turn)?;
        let mut outgoing = self.outgoing.lock().await;
        let Some(sink) = outgoing.as_mut() else {
            debug!("No open session, dropping move");
            return Ok(());
        };
        debug!(%frame, "Sending move");
        match timeout(self.send_timeout, sink.send(Message::text(frame))).await {
            Ok(sent) => {
                sent.map_err(|e| MessagingError::new(MessagingErrorKind::Send, e.to_string()))
            }
            Err(_) => {
                warn!(timeout = ?self.send_timeout, "Send timed out");
                Err(MessagingError::new(
                    MessagingErrorKind::Send,
                    format!("Send timed out after {:?}", self.send_timeout),
                ))
            }
        }
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn close(&self) -> Result<(), MessagingError> {
        let Some(mut sink) = self.outgoing.lock().await.take() else {
            debug!("Session already closed");
            return Ok(());
        };
        info!("Closing game session");
        match timeout(self.send_timeout, sink.close()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) => {
                debug!("Server had already closed the session");
                Ok(())
            }
            Ok(Err(e)) => Err(MessagingError::new(MessagingErrorKind::Close, e.to_string())),
            Err(_) => {
                warn!(timeout = ?self.send_timeout, "Close timed out, dropping session");
                Err(MessagingError::new(
                    MessagingErrorKind::Close,
                    format!("Close timed out after {:?}", self.send_timeout),
                ))
            }
        }
    }
}
