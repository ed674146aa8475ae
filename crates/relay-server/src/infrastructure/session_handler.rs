//! Per-session protocol loop.
//!
//! One call to [`run_session`] owns one WebSocket connection from the moment
//! the upgrade handshake completes until the connection closes.  It runs the
//! `Open -> Closed` state machine of [`Session`]:
//!
//! - **Open**: wait for the next frame.  A text or binary frame is logged,
//!   passed through the relay transform, and the reply is sent on the same
//!   stream before the next frame is read.  Ping/Pong frames are answered by
//!   tungstenite itself and produce no relay reply.
//! - **Closed**: reached on a Close frame, end of stream, a read error, or a
//!   failed send.  The stream is dropped (releasing the socket) and the
//!   disconnect is logged.
//!
//! Frames of one session are handled strictly one at a time, so replies leave
//! in the order the requests arrived.  Nothing here is shared with other
//! sessions; an error only ever closes the session it happened on.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::{tungstenite::Message as WsMessage, WebSocketStream};
use tracing::debug;

use crate::application::relay::RelayTransform;
use crate::domain::events::LifecycleEvent;
use crate::domain::messages::{InboundMessage, OutboundMessage, RelayMessage};
use crate::domain::session::{CloseReason, Session};
use crate::infrastructure::lifecycle_log::emit;

/// Runs `session` over `ws` until the connection closes.
///
/// Returns the session in its `Closed` state so callers (and tests) can read
/// the close reason.  The transport is released before this function returns
/// on every path.
pub async fn run_session<S>(
    mut session: Session,
    mut ws: WebSocketStream<S>,
    transform: &dyn RelayTransform,
) -> Session
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let id = session.id();

    while session.is_open() {
        let frame = match ws.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                session.close(CloseReason::ReceiveFailed(e.to_string()));
                break;
            }
            None => {
                session.close(CloseReason::StreamEnded);
                break;
            }
        };

        if let WsMessage::Close(_) = frame {
            session.close(CloseReason::PeerClosed);
            break;
        }
        let inbound = match into_relay_message(frame) {
            Some(inbound) => inbound,
            None => continue,
        };

        emit(&LifecycleEvent::MessageReceived {
            session: id,
            payload: &inbound,
        });

        let outbound = transform.apply(&inbound);
        if let Err(e) = ws.send(into_ws_message(outbound)).await {
            session.close(CloseReason::SendFailed(e.to_string()));
        }
    }

    if session.close_reason() == Some(&CloseReason::PeerClosed) {
        // Flush tungstenite's queued reply to the peer's Close frame.  The
        // peer may already be gone, so the result does not matter.
        let _ = ws.close(None).await;
    }
    drop(ws);

    if let Some(reason) = session.close_reason() {
        emit(&LifecycleEvent::ClientDisconnected {
            session: id,
            reason: reason.clone(),
        });
    }

    session
}

/// Maps a received frame to a relay message.
///
/// Returns `None` for frames that carry no relay payload (ping, pong, close,
/// raw frames).
fn into_relay_message(frame: WsMessage) -> Option<InboundMessage> {
    match frame {
        WsMessage::Text(text) => Some(RelayMessage::Text(text)),
        WsMessage::Binary(bytes) => Some(RelayMessage::Binary(bytes)),
        WsMessage::Ping(data) => {
            debug!("WebSocket ping ({} bytes)", data.len());
            None
        }
        WsMessage::Pong(_) => {
            debug!("WebSocket pong received");
            None
        }
        WsMessage::Close(_) => None,
        WsMessage::Frame(_) => {
            debug!("raw frame (ignored)");
            None
        }
    }
}

fn into_ws_message(msg: OutboundMessage) -> WsMessage {
    match msg {
        RelayMessage::Text(text) => WsMessage::Text(text),
        RelayMessage::Binary(bytes) => WsMessage::Binary(bytes),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
