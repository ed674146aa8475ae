//! Lifecycle events reported to operators.
//!
//! Each variant is one line of operator-facing log output.  The `Display`
//! text is the log message; the infrastructure layer attaches the structured
//! fields (session id, peer address) when it emits the event.
//!
//! Events borrow the inbound payload: logging a frame never copies it.

use std::fmt;
use std::net::SocketAddr;

use super::messages::InboundMessage;
use super::session::{CloseReason, SessionId};

/// Something an operator should see in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent<'a> {
    /// The listener bound successfully.
    Listening { addr: SocketAddr },
    /// A WebSocket upgrade completed and a session was created.
    ClientConnected { session: SessionId, peer: SocketAddr },
    /// A data frame arrived on a session.
    MessageReceived {
        session: SessionId,
        payload: &'a InboundMessage,
    },
    /// A session reached its terminal state.
    ClientDisconnected {
        session: SessionId,
        reason: CloseReason,
    },
}

impl fmt::Display for LifecycleEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::Listening { addr } => {
                write!(f, "server listening at ws://{addr}")
            }
            LifecycleEvent::ClientConnected { .. } => f.write_str("new client connected"),
            LifecycleEvent::MessageReceived { payload, .. } => write!(f, "received: {payload}"),
            LifecycleEvent::ClientDisconnected { reason, .. } => {
                write!(f, "client disconnected ({reason})")
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listening_line_includes_ws_url() {
        let event = LifecycleEvent::Listening {
            addr: "192.168.1.10:8080".parse().unwrap(),
        };
        assert_eq!(event.to_string(), "server listening at ws://192.168.1.10:8080");
    }

    #[test]
    fn test_connected_line() {
        let event = LifecycleEvent::ClientConnected {
            session: SessionId::new(),
            peer: "127.0.0.1:40000".parse().unwrap(),
        };
        assert_eq!(event.to_string(), "new client connected");
    }

    #[test]
    fn test_received_line_carries_raw_payload() {
        let payload = InboundMessage::from("hello");
        let event = LifecycleEvent::MessageReceived {
            session: SessionId::new(),
            payload: &payload,
        };
        assert_eq!(event.to_string(), "received: hello");
    }

    #[test]
    fn test_disconnected_line_carries_reason() {
        let event = LifecycleEvent::ClientDisconnected {
            session: SessionId::new(),
            reason: CloseReason::StreamEnded,
        };
        assert_eq!(event.to_string(), "client disconnected (stream ended)");
    }
}
