//! Relay transform: the policy that turns an inbound message into the reply.
//!
//! The functions in this module have no I/O side effects and no dependencies on
//! async runtimes, sockets, or threads.  The session handler calls
//! [`RelayTransform::apply`] once per inbound data frame and sends whatever it
//! returns on the same session.
//!
//! # Contract
//!
//! A transform must be a deterministic function of the inbound payload: the
//! same input on two different sessions must yield equal outputs.  Nothing
//! stronger is promised to clients.
//!
//! ```text
//! Client → Server:  "hello"
//! Server → Client:  "Server echo: hello"      (EchoTransform, default prefix)
//! ```

use crate::domain::messages::{InboundMessage, OutboundMessage, RelayMessage};

/// Prefix used by [`EchoTransform::default`].
pub const DEFAULT_ECHO_PREFIX: &str = "Server echo: ";

/// Maps an inbound message to the outbound message sent back to its sender.
///
/// Implementations are shared by every session task, hence `Send + Sync`.
pub trait RelayTransform: Send + Sync {
    fn apply(&self, inbound: &InboundMessage) -> OutboundMessage;
}

/// Echoes the payload back, prefixed with a fixed marker.
///
/// Text frames stay text frames; binary frames get the prefix's UTF-8 bytes
/// prepended and stay binary.
///
/// # Example
///
/// ```rust
/// use relay_server::application::{EchoTransform, RelayTransform};
/// use relay_server::domain::RelayMessage;
///
/// let echo = EchoTransform::default();
/// let reply = echo.apply(&RelayMessage::from("hello"));
/// assert_eq!(reply, RelayMessage::from("Server echo: hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoTransform {
    prefix: String,
}

impl EchoTransform {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for EchoTransform {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_PREFIX)
    }
}

impl RelayTransform for EchoTransform {
    fn apply(&self, inbound: &InboundMessage) -> OutboundMessage {
        match inbound {
            RelayMessage::Text(text) => {
                let mut reply = String::with_capacity(self.prefix.len() + text.len());
                reply.push_str(&self.prefix);
                reply.push_str(text);
                RelayMessage::Text(reply)
            }
            RelayMessage::Binary(bytes) => {
                let mut reply = Vec::with_capacity(self.prefix.len() + bytes.len());
                reply.extend_from_slice(self.prefix.as_bytes());
                reply.extend_from_slice(bytes);
                RelayMessage::Binary(reply)
            }
        }
    }
}

/// Any `Fn(&InboundMessage) -> OutboundMessage` closure is a transform.
impl<F> RelayTransform for F
where
    F: Fn(&InboundMessage) -> OutboundMessage + Send + Sync,
{
    fn apply(&self, inbound: &InboundMessage) -> OutboundMessage {
        self(inbound)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
