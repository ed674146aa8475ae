//! Relay payload types.
//!
//! The relay attaches no schema to what clients send: a payload is either a
//! UTF-8 text frame or an opaque binary frame.  The same type describes both
//! directions; the [`InboundMessage`] / [`OutboundMessage`] aliases only make
//! signatures read in the direction the data flows.

use std::borrow::Cow;
use std::fmt;

/// One discrete message carried over a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    /// A WebSocket text frame.
    Text(String),
    /// A WebSocket binary frame.
    Binary(Vec<u8>),
}

/// A message received from a client.
pub type InboundMessage = RelayMessage;

/// A message sent back to the client that produced the matching inbound one.
pub type OutboundMessage = RelayMessage;

impl RelayMessage {
    /// Number of payload bytes.
    pub fn len(&self) -> usize {
        match self {
            RelayMessage::Text(text) => text.len(),
            RelayMessage::Binary(bytes) => bytes.len(),
        }
    }

    /// Returns `true` if the payload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The payload as text, replacing invalid UTF-8 in binary frames.
    ///
    /// Used for logging, where an operator wants to read what the client sent
    /// regardless of frame type.
    pub fn as_text_lossy(&self) -> Cow<'_, str> {
        match self {
            RelayMessage::Text(text) => Cow::Borrowed(text.as_str()),
            RelayMessage::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

impl fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text_lossy())
    }
}

impl From<&str> for RelayMessage {
    fn from(text: &str) -> Self {
        RelayMessage::Text(text.to_owned())
    }
}

impl From<String> for RelayMessage {
    fn from(text: String) -> Self {
        RelayMessage::Text(text)
    }
}

impl From<Vec<u8>> for RelayMessage {
    fn from(bytes: Vec<u8>) -> Self {
        RelayMessage::Binary(bytes)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
