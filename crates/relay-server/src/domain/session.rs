//! Session identity and lifecycle state.
//!
//! A [`Session`] is the bookkeeping half of one accepted connection.  The
//! transport half (the WebSocket stream) lives next to it inside the session
//! handler task, so exactly one task ever touches a given session.
//!
//! ```text
//!   accept ──► Open ──(close frame | end of stream | I/O error)──► Closed
//! ```
//!
//! `Closed` is terminal: once a session is closed, further `close` calls are
//! no-ops and report `false`.

use std::fmt;
use std::net::SocketAddr;

use uuid::Uuid;

/// Opaque identifier used to correlate log lines of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next inbound message or closure signal.
    Open,
    /// Terminal.  The transport has been (or is about to be) released.
    Closed(CloseReason),
}

/// Why a session left the `Open` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer sent a WebSocket Close frame.
    PeerClosed,
    /// The stream ended without a Close frame (peer vanished).
    StreamEnded,
    /// Reading the next frame failed.
    ReceiveFailed(String),
    /// Sending a response frame failed.
    SendFailed(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::PeerClosed => f.write_str("peer closed"),
            CloseReason::StreamEnded => f.write_str("stream ended"),
            CloseReason::ReceiveFailed(e) => write!(f, "receive failed: {e}"),
            CloseReason::SendFailed(e) => write!(f, "send failed: {e}"),
        }
    }
}

/// One accepted connection.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    peer_addr: SocketAddr,
    state: SessionState,
}

impl Session {
    /// Creates an open session for a connection accepted from `peer_addr`.
    pub fn open(peer_addr: SocketAddr) -> Self {
        Self {
            id: SessionId::new(),
            peer_addr,
            state: SessionState::Open,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open)
    }

    /// Transitions `Open -> Closed(reason)`.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// session was already closed (the first reason is kept).
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = SessionState::Closed(reason);
        true
    }

    /// The reason the session closed, if it has.
    pub fn close_reason(&self) -> Option<&CloseReason> {
        match &self.state {
            SessionState::Open => None,
            SessionState::Closed(reason) => Some(reason),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
