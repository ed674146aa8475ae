//! Application layer for relay-server.
//!
//! The application layer knows *what* the relay does, and delegates *how* to
//! the infrastructure layer.
//!
//! # Responsibilities
//!
//! - Choosing the bind address from the host's interface list
//! - Computing the reply for each inbound message (the relay transform)
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or listening for connections (that is infrastructure)
//! - Tokio task spawning (that happens in the infrastructure layer)
//! - WebSocket framing (handled by tokio-tungstenite)

pub mod address;
pub mod relay;

pub use address::{resolve_bind_address, InterfaceAddr, InterfaceSource, LOOPBACK_FALLBACK};
pub use relay::{EchoTransform, RelayTransform, DEFAULT_ECHO_PREFIX};
