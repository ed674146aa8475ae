//! Domain layer for relay-server.
//!
//! The domain layer contains pure types that have no dependencies on I/O,
//! networking, or async runtimes.  This makes them easy to test in isolation.
//!
//! # What belongs in the domain layer?
//!
//! - Relay payload types (what a session receives and sends back)
//! - Configuration structures
//! - Session identity and lifecycle state
//! - Lifecycle events reported to operators
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or `WebSocket` types
//! - Interface enumeration or environment variable reading
//! - Anything that could block or fail due to external state

pub mod config;
pub mod events;
pub mod messages;
pub mod session;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::ServerConfig` instead of the longer path.
pub use config::{ServerConfig, DEFAULT_PORT};
pub use events::LifecycleEvent;
pub use messages::{InboundMessage, OutboundMessage, RelayMessage};
pub use session::{CloseReason, Session, SessionId, SessionState};
