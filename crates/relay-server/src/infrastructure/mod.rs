//! Infrastructure layer for relay-server.
//!
//! The infrastructure layer handles all I/O: reading the host's interface
//! table, accepting WebSocket connections, and writing the operator log.
//!
//! # Responsibilities
//!
//! - Enumerating network interfaces for the address resolver
//! - Binding a TCP listener and accepting connections
//! - Performing the WebSocket HTTP upgrade handshake
//! - Running the per-session receive → transform → send loop
//! - Spawning per-session Tokio tasks
//! - Emitting lifecycle events to `tracing`
//!
//! # What does NOT belong here?
//!
//! - The relay transform itself (that is the application layer)
//! - Session state and event types (that is the domain layer)
//! - Configuration parsing (that is done in `main.rs`)

pub mod interfaces;
pub mod lifecycle_log;
pub mod session_handler;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use interfaces::SystemInterfaces;
pub use ws_server::{ActiveSessions, RelayServer, ServerError};
