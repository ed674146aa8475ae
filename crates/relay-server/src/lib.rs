//! relay-server library crate.
//!
//! A WebSocket relay: every text or binary frame a client sends is answered
//! with exactly one frame on the same connection, computed by a pluggable
//! relay transform (by default `"Server echo: " + payload`).
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Client (any WebSocket peer)
//!         ↕
//! [relay-server]
//!   ├── domain/           Pure types: ServerConfig, Session, RelayMessage, LifecycleEvent
//!   ├── application/      Bind-address selection, relay transform
//!   └── infrastructure/
//!         ├── interfaces/       Host interface table (sysinfo)
//!         ├── ws_server/        Bind + accept loop (tokio-tungstenite)
//!         ├── session_handler/  Per-connection receive → transform → send loop
//!         └── lifecycle_log/    Lifecycle events → tracing
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` only.
//! - `infrastructure` depends on all other layers plus `tokio`, `tungstenite`
//!   and `sysinfo`.

/// Domain layer: pure types (no I/O).
pub mod domain;

/// Application layer: address selection and relay transform.
pub mod application;

/// Infrastructure layer: interface enumeration, WebSocket server, logging.
pub mod infrastructure;
