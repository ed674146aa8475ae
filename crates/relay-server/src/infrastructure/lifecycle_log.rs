//! Lifecycle logger: forwards [`LifecycleEvent`]s to `tracing`.
//!
//! This is a passive sink.  Emitting an event never fails and never changes
//! what the caller does next.  Every event is logged at `info` with the
//! session id (and peer address where known) as structured fields, so a
//! `RUST_LOG=relay_server=info` filter shows one line per lifecycle step.

use tracing::info;

use crate::domain::events::LifecycleEvent;

/// Writes `event` to the log.
pub fn emit(event: &LifecycleEvent<'_>) {
    match event {
        LifecycleEvent::Listening { addr } => {
            info!(%addr, "{event}");
        }
        LifecycleEvent::ClientConnected { session, peer } => {
            info!(%session, %peer, "{event}");
        }
        LifecycleEvent::MessageReceived { session, payload } => {
            info!(%session, bytes = payload.len(), "{event}");
        }
        LifecycleEvent::ClientDisconnected { session, .. } => {
            info!(%session, "{event}");
        }
    }
}
