//! WebSocket server: bind, accept loop, and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.  A bind failure is
//!    returned to the caller; there is no retry.
//! 2. Accepting incoming TCP connections.
//! 3. Spawning one Tokio task per connection, which performs the WebSocket
//!    upgrade handshake and then runs the session loop.
//! 4. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Scalability
//!
//! Each session runs in its own Tokio task.  The accept loop never waits on a
//! session: it accepts a connection, spawns the task, and goes straight back
//! to `accept()`.  A slow or broken client therefore never delays others, and
//! the upgrade handshake itself happens off the accept loop.
//!
//! # Resource accounting
//!
//! Every accepted connection holds a guard for as long as its task
//! runs.  [`ActiveSessions::count`] returns to its previous value once the
//! task has released the socket, whatever path it left by.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};

use crate::application::relay::RelayTransform;
use crate::domain::config::ServerConfig;
use crate::domain::events::LifecycleEvent;
use crate::domain::session::Session;
use crate::infrastructure::lifecycle_log::emit;
use crate::infrastructure::session_handler::run_session;

/// How often the accept loop wakes up to check the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Error type for server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound (port in use, address not assigned to
    /// this host, or insufficient privilege).
    #[error("failed to bind relay listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The OS could not report the address the listener was bound to.
    #[error("failed to read local address of relay listener: {0}")]
    LocalAddr(#[source] std::io::Error),
}

// ── Session accounting ────────────────────────────────────────────────────────

/// Live count of sessions whose tasks still hold a connection.
#[derive(Debug, Clone, Default)]
pub struct ActiveSessions(Arc<AtomicUsize>);

impl ActiveSessions {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn enter(&self) -> SessionGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        SessionGuard(Arc::clone(&self.0))
    }
}

/// Decrements [`ActiveSessions`] when dropped.
#[derive(Debug)]
struct SessionGuard(Arc<AtomicUsize>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// A bound relay listener, ready to accept sessions.
///
/// Construction and running are separate steps so that a bind failure
/// surfaces before anything else starts, and so tests can bind port `0` and
/// read the real port from [`RelayServer::local_addr`].
pub struct RelayServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    transform: Arc<dyn RelayTransform>,
    active: ActiveSessions,
}

impl RelayServer {
    /// Binds the listener on `config.socket_addr()`.
    ///
    /// Logs "server listening at ws://<addr>" once on success.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the TCP listener cannot be bound
    /// (e.g., the port is already in use or the process lacks permission).
    pub async fn bind(
        config: ServerConfig,
        transform: Arc<dyn RelayTransform>,
    ) -> Result<Self, ServerError> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        emit(&LifecycleEvent::Listening { addr: local_addr });

        Ok(Self {
            listener,
            local_addr,
            transform,
            active: ActiveSessions::default(),
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle to the live session count; stays valid after `run` consumes
    /// the server.
    pub fn active_sessions(&self) -> ActiveSessions {
        self.active.clone()
    }

    /// Runs the accept loop until `running` is set to `false`.
    ///
    /// Sessions already in progress are not waited for; they end when their
    /// peer disconnects or when the runtime shuts down.
    pub async fn run(self, running: Arc<AtomicBool>) {
        loop {
            if !running.load(Ordering::Relaxed) {
                info!("shutdown flag set; stopping accept loop");
                break;
            }

            // Short timeout so the loop re-checks `running` even when no
            // client is connecting.
            match timeout(ACCEPT_POLL_INTERVAL, self.listener.accept()).await {
                Ok(Ok((stream, peer_addr))) => {
                    let guard = self.active.enter();
                    let transform = Arc::clone(&self.transform);
                    tokio::spawn(async move {
                        handle_connection(stream, peer_addr, transform).await;
                        drop(guard);
                    });
                }
                Ok(Err(e)) => {
                    // Transient accept error (e.g., too many open file
                    // descriptors).  Keep serving.
                    error!("accept error: {e}");
                }
                Err(_) => {}
            }
        }
    }
}

// ── Per-connection task ───────────────────────────────────────────────────────

/// Upgrades one TCP connection and runs its session to completion.
async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    transform: Arc<dyn RelayTransform>,
) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!("could not set TCP_NODELAY for {peer_addr}: {e}");
    }

    let ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed with {peer_addr}: {e}");
            return;
        }
    };

    let session = Session::open(peer_addr);
    emit(&LifecycleEvent::ClientConnected {
        session: session.id(),
        peer: peer_addr,
    });

    run_session(session, ws, transform.as_ref()).await;
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::relay::EchoTransform;

    fn loopback_any_port() -> ServerConfig {
        ServerConfig::new("127.0.0.1".parse().unwrap()).with_port(0)
    }

    #[tokio::test]
    async fn test_bind_port_zero_reports_real_port() {
        // Arrange / Act
        let server = RelayServer::bind(loopback_any_port(), Arc::new(EchoTransform::default()))
            .await
            .unwrap();

        // Assert
        assert_ne!(server.local_addr().port(), 0);
        assert!(server.local_addr().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_on_taken_port_fails() {
        // Arrange: occupy a port
        let first = RelayServer::bind(loopback_any_port(), Arc::new(EchoTransform::default()))
            .await
            .unwrap();
        let taken = ServerConfig::new("127.0.0.1".parse().unwrap())
            .with_port(first.local_addr().port());

        // Act
        let result = RelayServer::bind(taken, Arc::new(EchoTransform::default())).await;

        // Assert
        match result {
            Err(ServerError::Bind { addr, .. }) => assert_eq!(addr, taken.socket_addr()),
            Err(other) => panic!("expected Bind error, got {other}"),
            Ok(_) => panic!("second bind on the same port must fail"),
        }
    }

    #[test]
    fn test_bind_error_message_names_address() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:8080".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().contains("127.0.0.1:8080"));
    }

    #[test]
    fn test_session_guard_restores_count() {
        // Arrange
        let active = ActiveSessions::default();

        // Act
        let a = active.enter();
        let b = active.enter();
        let during = active.count();
        drop(a);
        drop(b);

        // Assert
        assert_eq!(during, 2);
        assert_eq!(active.count(), 0);
    }

    #[tokio::test]
    async fn test_run_returns_when_flag_cleared() {
        // Arrange
        let server = RelayServer::bind(loopback_any_port(), Arc::new(EchoTransform::default()))
            .await
            .unwrap();
        let running = Arc::new(AtomicBool::new(false));

        // Act / Assert: completes within a couple of poll intervals
        timeout(Duration::from_secs(2), server.run(running))
            .await
            .expect("accept loop must observe the shutdown flag");
    }
}
