//! relay-server entry point.
//!
//! Accepts WebSocket connections and answers every frame a client sends with
//! one frame computed by the relay transform (default: `"Server echo: "` +
//! payload).
//!
//! # Usage
//!
//! ```text
//! relay-server [OPTIONS]
//!
//! Options:
//!   --port        <PORT>    Listener port [default: 8080]
//!   --bind        <ADDR>    Bind address [default: first LAN IPv4, else 127.0.0.1]
//!   --echo-prefix <TEXT>    Prefix prepended to every reply [default: "Server echo: "]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable             | Default             | Description             |
//! |----------------------|---------------------|-------------------------|
//! | `RELAY_PORT`         | `8080`              | Listener port           |
//! | `RELAY_BIND`         | resolved at startup | Bind address            |
//! | `RELAY_ECHO_PREFIX`  | `Server echo: `     | Reply prefix            |
//!
//! Log verbosity follows `RUST_LOG` (default `info`).
//!
//! # Exit status
//!
//! A bind failure (port in use, address not assigned to this host) is fatal:
//! the process logs the cause and exits non-zero without serving anything.

use std::net::IpAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_server::application::{
    resolve_bind_address, EchoTransform, InterfaceSource, DEFAULT_ECHO_PREFIX,
};
use relay_server::domain::{ServerConfig, DEFAULT_PORT};
use relay_server::infrastructure::{RelayServer, SystemInterfaces};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// WebSocket relay server.
///
/// Every frame a client sends is answered with exactly one frame on the same
/// connection.
#[derive(Debug, Parser)]
#[command(
    name = "relay-server",
    about = "WebSocket relay that echoes every frame back to its sender",
    version
)]
struct Cli {
    /// TCP port for the WebSocket listener.
    ///
    /// Clients expect the relay on 8080; only override this (or set
    /// `RELAY_PORT`) when every client is configured to match.
    #[arg(long, default_value_t = DEFAULT_PORT, env = "RELAY_PORT")]
    port: u16,

    /// IP address to bind to.
    ///
    /// When omitted, the first non-loopback IPv4 interface address is used,
    /// falling back to `127.0.0.1` on hosts without one.
    #[arg(long, env = "RELAY_BIND")]
    bind: Option<IpAddr>,

    /// Text prepended to every reply.
    #[arg(long, default_value = DEFAULT_ECHO_PREFIX, env = "RELAY_ECHO_PREFIX")]
    echo_prefix: String,
}

impl Cli {
    /// Builds the listener configuration, consulting `interfaces` only when
    /// no explicit `--bind` was given.
    fn server_config(&self, interfaces: &dyn InterfaceSource) -> ServerConfig {
        let bind_address = self
            .bind
            .unwrap_or_else(|| resolve_bind_address(interfaces));
        ServerConfig::new(bind_address).with_port(self.port)
    }

    fn transform(&self) -> EchoTransform {
        EchoTransform::new(self.echo_prefix.clone())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `RUST_LOG` controls verbosity; absent or invalid falls back to `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.server_config(&SystemInterfaces);

    info!("relay server starting, bind={}", config.socket_addr());

    let server = RelayServer::bind(config, Arc::new(cli.transform()))
        .await
        .with_context(|| format!("cannot start relay server on {}", config.socket_addr()))?;

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    //
    // Ctrl+C clears `running`; the accept loop notices within one poll
    // interval and returns.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    server.run(running).await;

    info!("relay server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
