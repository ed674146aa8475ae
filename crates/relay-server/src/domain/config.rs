//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for where the relay listens.
//! It is resolved once at startup (address resolver + CLI overrides) and then
//! handed to the listener, which owns it for the rest of the process.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the server easy to embed in tests:
//! bind `127.0.0.1:0` and read the real port back from the listener.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// The port the relay listens on unless an operator overrides it.
pub const DEFAULT_PORT: u16 = 8080;

/// Bind endpoint for the relay listener.
///
/// # Example
///
/// ```rust
/// use relay_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface address the listener binds to and advertises.
    pub bind_address: IpAddr,

    /// TCP port of the listener.  Port `0` asks the OS for an ephemeral port.
    pub port: u16,
}

impl ServerConfig {
    /// Creates a configuration for `bind_address` on the default port.
    pub fn new(bind_address: IpAddr) -> Self {
        Self {
            bind_address,
            port: DEFAULT_PORT,
        }
    }

    /// Returns a copy of this configuration listening on `port` instead.
    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    /// The `address:port` pair the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    /// Loopback on [`DEFAULT_PORT`]; the same address the resolver falls back
    /// to on a host without a usable LAN interface.
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_8080() {
        // Arrange / Act
        let cfg = ServerConfig::default();
        // Assert
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_default_bind_address_is_loopback() {
        let cfg = ServerConfig::default();
        assert!(cfg.bind_address.is_loopback());
    }

    #[test]
    fn test_new_uses_default_port() {
        let cfg = ServerConfig::new("192.168.1.20".parse().unwrap());
        assert_eq!(cfg.socket_addr().to_string(), "192.168.1.20:8080");
    }

    #[test]
    fn test_with_port_keeps_address() {
        // Arrange
        let cfg = ServerConfig::new("10.0.0.5".parse().unwrap());

        // Act
        let moved = cfg.with_port(9000);

        // Assert
        assert_eq!(moved.bind_address, cfg.bind_address);
        assert_eq!(moved.port, 9000);
    }

    #[test]
    fn test_socket_addr_formats_ipv6_with_brackets() {
        let cfg = ServerConfig::new("::1".parse().unwrap());
        assert_eq!(cfg.socket_addr().to_string(), "[::1]:8080");
    }
}
