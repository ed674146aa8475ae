//! Bind-address resolution.
//!
//! The relay advertises itself on the machine's LAN address so that other
//! devices on the network can reach it.  The selection rule is:
//!
//! 1. Walk the host's interfaces in enumeration order.
//! 2. Pick the first address that is IPv4 and not loopback.
//! 3. If nothing qualifies, fall back to `127.0.0.1`.
//!
//! A host with no LAN interface is a normal case, not an error.
//!
//! # Testability
//!
//! Enumeration is behind the [`InterfaceSource`] trait so the rule can be
//! exercised with synthetic interface lists.  The real implementation lives in
//! `infrastructure::interfaces`.

use std::net::{IpAddr, Ipv4Addr};

use tracing::debug;

/// Address returned when no non-loopback IPv4 interface exists.
pub const LOOPBACK_FALLBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// One address assigned to a local network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    /// OS name of the interface (e.g. `eth0`, `en0`, `lo`).
    pub name: String,
    /// Address assigned to it.
    pub addr: IpAddr,
}

impl InterfaceAddr {
    pub fn new(name: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            name: name.into(),
            addr,
        }
    }

    /// `true` for a LAN-reachable IPv4 address.
    pub fn is_external_ipv4(&self) -> bool {
        self.addr.is_ipv4() && !self.addr.is_loopback()
    }
}

/// Source of the host's interface addresses.
#[cfg_attr(test, mockall::automock)]
pub trait InterfaceSource {
    /// All interface addresses, in the order the host enumerates them.
    fn interface_addrs(&self) -> Vec<InterfaceAddr>;
}

/// Returns the address the relay should bind to and advertise.
///
/// # Example
///
/// ```rust
/// use relay_server::application::address::{resolve_bind_address, InterfaceAddr, InterfaceSource};
///
/// struct LoopbackOnly;
/// impl InterfaceSource for LoopbackOnly {
///     fn interface_addrs(&self) -> Vec<InterfaceAddr> {
///         vec![InterfaceAddr::new("lo", "127.0.0.1".parse().unwrap())]
///     }
/// }
///
/// assert_eq!(resolve_bind_address(&LoopbackOnly).to_string(), "127.0.0.1");
/// ```
pub fn resolve_bind_address(source: &dyn InterfaceSource) -> IpAddr {
    match source
        .interface_addrs()
        .into_iter()
        .find(InterfaceAddr::is_external_ipv4)
    {
        Some(iface) => {
            debug!("selected interface {} ({})", iface.name, iface.addr);
            iface.addr
        }
        None => {
            debug!("no non-loopback IPv4 interface; falling back to {LOOPBACK_FALLBACK}");
            LOOPBACK_FALLBACK
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, addr: &str) -> InterfaceAddr {
        InterfaceAddr::new(name, addr.parse().unwrap())
    }

    fn source_with(addrs: Vec<InterfaceAddr>) -> MockInterfaceSource {
        let mut source = MockInterfaceSource::new();
        source
            .expect_interface_addrs()
            .times(1)
            .return_once(move || addrs);
        source
    }

    #[test]
    fn test_loopback_only_host_falls_back_to_localhost() {
        // Arrange
        let source = source_with(vec![iface("lo", "127.0.0.1"), iface("lo", "::1")]);

        // Act
        let addr = resolve_bind_address(&source);

        // Assert
        assert_eq!(addr, LOOPBACK_FALLBACK);
    }

    #[test]
    fn test_no_interfaces_falls_back_to_localhost() {
        let source = source_with(Vec::new());
        assert_eq!(resolve_bind_address(&source), LOOPBACK_FALLBACK);
    }

    #[test]
    fn test_single_lan_interface_is_selected() {
        // Arrange
        let source = source_with(vec![
            iface("lo", "127.0.0.1"),
            iface("eth0", "192.168.1.42"),
        ]);

        // Act / Assert
        assert_eq!(resolve_bind_address(&source).to_string(), "192.168.1.42");
    }

    #[test]
    fn test_ipv6_addresses_are_skipped() {
        let source = source_with(vec![
            iface("eth0", "fe80::1"),
            iface("eth0", "2001:db8::5"),
            iface("eth0", "10.0.0.7"),
        ]);
        assert_eq!(resolve_bind_address(&source).to_string(), "10.0.0.7");
    }

    #[test]
    fn test_first_qualifying_interface_wins() {
        let source = source_with(vec![
            iface("eth0", "10.0.0.7"),
            iface("wlan0", "192.168.1.42"),
        ]);
        assert_eq!(resolve_bind_address(&source).to_string(), "10.0.0.7");
    }

    #[test]
    fn test_any_127_address_counts_as_loopback() {
        let source = source_with(vec![iface("lo", "127.0.1.1")]);
        assert_eq!(resolve_bind_address(&source), LOOPBACK_FALLBACK);
    }

    #[test]
    fn test_is_external_ipv4() {
        assert!(iface("eth0", "172.16.0.3").is_external_ipv4());
        assert!(!iface("lo", "127.0.0.1").is_external_ipv4());
        assert!(!iface("eth0", "2001:db8::5").is_external_ipv4());
    }
}
