//! Host interface enumeration backed by `sysinfo`.
//!
//! `sysinfo` reports interfaces in a hash map, so the raw order changes from
//! run to run.  [`SystemInterfaces`] sorts by interface name before flattening
//! the address lists, which keeps "first qualifying interface" stable on a
//! given host.
//!
//! Name order is not the host's own enumeration order.  On a Docker host,
//! `br-*` and `docker0` sort ahead of `eth0`, so a bridge address can be
//! picked; pass `--bind` to choose the LAN address explicitly.

use sysinfo::Networks;

use crate::application::address::{InterfaceAddr, InterfaceSource};

/// [`InterfaceSource`] that reads the live interface table of this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interface_addrs(&self) -> Vec<InterfaceAddr> {
        let networks = Networks::new_with_refreshed_list();

        let mut named: Vec<_> = networks.list().iter().collect();
        named.sort_by(|(a, _), (b, _)| a.cmp(b));

        named
            .into_iter()
            .flat_map(|(name, data)| {
                data.ip_networks()
                    .iter()
                    .map(move |net| InterfaceAddr::new(name.as_str(), net.addr))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_interfaces_are_sorted_by_name() {
        // The interface table is host-specific; only the ordering guarantee
        // is checked.
        let addrs = SystemInterfaces.interface_addrs();
        let names: Vec<_> = addrs.iter().map(|a| a.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
