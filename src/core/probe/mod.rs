// src/core/probe/mod.rs

// This file acts as the public interface for the `probe` module.
// The liveness check, port scan, and reverse lookup are independent bounded
// probes; `scan_host` fans them out concurrently and aggregates the results.
pub mod assess;
pub mod liveness;
pub mod ports;

use std::net::{IpAddr, Ipv4Addr};

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use tracing::{debug, info, warn};

use crate::core::models::{EngineError, HostScan, NetworkClass};

/// Sentinel hostname when the PTR lookup fails or yields nothing.
pub const UNKNOWN_HOSTNAME: &str = "Unknown";

/// Scans a host: liveness probe, bounded port scan, reverse DNS, and
/// network classification.
///
/// The address is validated as an IPv4 dotted quad before any socket I/O;
/// malformed input fails with `EngineError::InvalidAddress`. Individual
/// probe failures never propagate as errors: an unreachable host simply
/// reports `reachable = false`, an unresolvable address reports the
/// `"Unknown"` hostname sentinel.
///
/// # Arguments
/// * `address` - The IPv4 address to scan, as a dotted-quad string.
///
/// # Returns
/// A `HostScan` with the aggregated probe results, or `InvalidAddress`.
pub async fn scan_host(address: &str) -> Result<HostScan, EngineError> {
    let ip: Ipv4Addr = address
        .parse()
        .map_err(|_| EngineError::InvalidAddress(address.to_string()))?;

    info!(address, "Starting host scan.");

    // The three probes are independent, so run them concurrently; overall
    // latency is bounded by the slowest probe, not their sum.
    let (reachable, open_ports, hostname) = tokio::join!(
        liveness::check_reachability(ip),
        ports::scan_ports(ip),
        reverse_lookup(ip)
    );

    let network = classify_network(ip);

    info!(
        reachable,
        open_ports = open_ports.len(),
        "Host scan finished."
    );

    Ok(HostScan {
        address: ip.to_string(),
        reachable,
        open_ports,
        hostname,
        network,
    })
}

/// Classifies an address as private or public against the RFC1918 ranges.
/// Pure octet arithmetic; requires no network access.
pub fn classify_network(ip: Ipv4Addr) -> NetworkClass {
    let [first, second, _, _] = ip.octets();
    match (first, second) {
        (10, _) => NetworkClass::private("10.0.0.0/8"),
        (172, 16..=31) => NetworkClass::private("172.16.0.0/12"),
        (192, 168) => NetworkClass::private("192.168.0.0/16"),
        _ => NetworkClass::public(),
    }
}

/// Attempts a PTR lookup for the address. Any failure degrades to the
/// `"Unknown"` sentinel rather than an error.
async fn reverse_lookup(ip: Ipv4Addr) -> String {
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

    match resolver.reverse_lookup(IpAddr::V4(ip)).await {
        Ok(lookup) => match lookup.iter().next() {
            Some(name) => {
                let hostname = name.to_string().trim_end_matches('.').to_string();
                debug!(%ip, hostname, "PTR record found.");
                hostname
            }
            None => {
                debug!(%ip, "PTR lookup returned no records.");
                UNKNOWN_HOSTNAME.to_string()
            }
        },
        Err(e) => {
            warn!(%ip, error = %e, "Reverse DNS lookup failed.");
            UNKNOWN_HOSTNAME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::NetworkKind;

    #[test]
    fn ten_slash_eight_is_private() {
        let class = classify_network("10.1.2.3".parse().unwrap());
        assert_eq!(class.kind, NetworkKind::Private);
        assert_eq!(class.range, "10.0.0.0/8");
    }

    #[test]
    fn one_seventy_two_range_boundaries() {
        let inside = classify_network("172.20.0.1".parse().unwrap());
        assert_eq!(inside.kind, NetworkKind::Private);
        assert_eq!(inside.range, "172.16.0.0/12");

        let lower = classify_network("172.16.0.1".parse().unwrap());
        assert_eq!(lower.kind, NetworkKind::Private);
        let upper = classify_network("172.31.255.254".parse().unwrap());
        assert_eq!(upper.kind, NetworkKind::Private);

        // 172.32.0.0 falls outside the /12.
        let outside = classify_network("172.32.0.1".parse().unwrap());
        assert_eq!(outside.kind, NetworkKind::Public);
        assert_eq!(outside.range, "Internet");

        let below = classify_network("172.15.0.1".parse().unwrap());
        assert_eq!(below.kind, NetworkKind::Public);
    }

    #[test]
    fn one_ninety_two_one_sixty_eight_is_private() {
        let class = classify_network("192.168.1.1".parse().unwrap());
        assert_eq!(class.kind, NetworkKind::Private);
        assert_eq!(class.range, "192.168.0.0/16");

        let outside = classify_network("192.169.1.1".parse().unwrap());
        assert_eq!(outside.kind, NetworkKind::Public);
    }

    #[test]
    fn public_addresses_classify_as_internet() {
        let class = classify_network("8.8.8.8".parse().unwrap());
        assert_eq!(class.kind, NetworkKind::Public);
        assert_eq!(class.range, "Internet");
    }

    #[tokio::test]
    async fn malformed_addresses_are_rejected_before_any_io() {
        for bad in ["", "999.1.1.1", "10.0.0", "abc", "1.2.3.4.5", "10.0.0.1 "] {
            match scan_host(bad).await {
                Err(EngineError::InvalidAddress(addr)) => assert_eq!(addr, bad),
                other => panic!("expected InvalidAddress for {bad:?}, got {other:?}"),
            }
        }
    }
}
