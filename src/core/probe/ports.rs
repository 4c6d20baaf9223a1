// src/core/probe/ports.rs

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::core::knowledge_base::{CANDIDATE_PORTS, service_name};
use crate::core::models::OpenPort;

/// Per-port TCP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Probes the fixed candidate port set with bounded TCP connect attempts.
///
/// All probes run concurrently, so total latency stays close to a single
/// connect timeout instead of growing with the candidate count. Probes are
/// independent: a refused connect or timeout on one port never aborts the
/// rest. The result is re-sorted into the canonical candidate-list order,
/// which callers rely on being deterministic.
pub async fn scan_ports(ip: Ipv4Addr) -> Vec<OpenPort> {
    debug!(%ip, candidates = CANDIDATE_PORTS.len(), "Starting port scan.");

    let handles: Vec<_> = CANDIDATE_PORTS
        .iter()
        .map(|&port| (port, tokio::spawn(probe_port(ip, port))))
        .collect();

    let mut open_ports = Vec::new();
    for (port, handle) in handles {
        // A panicked probe task counts as a closed port.
        if let Ok(true) = handle.await {
            open_ports.push(OpenPort::new(port, service_name(port)));
        }
    }

    sort_canonical(&mut open_ports);

    info!(%ip, open = open_ports.len(), "Port scan finished.");
    open_ports
}

/// Attempts a single TCP connect; open means the handshake completed within
/// the timeout.
async fn probe_port(ip: Ipv4Addr, port: u16) -> bool {
    let addr = SocketAddr::from((ip, port));
    match timeout(CONNECT_TIMEOUT, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => {
            debug!(port, "Port is open.");
            true
        }
        Ok(Err(e)) => {
            debug!(port, error = %e, "Port is closed.");
            false
        }
        Err(_) => {
            debug!(port, "Port probe timed out.");
            false
        }
    }
}

/// Sorts open ports into the canonical candidate-list order, regardless of
/// the order concurrent probes completed in.
pub fn sort_canonical(open_ports: &mut [OpenPort]) {
    open_ports.sort_by_key(|open| canonical_rank(open.port));
}

fn canonical_rank(port: u16) -> usize {
    CANDIDATE_PORTS
        .iter()
        .position(|&candidate| candidate == port)
        .unwrap_or(CANDIDATE_PORTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ports_resort_into_candidate_order() {
        // 3000 is declared after 9000 in the candidate set, so numeric
        // sorting would get this wrong.
        let mut ports = vec![
            OpenPort::new(3000, service_name(3000)),
            OpenPort::new(9000, service_name(9000)),
            OpenPort::new(22, service_name(22)),
            OpenPort::new(443, service_name(443)),
        ];
        sort_canonical(&mut ports);

        let order: Vec<u16> = ports.iter().map(|p| p.port).collect();
        assert_eq!(order, vec![22, 443, 9000, 3000]);
    }

    #[test]
    fn open_port_carries_service_and_status() {
        let open = OpenPort::new(3306, service_name(3306));
        assert_eq!(open.service, "MySQL");
        assert_eq!(open.status, "open");
    }
}
