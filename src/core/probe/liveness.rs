// src/core/probe/liveness.rs

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use surge_ping::ping;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Number of ICMP echo attempts before the host is declared unreachable.
const ECHO_ATTEMPTS: u32 = 2;
/// Per-attempt echo timeout.
const ECHO_TIMEOUT: Duration = Duration::from_secs(1);
/// Hard deadline for the whole liveness step.
const OVERALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Determines whether a host answers ICMP echo requests.
///
/// This is a boolean outcome, never an error: timeouts, missing raw-socket
/// permission, and unreachable destinations all yield `false`. The whole
/// step is additionally capped at `OVERALL_TIMEOUT`.
pub async fn check_reachability(ip: Ipv4Addr) -> bool {
    match timeout(OVERALL_TIMEOUT, echo_attempts(IpAddr::V4(ip))).await {
        Ok(reachable) => reachable,
        Err(_) => {
            warn!(%ip, "Liveness probe exceeded its overall deadline.");
            false
        }
    }
}

async fn echo_attempts(ip: IpAddr) -> bool {
    let payload = [0u8; 56];
    for attempt in 1..=ECHO_ATTEMPTS {
        match timeout(ECHO_TIMEOUT, ping(ip, &payload)).await {
            Ok(Ok((_reply, rtt))) => {
                debug!(%ip, attempt, ?rtt, "ICMP echo reply received.");
                return true;
            }
            // Covers unreachable destinations as well as environments where
            // opening a raw ICMP socket is not permitted.
            Ok(Err(e)) => {
                debug!(%ip, attempt, error = %e, "ICMP echo failed.");
            }
            Err(_) => {
                debug!(%ip, attempt, "ICMP echo timed out.");
            }
        }
    }
    false
}
