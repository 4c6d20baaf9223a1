// src/core/probe/assess.rs

use tracing::debug;

use crate::core::knowledge_base::SUSPICIOUS_PORTS;
use crate::core::models::{HostScan, ThreatAssessment, ThreatLevel};

/// Score added when the host answered the liveness probe.
const REACHABLE_WEIGHT: u32 = 10;
/// Score added per open port from the suspicious set.
const SUSPICIOUS_PORT_WEIGHT: u32 = 20;
/// Score added per other open port.
const OPEN_PORT_WEIGHT: u32 = 5;

/// Reduces a scan result to a heuristic threat assessment.
///
/// Pure function of the scan: +10 for reachability, +20 per suspicious open
/// port (each with a warning), +5 per other open port. The level is a step
/// function of the score: >= 30 High, >= 15 Medium, else Low. Warnings keep
/// port-scan order.
pub fn assess_threat(scan: &HostScan) -> ThreatAssessment {
    let mut threat_score = 0;
    let mut warnings = Vec::new();

    if scan.reachable {
        threat_score += REACHABLE_WEIGHT;
    }

    for open in &scan.open_ports {
        if SUSPICIOUS_PORTS.contains(&open.port) {
            threat_score += SUSPICIOUS_PORT_WEIGHT;
            warnings.push(format!(
                "Suspicious port open: {} ({})",
                open.port, open.service
            ));
        } else {
            threat_score += OPEN_PORT_WEIGHT;
        }
    }

    let level = if threat_score >= 30 {
        ThreatLevel::High
    } else if threat_score >= 15 {
        ThreatLevel::Medium
    } else {
        ThreatLevel::Low
    };

    debug!(threat_score, %level, "Threat assessment computed.");

    ThreatAssessment {
        threat_score,
        level,
        warnings,
        open_port_count: scan.open_ports.len(),
    }
}
