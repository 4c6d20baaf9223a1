// src/core/classifier/ip.rs

use tracing::{debug, info};

use crate::core::knowledge_base::ethiopian_provider;
use crate::core::models::{
    AsnInfo, EthiopianContext, GeoLocation, IpAnalysis, IpReputation, RiskLevel,
};

const UNKNOWN: &str = "Unknown";
/// ASN registered to Ethio Telecom.
const ETHIO_TELECOM_ASN: &str = "AS24757";

/// Analyzes an IP against the Ethiopian range table and the deterministic
/// geolocation/ASN/reputation stubs.
///
/// No network I/O; the stub lookups are the declared extension points for
/// real geolocation and reputation feeds.
pub fn analyze_ip(ip: &str) -> IpAnalysis {
    info!(ip, "Starting IP analysis.");

    let ethiopian_context = ethiopian_context(ip);
    let geo_location = geolocate(ip);
    let asn_info = asn_info(ip);
    let reputation = check_reputation(ip);

    let (risk_level, confidence) = reduce_ip_risk(&reputation, ethiopian_context.is_some());

    info!(%risk_level, confidence, "IP analysis finished.");

    IpAnalysis {
        ip: ip.to_string(),
        risk_level,
        confidence,
        threat_indicators: Vec::new(),
        geo_location,
        asn_info,
        reputation,
        ethiopian_context,
    }
}

/// Prefix-matches the IP against the Ethiopian range table. First match
/// wins; absence yields no context block at all.
fn ethiopian_context(ip: &str) -> Option<EthiopianContext> {
    ethiopian_provider(ip).map(|provider| {
        debug!(ip, provider, "IP falls inside a known Ethiopian range.");
        EthiopianContext {
            is_ethiopian: true,
            provider: provider.to_string(),
            confidence: 95,
        }
    })
}

/// Geolocation stub keyed on the Ethiopian prefix table.
fn geolocate(ip: &str) -> GeoLocation {
    match ethiopian_provider(ip) {
        Some(provider) => GeoLocation {
            country: "Ethiopia".to_string(),
            city: "Addis Ababa".to_string(),
            isp: provider.to_string(),
        },
        None => GeoLocation {
            country: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            isp: UNKNOWN.to_string(),
        },
    }
}

/// ASN stub keyed on the Ethiopian prefix table.
fn asn_info(ip: &str) -> AsnInfo {
    match ethiopian_provider(ip) {
        Some(provider) => AsnInfo {
            asn: ETHIO_TELECOM_ASN.to_string(),
            organization: provider.to_string(),
        },
        None => AsnInfo {
            asn: UNKNOWN.to_string(),
            organization: UNKNOWN.to_string(),
        },
    }
}

/// Reputation stub: always a clean record until a real feed plugs in.
fn check_reputation(_ip: &str) -> IpReputation {
    IpReputation {
        abuse_score: 0,
        threat_level: "low".to_string(),
        malicious_activity: "none_detected".to_string(),
    }
}

/// Reduces the accumulated risk factors to a verdict: a high abuse score
/// counts 1.0, Ethiopian context counts 0.5; >= 1.0 maps to Medium, >= 0.5
/// to a cautious Low, anything else to a confident Low.
///
/// Confidence is deliberately not monotonic in risk here: a clean verdict
/// (90) is asserted more strongly than one resting on a weak signal (80),
/// and Medium (75) is the least certain tier of all.
pub fn reduce_ip_risk(reputation: &IpReputation, is_ethiopian: bool) -> (RiskLevel, u8) {
    let mut risk_factors = 0.0f32;

    if reputation.abuse_score > 50 {
        risk_factors += 1.0;
    }
    if is_ethiopian {
        risk_factors += 0.5;
    }

    if risk_factors >= 1.0 {
        (RiskLevel::Medium, 75)
    } else if risk_factors >= 0.5 {
        (RiskLevel::Low, 80)
    } else {
        (RiskLevel::Low, 90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reputation(abuse_score: u32) -> IpReputation {
        IpReputation {
            abuse_score,
            threat_level: "low".to_string(),
            malicious_activity: "none_detected".to_string(),
        }
    }

    #[test]
    fn ethiopian_range_attaches_context_with_fixed_confidence() {
        let analysis = analyze_ip("196.188.34.12");
        let context = analysis.ethiopian_context.expect("expected context");
        assert!(context.is_ethiopian);
        assert_eq!(context.provider, "Ethio Telecom");
        assert_eq!(context.confidence, 95);

        assert_eq!(analysis.geo_location.country, "Ethiopia");
        assert_eq!(analysis.geo_location.city, "Addis Ababa");
        assert_eq!(analysis.asn_info.asn, "AS24757");
    }

    #[test]
    fn foreign_ip_has_no_context_and_unknown_stubs() {
        let analysis = analyze_ip("8.8.8.8");
        assert!(analysis.ethiopian_context.is_none());
        assert_eq!(analysis.geo_location.country, "Unknown");
        assert_eq!(analysis.asn_info.asn, "Unknown");
    }

    #[test]
    fn no_signals_is_a_confident_low() {
        assert_eq!(reduce_ip_risk(&reputation(0), false), (RiskLevel::Low, 90));
    }

    #[test]
    fn ethiopian_context_alone_is_a_cautious_low() {
        assert_eq!(reduce_ip_risk(&reputation(0), true), (RiskLevel::Low, 80));
    }

    #[test]
    fn high_abuse_score_is_medium_with_the_lowest_confidence() {
        assert_eq!(reduce_ip_risk(&reputation(51), false), (RiskLevel::Medium, 75));
        // Boundary: exactly 50 does not count as a risk factor.
        assert_eq!(reduce_ip_risk(&reputation(50), false), (RiskLevel::Low, 90));
    }

    #[test]
    fn both_signals_still_map_to_medium() {
        assert_eq!(reduce_ip_risk(&reputation(80), true), (RiskLevel::Medium, 75));
    }

    #[test]
    fn stub_reputation_keeps_ip_analysis_indicator_free() {
        let analysis = analyze_ip("196.189.0.1");
        assert!(analysis.threat_indicators.is_empty());
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.confidence, 80);
    }
}
