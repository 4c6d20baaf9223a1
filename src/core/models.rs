// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Engine Errors ---

/// The only two failure modes the engine surfaces to its caller. Every
/// network-level problem (unreachable host, refused connect, failed PTR
/// lookup) is absorbed into a boolean or sentinel field instead, so a
/// well-formed, non-empty target can never make the engine return `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The target is not a syntactically valid IPv4 dotted quad.
    InvalidAddress(String),
    /// The target string was empty; callers must reject this before probing.
    EmptyTarget,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidAddress(addr) => write!(f, "invalid IPv4 address: {addr}"),
            EngineError::EmptyTarget => write!(f, "target must not be empty"),
        }
    }
}

impl std::error::Error for EngineError {}

// --- Severity & Risk Enums ---

/// Severity of a single threat indicator. Ordering follows declaration
/// order, so `max()` over a set of indicators yields the dominant severity.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Final risk verdict of an analysis, reduced from the collected indicators.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl From<Severity> for RiskLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => RiskLevel::Low,
            Severity::Medium => RiskLevel::Medium,
            Severity::High => RiskLevel::High,
        }
    }
}

/// Threat level of a scanned host, a step function of the threat score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum::Display)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

// --- Host Probe Models ---

/// One open port found during the scan, with its canonical service name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenPort {
    pub port: u16,
    pub service: String,
    pub status: String,
}

impl OpenPort {
    pub fn new(port: u16, service: &str) -> Self {
        Self {
            port,
            service: service.to_string(),
            status: "open".to_string(),
        }
    }
}

/// Private/public classification of an address, derived purely from its
/// octets against the RFC1918 ranges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetworkKind {
    Private,
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkClass {
    #[serde(rename = "type")]
    pub kind: NetworkKind,
    pub range: String,
}

impl NetworkClass {
    pub fn private(range: &str) -> Self {
        Self {
            kind: NetworkKind::Private,
            range: range.to_string(),
        }
    }

    pub fn public() -> Self {
        Self {
            kind: NetworkKind::Public,
            range: "Internet".to_string(),
        }
    }
}

/// The complete result of a host scan. Immutable once returned; `address`
/// is always a validated dotted quad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostScan {
    pub address: String,
    pub reachable: bool,
    pub open_ports: Vec<OpenPort>,
    pub hostname: String,
    pub network: NetworkClass,
}

/// Heuristic threat assessment derived from a `HostScan` by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatAssessment {
    pub threat_score: u32,
    pub level: ThreatLevel,
    pub warnings: Vec<String>,
    pub open_port_count: usize,
}

/// A scan plus its assessment, stamped by the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan: HostScan,
    pub threat_assessment: ThreatAssessment,
    pub scanned_at: DateTime<Utc>,
}

// --- Classifier Models ---

/// Machine-readable category of a threat indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndicatorKind {
    Phishing,
    Typosquatting,
    MalwareDistribution,
    SuspiciousExecutable,
    ObfuscatedCode,
    SuspiciousNaming,
}

/// One discrete piece of evidence contributing to a risk verdict.
/// Indicators accumulate in check-execution order, never sorted by severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatIndicator {
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub severity: Severity,
    pub description: String,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_organization: Option<String>,
}

impl ThreatIndicator {
    pub fn new(kind: IndicatorKind, severity: Severity, description: &str, confidence: u8) -> Self {
        Self {
            kind,
            severity,
            description: description.to_string(),
            confidence,
            target_organization: None,
        }
    }
}

/// Category of a known Ethiopian organization, or the weaker signals used
/// when no exact domain match exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrgCategory {
    Financial,
    Government,
    Telecom,
    CriticalInfrastructure,
    PotentialEthiopian,
    Unknown,
}

/// Whether a URL belongs to (or plausibly impersonates) a known
/// Ethiopian organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationContext {
    pub is_ethiopian: bool,
    pub organization_type: OrgCategory,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_domain: Option<String>,
}

impl OrganizationContext {
    pub fn unknown() -> Self {
        Self {
            is_ethiopian: false,
            organization_type: OrgCategory::Unknown,
            verified: false,
            matched_domain: None,
        }
    }
}

/// Status of a single external threat-intelligence feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub feed: String,
    pub status: String,
}

/// The stubbed international-feed block. Real feed integration is the
/// declared extension point behind this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedIntel {
    pub results: Vec<FeedStatus>,
    pub last_updated: String,
    pub confidence: u8,
}

/// Deterministic geolocation stub, keyed on the Ethiopian prefix table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country: String,
    pub city: String,
    pub isp: String,
}

/// Deterministic ASN stub, keyed on the Ethiopian prefix table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsnInfo {
    pub asn: String,
    pub organization: String,
}

/// Deterministic reputation stub; a real reputation feed plugs in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpReputation {
    pub abuse_score: u32,
    pub threat_level: String,
    pub malicious_activity: String,
}

/// Context attached when an IP prefix-matches a known Ethiopian range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthiopianContext {
    pub is_ethiopian: bool,
    pub provider: String,
    pub confidence: u8,
}

// --- Analysis Results ---

/// Result of a URL threat analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlAnalysis {
    pub url: String,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub threat_indicators: Vec<ThreatIndicator>,
    pub organization_context: OrganizationContext,
    pub international_intel: FeedIntel,
}

/// Result of an IP threat analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAnalysis {
    pub ip: String,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub threat_indicators: Vec<ThreatIndicator>,
    pub geo_location: GeoLocation,
    pub asn_info: AsnInfo,
    pub reputation: IpReputation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethiopian_context: Option<EthiopianContext>,
}

/// Result of a file artifact analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub filename: String,
    pub file_size: usize,
    pub file_hash: String,
    pub file_type: String,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub threat_indicators: Vec<ThreatIndicator>,
}
