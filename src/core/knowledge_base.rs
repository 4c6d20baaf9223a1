//! This module acts as the central "brain" of the engine.
//! It contains the static, read-only intelligence tables that drive both the
//! host probe and the threat classifier: candidate ports and their canonical
//! service names, the Ethiopian organization registry, IP range attributions,
//! file-type mappings, and the suspicious-keyword list.
//! Making this data-driven allows the tables to be updated without touching
//! any detection logic.

use crate::core::models::OrgCategory;

/// A group of known organizational domains sharing one category.
pub struct OrganizationGroup {
    pub category: OrgCategory,
    pub domains: &'static [&'static str],
}

/// The registry of known Ethiopian organizations, grouped by sector.
/// Containment matching walks the groups in declaration order and stops at
/// the first hit, so a domain listed in two groups resolves to the first.
pub static ETHIOPIAN_ORGS: &[OrganizationGroup] = &[
    OrganizationGroup {
        category: OrgCategory::Financial,
        domains: &[
            "cbe.et",
            "dbee.et",
            "awashbank.com",
            "dashenbanksc.com",
            "nibbank.com",
            "unitybank.com",
            "abyssiniabank.com",
        ],
    },
    OrganizationGroup {
        category: OrgCategory::Government,
        domains: &[
            "gov.et",
            "mfa.gov.et",
            "mofed.gov.et",
            "moh.gov.et",
            "ethio telecom",
            "ethiopian airlines",
            "eea.gov.et",
        ],
    },
    OrganizationGroup {
        category: OrgCategory::Telecom,
        domains: &["ethiotelecom.et", "telecom.et", "ethiotelecom.com.et"],
    },
    OrganizationGroup {
        category: OrgCategory::CriticalInfrastructure,
        domains: &["eep.com.et", "eeu.gov.et", "ethiopianairlines.com"],
    },
];

/// The fixed, ordered candidate port set probed during a host scan.
/// `open_ports` in a scan result is always sorted into this order.
pub static CANDIDATE_PORTS: &[u16] = &[
    21, 22, 23, 25, 53, 80, 110, 443, 993, 995, 1433, 3306, 3389, 5432, 8000, 8080, 8443, 9000,
    3000,
];

/// Ports commonly abused as attack vectors; each one open adds extra weight
/// to the threat score and emits a warning.
pub static SUSPICIOUS_PORTS: &[u16] = &[23, 135, 139, 445, 1433, 3389];

/// Canonical service names for the candidate port set.
static PORT_SERVICES: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (80, "HTTP"),
    (110, "POP3"),
    (443, "HTTPS"),
    (993, "IMAPS"),
    (995, "POP3S"),
    (1433, "MSSQL"),
    (3306, "MySQL"),
    (3389, "RDP"),
    (5432, "PostgreSQL"),
    (8000, "HTTP-Alt"),
    (8080, "HTTP-Proxy"),
    (8443, "HTTPS-Alt"),
    (9000, "Jenkins"),
    (3000, "Node.js"),
];

/// Looks up the canonical service name for a port.
/// Unmapped ports report `"Unknown"`.
pub fn service_name(port: u16) -> &'static str {
    PORT_SERVICES
        .iter()
        .find(|(candidate, _)| *candidate == port)
        .map(|(_, service)| *service)
        .unwrap_or("Unknown")
}

/// Ethiopian IP address ranges and their provider attribution, as
/// dotted-prefix strings.
pub static ETHIOPIAN_IP_RANGES: &[(&str, &str)] = &[
    ("196.188", "Ethio Telecom"),
    ("196.189", "Ethio Telecom"),
    ("197.156", "Ethio Telecom"),
    ("197.157", "Ethio Telecom"),
];

/// Returns the provider name for an IP inside a known Ethiopian range.
/// First prefix match wins.
pub fn ethiopian_provider(ip: &str) -> Option<&'static str> {
    ETHIOPIAN_IP_RANGES
        .iter()
        .find(|(prefix, _)| ip.starts_with(prefix))
        .map(|(_, provider)| *provider)
}

/// File extension to coarse file-type category.
static FILE_TYPES: &[(&str, &str)] = &[
    ("exe", "executable"),
    ("dll", "library"),
    ("pdf", "document"),
    ("doc", "document"),
    ("docx", "document"),
    ("xls", "spreadsheet"),
    ("xlsx", "spreadsheet"),
    ("js", "script"),
    ("zip", "archive"),
    ("rar", "archive"),
    ("py", "script"),
    ("sh", "script"),
];

/// Classifies a file extension (already lowercased) into a category.
/// Unknown extensions map to `"unknown"`.
pub fn file_type(extension: &str) -> &'static str {
    FILE_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == extension)
        .map(|(_, category)| *category)
        .unwrap_or("unknown")
}

/// Terms in a filename that warrant a suspicious-naming indicator.
pub static SUSPICIOUS_FILE_KEYWORDS: &[&str] = &["keylogger", "ransomware", "botnet", "backdoor"];

/// International threat-intelligence feeds (name, source URL). Lookups
/// against these are stubbed; the table documents the integration points.
pub static THREAT_FEEDS: &[(&str, &str)] = &[
    ("openphish", "https://openphish.com/feed.txt"),
    ("urlhaus", "https://urlhaus.abuse.ch/downloads/text_online/"),
    (
        "phishing_database",
        "https://raw.githubusercontent.com/mitchellkrogza/Phishing.Database/master/phishing-links-ACTIVE.txt",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_names_resolve_for_mapped_ports() {
        assert_eq!(service_name(22), "SSH");
        assert_eq!(service_name(3389), "RDP");
        assert_eq!(service_name(3000), "Node.js");
    }

    #[test]
    fn unmapped_port_reports_unknown_service() {
        assert_eq!(service_name(31337), "Unknown");
    }

    #[test]
    fn every_candidate_port_has_a_service_name() {
        for &port in CANDIDATE_PORTS {
            assert_ne!(service_name(port), "Unknown", "port {port} is unmapped");
        }
    }

    #[test]
    fn suspicious_ports_include_classic_attack_vectors() {
        assert!(SUSPICIOUS_PORTS.contains(&23));
        assert!(SUSPICIOUS_PORTS.contains(&3389));
        assert!(!SUSPICIOUS_PORTS.contains(&443));
    }

    #[test]
    fn ethiopian_ranges_attribute_to_provider() {
        assert_eq!(ethiopian_provider("196.188.1.1"), Some("Ethio Telecom"));
        assert_eq!(ethiopian_provider("197.157.42.9"), Some("Ethio Telecom"));
        assert_eq!(ethiopian_provider("8.8.8.8"), None);
    }

    #[test]
    fn file_types_map_known_extensions() {
        assert_eq!(file_type("exe"), "executable");
        assert_eq!(file_type("docx"), "document");
        assert_eq!(file_type("sh"), "script");
        assert_eq!(file_type("xyz"), "unknown");
    }
}
