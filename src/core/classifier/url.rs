// src/core/classifier/url.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::core::knowledge_base::{ETHIOPIAN_ORGS, THREAT_FEEDS};
use crate::core::models::{
    FeedIntel, FeedStatus, IndicatorKind, OrgCategory, OrganizationContext, RiskLevel, Severity,
    ThreatIndicator, UrlAnalysis,
};

/// A URL detection rule: a precompiled pattern and the indicator it emits.
struct UrlPattern<'a> {
    regex: &'a Lazy<Regex>,
    description: &'a str,
}

// Statically compiled regexes. The `[-.]?` classes let the patterns catch
// "login-secure", "login.secure", and "loginsecure" alike.
static RE_LOGIN_SECURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"login[-.]?secure").unwrap());
static RE_VERIFY_ACCOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"verify[-.]?account").unwrap());
static RE_BANKING_UPDATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"banking[-.]?update").unwrap());
static RE_SECURITY_ALERT: Lazy<Regex> = Lazy::new(|| Regex::new(r"security[-.]?alert").unwrap());
static RE_PASSWORD_RESET: Lazy<Regex> = Lazy::new(|| Regex::new(r"password[-.]?reset").unwrap());
static RE_CONFIRM_IDENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"confirm[-.]?identity").unwrap());

static RE_EXE_DOWNLOAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.exe$").unwrap());
static RE_SCR_DOWNLOAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.scr$").unwrap());
static RE_ZIP_DOWNLOAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.zip$").unwrap());
static RE_GDRIVE_HOSTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"drive.*google.*com").unwrap());
static RE_DROPBOX_HOSTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"dropbox.*com").unwrap());

/// Lure wordings that phishing pages embed in their URLs.
static PHISHING_PATTERNS: &[UrlPattern] = &[
    UrlPattern { regex: &RE_LOGIN_SECURE, description: "Suspicious login page pattern" },
    UrlPattern { regex: &RE_VERIFY_ACCOUNT, description: "Account verification phishing" },
    UrlPattern { regex: &RE_BANKING_UPDATE, description: "Banking update phishing" },
    UrlPattern { regex: &RE_SECURITY_ALERT, description: "Fake security alert" },
    UrlPattern { regex: &RE_PASSWORD_RESET, description: "Password reset phishing" },
    UrlPattern { regex: &RE_CONFIRM_IDENTITY, description: "Identity confirmation phishing" },
];

/// Direct-download extensions and file-hosting services commonly abused for
/// malware distribution.
static MALWARE_PATTERNS: &[UrlPattern] = &[
    UrlPattern { regex: &RE_EXE_DOWNLOAD, description: "Executable file download" },
    UrlPattern { regex: &RE_SCR_DOWNLOAD, description: "Screen saver file (potential malware)" },
    UrlPattern { regex: &RE_ZIP_DOWNLOAD, description: "Compressed archive (common malware vector)" },
    UrlPattern { regex: &RE_GDRIVE_HOSTED, description: "Google Drive malware distribution" },
    UrlPattern { regex: &RE_DROPBOX_HOSTED, description: "Dropbox malware distribution" },
];

/// Static date carried by the feed stub until real feed polling lands.
const FEED_LAST_UPDATED: &str = "2024-01-10";

/// Analyzes a URL against the pattern tables and the organization registry.
///
/// Pure over the static tables; performs no network I/O and never fails for
/// a well-typed input. Indicators accumulate in check order: phishing
/// wording, typosquatting, then malware-distribution patterns.
pub fn analyze_url(url: &str) -> UrlAnalysis {
    info!(url, "Starting URL analysis.");
    let url_lower = url.to_lowercase();

    let organization_context = organization_context(&url_lower);

    let mut indicators = Vec::new();
    indicators.extend(detect_phishing(&url_lower));
    indicators.extend(detect_typosquatting(&url_lower));
    indicators.extend(detect_malware_distribution(&url_lower));

    let international_intel = check_international_feeds(&url_lower);

    let (risk_level, confidence) = reduce_url_risk(&indicators);

    info!(
        indicators = indicators.len(),
        %risk_level,
        confidence,
        "URL analysis finished."
    );

    UrlAnalysis {
        url: url.to_string(),
        risk_level,
        confidence,
        threat_indicators: indicators,
        organization_context,
        international_intel,
    }
}

/// Matches the URL against the organization registry. The first containing
/// domain wins, in table order; with no exact match, `.et` or "ethiopia"
/// containment still flags a potential, unverified Ethiopian target.
fn organization_context(url_lower: &str) -> OrganizationContext {
    for group in ETHIOPIAN_ORGS {
        if let Some(domain) = group.domains.iter().find(|d| url_lower.contains(*d)) {
            debug!(domain, category = %group.category, "Organization match.");
            return OrganizationContext {
                is_ethiopian: true,
                organization_type: group.category,
                verified: true,
                matched_domain: Some(domain.to_string()),
            };
        }
    }

    if url_lower.contains(".et") || url_lower.contains("ethiopia") {
        debug!("No exact organization match, but the URL carries an Ethiopian signal.");
        return OrganizationContext {
            is_ethiopian: true,
            organization_type: OrgCategory::PotentialEthiopian,
            verified: false,
            matched_domain: None,
        };
    }

    OrganizationContext::unknown()
}

/// Runs the phishing wording patterns. Each match appends one independent
/// indicator; a URL can accumulate several.
fn detect_phishing(url_lower: &str) -> Vec<ThreatIndicator> {
    let mut indicators = Vec::new();
    for pattern in PHISHING_PATTERNS {
        if pattern.regex.is_match(url_lower) {
            debug!(description = pattern.description, "Phishing pattern matched.");
            indicators.push(ThreatIndicator::new(
                IndicatorKind::Phishing,
                Severity::Medium,
                pattern.description,
                75,
            ));
        }
    }
    indicators
}

/// Synthesizes the lexical variants an attacker would register for a
/// legitimate domain.
fn typosquat_variants(domain: &str) -> [String; 5] {
    [
        domain.replace('.', "-"),
        domain.replace('.', ""),
        format!("{domain}-login"),
        format!("{domain}-secure"),
        format!("www-{domain}"),
    ]
}

/// Tests the URL against typosquat variants of every registered domain.
/// The whole table runs without short-circuiting, since a URL can collide
/// with several organizations at once.
fn detect_typosquatting(url_lower: &str) -> Vec<ThreatIndicator> {
    let mut indicators = Vec::new();
    for group in ETHIOPIAN_ORGS {
        for domain in group.domains {
            let variants = typosquat_variants(domain);
            if variants.iter().any(|variant| url_lower.contains(variant)) {
                debug!(domain, "Typosquatting variant matched.");
                let mut indicator = ThreatIndicator::new(
                    IndicatorKind::Typosquatting,
                    Severity::High,
                    &format!("Potential typosquatting of {domain}"),
                    85,
                );
                indicator.target_organization = Some(domain.to_string());
                indicators.push(indicator);
            }
        }
    }
    indicators
}

/// Runs the malware-distribution patterns.
fn detect_malware_distribution(url_lower: &str) -> Vec<ThreatIndicator> {
    let mut indicators = Vec::new();
    for pattern in MALWARE_PATTERNS {
        if pattern.regex.is_match(url_lower) {
            debug!(description = pattern.description, "Malware pattern matched.");
            indicators.push(ThreatIndicator::new(
                IndicatorKind::MalwareDistribution,
                Severity::High,
                pattern.description,
                80,
            ));
        }
    }
    indicators
}

/// Stubbed lookup against the international feeds: every feed reports
/// `not_detected`. Live feed polling is the extension point behind this.
fn check_international_feeds(_url_lower: &str) -> FeedIntel {
    FeedIntel {
        results: THREAT_FEEDS
            .iter()
            .map(|(feed, _)| FeedStatus {
                feed: feed.to_string(),
                status: "not_detected".to_string(),
            })
            .collect(),
        last_updated: FEED_LAST_UPDATED.to_string(),
        confidence: 90,
    }
}

/// Reduces the collected indicators to a verdict. The level is the highest
/// indicator severity; confidence grows with the indicator count, capped at
/// 95, while an indicator-free URL is asserted clean at a fixed 85.
pub fn reduce_url_risk(indicators: &[ThreatIndicator]) -> (RiskLevel, u8) {
    let risk_level = indicators
        .iter()
        .map(|indicator| indicator.severity)
        .max()
        .map(RiskLevel::from)
        .unwrap_or(RiskLevel::Low);

    let confidence = if indicators.is_empty() {
        85
    } else {
        (70 + 10 * indicators.len() as u32).min(95) as u8
    };

    (risk_level, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbe_typosquat_is_flagged_with_target_organization() {
        let analysis = analyze_url("http://cbe-et-login-secure.com");
        let typosquat = analysis
            .threat_indicators
            .iter()
            .find(|i| i.kind == IndicatorKind::Typosquatting)
            .expect("expected a typosquatting indicator");

        assert_eq!(typosquat.severity, Severity::High);
        assert_eq!(typosquat.confidence, 85);
        assert_eq!(typosquat.target_organization.as_deref(), Some("cbe.et"));
        assert_eq!(analysis.risk_level, RiskLevel::High);
    }

    #[test]
    fn clean_url_is_low_risk_with_fixed_confidence() {
        let analysis = analyze_url("https://example.com/about");
        assert!(analysis.threat_indicators.is_empty());
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.confidence, 85);
        assert!(!analysis.organization_context.is_ethiopian);
    }

    #[test]
    fn phishing_wording_yields_medium_indicator() {
        let analysis = analyze_url("http://example.com/verify-account");
        let phishing = analysis
            .threat_indicators
            .iter()
            .find(|i| i.kind == IndicatorKind::Phishing)
            .expect("expected a phishing indicator");

        assert_eq!(phishing.severity, Severity::Medium);
        assert_eq!(phishing.confidence, 75);
        assert_eq!(phishing.description, "Account verification phishing");
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn exe_download_yields_high_malware_indicator() {
        let analysis = analyze_url("http://files.example.com/update.exe");
        let malware = analysis
            .threat_indicators
            .iter()
            .find(|i| i.kind == IndicatorKind::MalwareDistribution)
            .expect("expected a malware indicator");

        assert_eq!(malware.severity, Severity::High);
        assert_eq!(malware.confidence, 80);
        assert_eq!(analysis.risk_level, RiskLevel::High);
    }

    #[test]
    fn exact_organization_match_wins_over_weak_signal() {
        let analysis = analyze_url("https://cbe.et/login");
        let context = &analysis.organization_context;
        assert!(context.is_ethiopian);
        assert!(context.verified);
        assert_eq!(context.organization_type, OrgCategory::Financial);
        assert_eq!(context.matched_domain.as_deref(), Some("cbe.et"));
    }

    #[test]
    fn et_tld_without_exact_match_is_potential_and_unverified() {
        let analysis = analyze_url("https://somewhere.et/page");
        let context = &analysis.organization_context;
        assert!(context.is_ethiopian);
        assert!(!context.verified);
        assert_eq!(context.organization_type, OrgCategory::PotentialEthiopian);
        assert!(context.matched_domain.is_none());
    }

    #[test]
    fn feed_stub_reports_every_feed_not_detected() {
        let analysis = analyze_url("https://example.com");
        let intel = &analysis.international_intel;
        assert_eq!(intel.results.len(), THREAT_FEEDS.len());
        assert!(intel.results.iter().all(|r| r.status == "not_detected"));
        assert_eq!(intel.confidence, 90);
    }

    #[test]
    fn confidence_scales_with_indicator_count_and_caps() {
        let one = vec![ThreatIndicator::new(
            IndicatorKind::Phishing,
            Severity::Medium,
            "x",
            75,
        )];
        assert_eq!(reduce_url_risk(&one), (RiskLevel::Medium, 80));

        let two: Vec<_> = std::iter::repeat_with(|| {
            ThreatIndicator::new(IndicatorKind::Phishing, Severity::Medium, "x", 75)
        })
        .take(2)
        .collect();
        assert_eq!(reduce_url_risk(&two).1, 90);

        let four: Vec<_> = std::iter::repeat_with(|| {
            ThreatIndicator::new(IndicatorKind::Phishing, Severity::Medium, "x", 75)
        })
        .take(4)
        .collect();
        // min(95, 70 + 40) caps at 95.
        assert_eq!(reduce_url_risk(&four).1, 95);

        assert_eq!(reduce_url_risk(&[]), (RiskLevel::Low, 85));
    }

    #[test]
    fn highest_severity_dominates_the_risk_level() {
        let mixed = vec![
            ThreatIndicator::new(IndicatorKind::Phishing, Severity::Medium, "a", 75),
            ThreatIndicator::new(IndicatorKind::MalwareDistribution, Severity::High, "b", 80),
        ];
        assert_eq!(reduce_url_risk(&mixed).0, RiskLevel::High);
    }

    #[test]
    fn variant_synthesis_produces_the_five_documented_shapes() {
        let variants = typosquat_variants("cbe.et");
        assert_eq!(
            variants,
            [
                "cbe-et".to_string(),
                "cbeet".to_string(),
                "cbe.et-login".to_string(),
                "cbe.et-secure".to_string(),
                "www-cbe.et".to_string(),
            ]
        );
    }

    #[test]
    fn multiple_phishing_patterns_accumulate_independently() {
        let analysis = analyze_url("http://bad.example/password-reset/security-alert");
        let phishing_count = analysis
            .threat_indicators
            .iter()
            .filter(|i| i.kind == IndicatorKind::Phishing)
            .count();
        assert_eq!(phishing_count, 2);
    }
}
