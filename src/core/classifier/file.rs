// src/core/classifier/file.rs

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::core::knowledge_base::{SUSPICIOUS_FILE_KEYWORDS, file_type};
use crate::core::models::{FileAnalysis, IndicatorKind, RiskLevel, Severity, ThreatIndicator};

/// Executables below this size are suspected droppers.
const SMALL_EXECUTABLE_BYTES: usize = 10_000;

/// Call patterns that betray obfuscated or stager code when found inside
/// file content.
static OBFUSCATION_MARKERS: &[&str] = &["eval(", "base64_decode"];

/// Analyzes a file artifact: content hash, file-type classification, and the
/// static heuristics (small executable, embedded obfuscation markers,
/// suspicious naming).
///
/// Pure over the static tables; undecodable content is tolerated via lossy
/// UTF-8 decoding rather than surfaced as an error.
pub fn analyze_file(data: &[u8], filename: &str) -> FileAnalysis {
    info!(filename, size = data.len(), "Starting file analysis.");

    let file_hash = hex::encode(Sha256::digest(data));
    let filename_lower = filename.to_lowercase();
    let file_type = file_type(extension_of(&filename_lower)).to_string();

    let mut indicators = Vec::new();
    indicators.extend(static_indicators(data, &filename_lower));
    indicators.extend(naming_indicators(&filename_lower));

    let (risk_level, confidence) = reduce_file_risk(indicators.len());

    info!(
        indicators = indicators.len(),
        %risk_level,
        file_type,
        "File analysis finished."
    );

    FileAnalysis {
        filename: filename.to_string(),
        file_size: data.len(),
        file_hash,
        file_type,
        risk_level,
        confidence,
        threat_indicators: indicators,
    }
}

/// The last dot-separated component; a dotless filename classifies by its
/// full name, which lands on "unknown" for anything not itself an extension.
fn extension_of(filename_lower: &str) -> &str {
    filename_lower.rsplit('.').next().unwrap_or(filename_lower)
}

/// Content-level heuristics: small-executable and embedded-script checks.
fn static_indicators(data: &[u8], filename_lower: &str) -> Vec<ThreatIndicator> {
    let mut indicators = Vec::new();

    if filename_lower.ends_with(".exe") && data.len() < SMALL_EXECUTABLE_BYTES {
        debug!(size = data.len(), "Small executable heuristic matched.");
        indicators.push(ThreatIndicator::new(
            IndicatorKind::SuspiciousExecutable,
            Severity::Medium,
            "Small executable file - potential dropper",
            70,
        ));
    }

    let content = String::from_utf8_lossy(data);
    if OBFUSCATION_MARKERS.iter().any(|m| content.contains(m)) {
        debug!("Obfuscation marker found in file content.");
        indicators.push(ThreatIndicator::new(
            IndicatorKind::ObfuscatedCode,
            Severity::High,
            "Potential code obfuscation detected",
            80,
        ));
    }

    indicators
}

/// Naming heuristic: one indicator per suspicious keyword contained in the
/// filename.
fn naming_indicators(filename_lower: &str) -> Vec<ThreatIndicator> {
    SUSPICIOUS_FILE_KEYWORDS
        .iter()
        .filter(|keyword| filename_lower.contains(*keyword))
        .map(|keyword| {
            debug!(keyword, "Suspicious filename keyword matched.");
            ThreatIndicator::new(
                IndicatorKind::SuspiciousNaming,
                Severity::Medium,
                &format!("Filename contains suspicious term: {keyword}"),
                65,
            )
        })
        .collect()
}

/// Reduces the indicator count to a verdict: three or more indicators make
/// a High, at least one a Medium, a clean file a Low.
pub fn reduce_file_risk(indicator_count: usize) -> (RiskLevel, u8) {
    if indicator_count >= 3 {
        (RiskLevel::High, 90)
    } else if indicator_count >= 1 {
        (RiskLevel::Medium, 80)
    } else {
        (RiskLevel::Low, 85)
    }
}
