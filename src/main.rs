// src/main.rs

use std::path::Path;

use chrono::Utc;
use color_eyre::eyre::{Result, bail};
use url::Url;

mod core;
mod logging;

use crate::core::classifier::{analyze_file, analyze_ip, analyze_url};
use crate::core::models::{EngineError, ScanReport};
use crate::core::probe::{assess::assess_threat, scan_host};

const USAGE: &str = "usage: vigil-rs-engine <scan|url|ip|file> <target>";

/// Thin calling layer around the engine: pick a pipeline, run it, print the
/// result as JSON. Everything interesting happens in `core`.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let mut args = std::env::args().skip(1);
    let (Some(command), Some(raw_target)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };

    // Empty targets are the caller's responsibility, so reject them here
    // before anything reaches the engine.
    let target = raw_target.trim();
    if target.is_empty() {
        bail!(EngineError::EmptyTarget);
    }

    match command.as_str() {
        "scan" => {
            let scan = scan_host(target).await?;
            let threat_assessment = assess_threat(&scan);
            let report = ScanReport {
                scan,
                threat_assessment,
                scanned_at: Utc::now(),
            };
            print_json(&report)
        }
        "url" => print_json(&analyze_url(&normalize_url(target))),
        "ip" => print_json(&analyze_ip(target)),
        "file" => {
            let data = tokio::fs::read(target).await?;
            let filename = Path::new(target)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(target);
            print_json(&analyze_file(&data, filename))
        }
        other => bail!("unknown command: {other}\n{USAGE}"),
    }
}

/// Gives scheme-less input an https:// prefix and normalizes it through the
/// url parser; input the parser rejects is analyzed as typed.
fn normalize_url(raw: &str) -> String {
    let candidate = if !raw.starts_with("http://") && !raw.starts_with("https://") {
        format!("https://{raw}")
    } else {
        raw.to_string()
    };

    match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(_) => candidate,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::normalize_url;

    #[test]
    fn bare_input_gains_https_scheme() {
        assert_eq!(normalize_url("cbe.et"), "https://cbe.et/");
    }

    #[test]
    fn existing_scheme_is_preserved() {
        assert_eq!(
            normalize_url("http://example.com/a.exe"),
            "http://example.com/a.exe"
        );
    }
}
