// src/core/mod.rs

// This makes the engine's modules available to the rest of the application.
// The `mod.rs` file acts as the root of the `core` module.

/// Contains all data structures and models used throughout the engine,
/// such as `HostScan`, `ThreatAssessment`, the analysis results, and the
/// severity/risk enums.
pub mod models;

/// Houses the host probe: liveness check, bounded port scan, reverse DNS,
/// network classification, and the network-threat assessment.
pub mod probe;

/// Houses the heuristic threat classifier with its three target-type
/// pipelines (URL, IP, file).
pub mod classifier;

/// Contains the static, read-only intelligence tables that drive both the
/// probe and the classifier: port/service maps, the organization registry,
/// IP range attributions, and keyword lists.
pub mod knowledge_base;
