// src/core/classifier/mod.rs

// This file acts as the public interface for the `classifier` module.
// The three target-type pipelines are independent pure functions over the
// static tables in `knowledge_base`; none of them performs network I/O.
pub mod file;
pub mod ip;
pub mod url;

pub use file::analyze_file;
pub use ip::analyze_ip;
pub use url::analyze_url;
