//! Core utilities for the draft assistant
//!
//! - `cache`: File system caching of fetched pages and chart output paths
//! - `http`: Shared HTTP client construction
//! - `stats`: Means, deviations and least squares fits

pub mod cache;
pub mod http;
pub mod stats;

// Re-export commonly used items for convenience
pub use cache::{cache_root, charts_dir, page_cache_path, try_read_to_string, write_string};
pub use http::build_client;
