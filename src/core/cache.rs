//! File system cache for fetched pages and rendered charts.
//!
//! Everything lives under `~/.cache/ffl-draft/`: raw HTML pages keyed by
//! their URL, and a `charts/` directory for PNG output.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

const APP_DIR: &str = "ffl-draft";

/// Path: ~/.cache/ffl-draft
pub fn cache_root() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(APP_DIR)
}

/// Path: ~/.cache/ffl-draft/pages/{sanitized url}.html
pub fn page_cache_path(url: &str) -> PathBuf {
    cache_root()
        .join("pages")
        .join(format!("{}.html", url_cache_key(url)))
}

/// Path: ~/.cache/ffl-draft/charts
pub fn charts_dir() -> PathBuf {
    cache_root().join("charts")
}

/// Reduce a URL to a file-name-safe key, dropping the scheme.
pub fn url_cache_key(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    without_scheme
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}
