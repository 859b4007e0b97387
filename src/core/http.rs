//! HTTP client setup for scraping the league website

use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Browser-like user agent; the fantasy site serves a stripped page otherwise.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the shared client used for every page fetch.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
