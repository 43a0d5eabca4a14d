// src/schedule/fetch.rs
// =============================================================================
// Fetches pages from the registration site.
//
// One GET per call, no retries. Anything other than a 2xx response is an
// error that ends the run; running the command again is the retry.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

// Creates the HTTP client shared by a whole traversal
//
// Parameters:
//   timeout: per-request timeout, or None for reqwest's default (no timeout)
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().context("failed to create HTTP client")
}

// Fetches a page and returns its HTML
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("HTTP {} fetching {}", status.as_u16(), url));
    }

    let html = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {}", url))?;
    Ok(html)
}
