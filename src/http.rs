//! Shared HTTP client and a single GET helper used by every probe.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::config::Settings;

const USER_AGENT: &str = concat!("deploy-verify/", env!("CARGO_PKG_VERSION"));

/// Build the client reused for the whole run.
pub fn build_client(settings: &Settings) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(secs) = settings.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to create HTTP client")
}

#[derive(Debug)]
pub struct Fetched {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub x_frame_options: Option<String>,
    pub body: String,
}

fn header_value(headers: &HeaderMap, name: impl reqwest::header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// GET `url` and read the full body as text.
pub async fn fetch(client: &Client, url: &str) -> Result<Fetched> {
    tracing::debug!(%url, "GET");
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    let headers = response.headers();
    let content_type = header_value(headers, CONTENT_TYPE);
    let x_frame_options = header_value(headers, "x-frame-options");

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read response body from {url}"))?;
    tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "response");

    Ok(Fetched {
        status,
        content_type,
        x_frame_options,
        body,
    })
}
