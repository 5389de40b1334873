use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Settings;
use crate::http::fetch;
use crate::target::BaseUrl;
use crate::types::CheckResult;

/// What a probe needs to talk to the deployment.
pub struct ProbeContext<'a> {
    pub client: &'a Client,
    pub base: &'a BaseUrl,
    pub settings: &'a Settings,
}

/// Verdict of a probe body that ran to completion.
#[derive(Debug, PartialEq)]
pub struct Outcome {
    pub passed: bool,
    pub message: String,
}

impl Outcome {
    fn pass(message: impl Into<String>) -> Self {
        Outcome {
            passed: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Outcome {
            passed: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    SiteAccessibility,
    ThirdPartyApi,
    StaticAssets,
    RoutingFallback,
    ResponseHeaders,
    Performance,
}

impl Probe {
    /// Run order.
    pub const ALL: [Probe; 6] = [
        Probe::SiteAccessibility,
        Probe::ThirdPartyApi,
        Probe::StaticAssets,
        Probe::RoutingFallback,
        Probe::ResponseHeaders,
        Probe::Performance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Probe::SiteAccessibility => "Site Accessibility",
            Probe::ThirdPartyApi => "Third-Party API",
            Probe::StaticAssets => "Static Assets",
            Probe::RoutingFallback => "Routing Fallback",
            Probe::ResponseHeaders => "Response Headers",
            Probe::Performance => "Performance",
        }
    }

    pub fn progress_label(&self) -> &'static str {
        match self {
            Probe::SiteAccessibility => "Checking site accessibility...",
            Probe::ThirdPartyApi => "Checking third-party anime API...",
            Probe::StaticAssets => "Checking static assets...",
            Probe::RoutingFallback => "Checking client-side routing...",
            Probe::ResponseHeaders => "Checking response headers...",
            Probe::Performance => "Measuring page load time...",
        }
    }

    /// Run the probe once. Never fails: errors become a failing result.
    pub async fn run(self, ctx: &ProbeContext<'_>) -> CheckResult {
        let start = Instant::now();
        let outcome = match self {
            Probe::SiteAccessibility => site_accessibility(ctx).await,
            Probe::ThirdPartyApi => third_party_api(ctx).await,
            Probe::StaticAssets => static_assets(ctx).await,
            Probe::RoutingFallback => routing_fallback(ctx).await,
            Probe::ResponseHeaders => response_headers(ctx).await,
            Probe::Performance => performance(ctx).await,
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let (passed, message) = match outcome {
            Ok(o) => (o.passed, o.message),
            Err(e) => {
                tracing::debug!(probe = self.name(), error = %format!("{e:#}"), "probe errored");
                (false, format!("{} error: {e:#}", self.name()))
            }
        };

        CheckResult {
            name: self.name().to_string(),
            passed,
            message,
            duration_ms,
        }
    }
}

async fn site_accessibility(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let page = fetch(ctx.client, ctx.base.as_str()).await?;
    if !page.status.is_success() {
        return Ok(Outcome::fail(format!(
            "Failed to load site: HTTP {}",
            page.status.as_u16()
        )));
    }
    if !page.body.contains(&ctx.settings.marker) {
        return Ok(Outcome::fail(format!(
            "Site loaded (HTTP {}) but application marker \"{}\" not found",
            page.status.as_u16(),
            ctx.settings.marker
        )));
    }
    Ok(Outcome::pass("Site is accessible and serves the application"))
}

/// Length of the listing in an API body: either a top-level array or the
/// `data` array of a top-level object.
fn listing_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => map.get("data").and_then(Value::as_array).map(Vec::len),
        _ => None,
    }
}

async fn third_party_api(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let resp = fetch(ctx.client, &ctx.settings.api_url).await?;
    if !resp.status.is_success() {
        return Ok(Outcome::fail(format!(
            "Anime API returned HTTP {}",
            resp.status.as_u16()
        )));
    }
    let value: Value =
        serde_json::from_str(&resp.body).context("anime API response is not valid JSON")?;
    match listing_len(&value) {
        Some(n) if n > 0 => Ok(Outcome::pass(format!("Anime API reachable ({n} item(s) returned)"))),
        Some(_) => Ok(Outcome::fail("Anime API returned an empty listing")),
        None => Ok(Outcome::fail("Anime API response contains no listing array")),
    }
}

/// Directory listings (paths ending in `/`) may legitimately be forbidden.
fn asset_acceptable(path: &str, status: StatusCode) -> bool {
    status.is_success() || (status == StatusCode::FORBIDDEN && path.ends_with('/'))
}

async fn static_assets(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let mut failures = Vec::new();
    let mut forbidden = Vec::new();

    for path in &ctx.settings.asset_paths {
        let resp = fetch(ctx.client, &ctx.base.join(path)).await?;
        if !asset_acceptable(path, resp.status) {
            failures.push(format!("{path} (HTTP {})", resp.status.as_u16()));
        } else if resp.status == StatusCode::FORBIDDEN {
            forbidden.push(path.as_str());
        }
    }

    if !failures.is_empty() {
        return Ok(Outcome::fail(format!(
            "Unreachable assets: {}",
            failures.join(", ")
        )));
    }
    let mut message = format!("All {} static assets reachable", ctx.settings.asset_paths.len());
    if !forbidden.is_empty() {
        message.push_str(&format!(" (directory listing forbidden: {})", forbidden.join(", ")));
    }
    Ok(Outcome::pass(message))
}

async fn routing_fallback(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let mut failures = Vec::new();

    for path in &ctx.settings.route_paths {
        let resp = fetch(ctx.client, &ctx.base.join(path)).await?;
        if !resp.status.is_success() {
            failures.push(format!("{path} (HTTP {})", resp.status.as_u16()));
        } else if !resp.body.contains(&ctx.settings.marker) {
            failures.push(format!("{path} (app shell not served)"));
        }
    }

    if failures.is_empty() {
        Ok(Outcome::pass(format!(
            "All {} routes fall back to the app shell",
            ctx.settings.route_paths.len()
        )))
    } else {
        Ok(Outcome::fail(format!("Routing broken for: {}", failures.join(", "))))
    }
}

async fn response_headers(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let resp = fetch(ctx.client, ctx.base.as_str()).await?;

    let content_type = resp.content_type.as_deref().unwrap_or("");
    let html = content_type.contains("text/html");
    let https = ctx.base.is_https();

    // X-Frame-Options is reported only; it never decides the verdict.
    let frame_note = match &resp.x_frame_options {
        Some(v) => format!("X-Frame-Options: {v}"),
        None => "X-Frame-Options: not set (not enforced)".to_string(),
    };

    if html && https {
        return Ok(Outcome::pass(format!("Content-Type is HTML over https; {frame_note}")));
    }
    let mut problems = Vec::new();
    if !html {
        problems.push(format!("Content-Type is '{content_type}', expected text/html"));
    }
    if !https {
        problems.push("site is not served over https".to_string());
    }
    Ok(Outcome::fail(format!("{}; {frame_note}", problems.join("; "))))
}

/// Pass iff the measured load time is strictly below the threshold.
pub fn evaluate_load_time(elapsed_ms: u64, threshold_ms: u64) -> Outcome {
    if elapsed_ms < threshold_ms {
        Outcome::pass(format!("Page loaded in {elapsed_ms}ms (threshold {threshold_ms}ms)"))
    } else {
        Outcome::fail(format!(
            "Load time {elapsed_ms}ms exceeds {threshold_ms}ms threshold"
        ))
    }
}

async fn performance(ctx: &ProbeContext<'_>) -> Result<Outcome> {
    let start = Instant::now();
    fetch(ctx.client, ctx.base.as_str()).await?;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::debug!(elapsed_ms, threshold_ms = ctx.settings.threshold_ms, "page load measured");
    Ok(evaluate_load_time(elapsed_ms, ctx.settings.threshold_ms))
}
