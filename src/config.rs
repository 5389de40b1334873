use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_MARKER: &str = "<div id=\"root\">";
pub const DEFAULT_API_URL: &str = "https://api.jikan.moe/v4/anime?limit=1";
pub const DEFAULT_THRESHOLD_MS: u64 = 3000;

/// Everything the probes need besides the target URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Substring expected in every HTML response served by the app shell.
    pub marker: String,
    /// Third-party anime listing endpoint, already limited to one item.
    pub api_url: String,
    /// Static asset paths relative to the base URL. Paths ending in `/` are
    /// directory listings and may answer 403.
    pub asset_paths: Vec<String>,
    /// Client-side routes that must fall back to the app shell.
    pub route_paths: Vec<String>,
    /// Load time (exclusive upper bound) for the performance check.
    pub threshold_ms: u64,
    /// Total per-request timeout. None leaves it to the network stack.
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            marker: DEFAULT_MARKER.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            asset_paths: vec!["/vite.svg".to_string(), "/assets/".to_string()],
            route_paths: vec![
                "/anime/1".to_string(),
                "/favorites".to_string(),
                "/nonexistent".to_string(),
            ],
            threshold_ms: DEFAULT_THRESHOLD_MS,
            timeout_secs: None,
        }
    }
}

/// Command-line values that take precedence over file settings.
#[derive(Debug, Default)]
pub struct Overrides {
    pub marker: Option<String>,
    pub api_url: Option<String>,
    pub threshold_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(marker) = overrides.marker {
            self.marker = marker;
        }
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(threshold_ms) = overrides.threshold_ms {
            self.threshold_ms = threshold_ms;
        }
        if overrides.timeout_secs.is_some() {
            self.timeout_secs = overrides.timeout_secs;
        }
        self
    }
}

/// Load probe settings from a TOML file. Missing keys keep their defaults.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(settings)
}
