use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "deploy-verify",
    version,
    about = "Post-deployment smoke test for the anime browser web app"
)]
pub struct Cli {
    /// Production URL of the deployment to verify (http:// or https://)
    pub url: Option<String>,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long)]
    pub verbose: bool,

    /// TOML file overriding probe settings (marker, paths, threshold)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Substring every HTML response must contain
    #[arg(long)]
    pub marker: Option<String>,

    /// Third-party anime API endpoint to probe
    #[arg(long)]
    pub api_url: Option<String>,

    /// Maximum page load time in milliseconds (exclusive)
    #[arg(long)]
    pub threshold_ms: Option<u64>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
