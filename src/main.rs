mod checks;
mod cli;
mod config;
mod error;
mod http;
mod orchestrator;
mod progress;
mod report;
mod target;
mod types;

use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, Settings};
use crate::error::VerifyError;
use crate::orchestrator::Verifier;
use crate::target::BaseUrl;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    init_logging(cli.verbose);

    let base = match parse_target(cli.url.as_deref()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: deploy-verify <production-url>");
            std::process::exit(1);
        }
    };

    match run(base, &cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_target(raw: Option<&str>) -> Result<BaseUrl, VerifyError> {
    match raw {
        Some(raw) => BaseUrl::parse(raw),
        None => Err(VerifyError::InvalidArgument("no URL provided".to_string())),
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => config::load_settings(path)?,
        None => Settings::default(),
    };
    Ok(settings.apply(Overrides {
        marker: cli.marker.clone(),
        api_url: cli.api_url.clone(),
        threshold_ms: cli.threshold_ms,
        timeout_secs: cli.timeout_secs,
    }))
}

/// Run all probes and print the report. Returns the process exit code.
async fn run(base: BaseUrl, cli: &Cli) -> anyhow::Result<i32> {
    let settings = load_settings(cli)?;
    tracing::debug!(target_url = %base, ?settings, "starting verification");
    let client = http::build_client(&settings)?;

    let started_at = chrono::Local::now();
    println!("Verifying deployment at {base}\n");

    let mut verifier = Verifier::new(base, settings, client);
    verifier.run_all().await;

    Ok(report::print_report(
        verifier.base().as_str(),
        started_at,
        verifier.results(),
    ))
}
