use reqwest::Client;

use crate::checks::{Probe, ProbeContext};
use crate::config::Settings;
use crate::progress::{finish_spinner, stage_spinner};
use crate::target::BaseUrl;
use crate::types::CheckResult;

/// Runs the fixed probe sequence against one deployment.
pub struct Verifier {
    base: BaseUrl,
    settings: Settings,
    client: Client,
    results: Vec<CheckResult>,
}

impl Verifier {
    pub fn new(base: BaseUrl, settings: Settings, client: Client) -> Self {
        Verifier {
            base,
            settings,
            client,
            results: Vec::with_capacity(Probe::ALL.len()),
        }
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Run every probe in order, one at a time. Appends exactly one result per probe.
    pub async fn run_all(&mut self) {
        for probe in Probe::ALL {
            let result = self.run_one(probe).await;
            self.results.push(result);
        }
    }

    async fn run_one(&self, probe: Probe) -> CheckResult {
        let pb = stage_spinner(probe.progress_label());
        let ctx = ProbeContext {
            client: &self.client,
            base: &self.base,
            settings: &self.settings,
        };
        let result = probe.run(&ctx).await;
        tracing::debug!(
            probe = probe.name(),
            passed = result.passed,
            duration_ms = result.duration_ms,
            "probe finished"
        );
        finish_spinner(&pb, result.passed);
        result
    }
}
