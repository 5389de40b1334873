use std::fmt::Write;

use chrono::{DateTime, Local};
use console::Style;

use crate::types::{CheckResult, RunSummary};

pub const SUCCESS_BANNER: &str = "All automated tests passed";

/// Build the results block printed after a run.
pub fn render_report(target: &str, started_at: DateTime<Local>, results: &[CheckResult]) -> String {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    let yellow = Style::new().yellow().bold();
    let dim = Style::new().dim();

    let summary = RunSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Deployment verification: {target}");
    let _ = writeln!(out, "Started: {}", started_at.format("%Y-%m-%d %H:%M:%S %Z"));
    let _ = writeln!(out, "{}", "=".repeat(60));

    for r in results {
        let icon = if r.passed {
            green.apply_to("✓")
        } else {
            red.apply_to("✗")
        };
        let _ = writeln!(
            out,
            "  {} {} {}",
            icon,
            r.name,
            dim.apply_to(format!("({}ms)", r.duration_ms))
        );
        let _ = writeln!(out, "      {}", r.message);
    }

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Passed: {}/{}", summary.passed, summary.total);
    if summary.all_passed() {
        let _ = writeln!(out, "{}", green.apply_to(SUCCESS_BANNER));
    } else {
        let _ = writeln!(
            out,
            "{}",
            yellow.apply_to(format!(
                "WARNING: {} check(s) failed. Review the deployment before announcing it.",
                summary.failed()
            ))
        );
    }
    out
}

/// Print the report and return the exit status for the run.
pub fn print_report(target: &str, started_at: DateTime<Local>, results: &[CheckResult]) -> i32 {
    print!("{}", render_report(target, started_at, results));
    RunSummary::from_results(results).exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(failing: &[&str]) -> Vec<CheckResult> {
        [
            "Site Accessibility",
            "Third-Party API",
            "Static Assets",
            "Routing Fallback",
            "Response Headers",
            "Performance",
        ]
        .iter()
        .map(|name| CheckResult {
            name: name.to_string(),
            passed: !failing.contains(name),
            message: format!("{name} message"),
            duration_ms: 42,
        })
        .collect()
    }

    #[test]
    fn test_all_passed_report() {
        let rs = results(&[]);
        let text = render_report("https://anime.example.com", Local::now(), &rs);
        assert!(text.contains(SUCCESS_BANNER));
        assert!(text.contains("Passed: 6/6"));
        assert!(text.contains("(42ms)"));
        assert!(text.contains("Performance message"));
        assert!(!text.contains("WARNING"));
        assert_eq!(RunSummary::from_results(&rs).exit_code(), 0);
    }

    #[test]
    fn test_one_failure_report() {
        let rs = results(&["Performance"]);
        let text = render_report("https://anime.example.com", Local::now(), &rs);
        assert!(text.contains("Passed: 5/6"));
        assert!(text.contains("WARNING: 1 check(s) failed"));
        assert!(!text.contains(SUCCESS_BANNER));
        assert_eq!(RunSummary::from_results(&rs).exit_code(), 1);
    }

    #[test]
    fn test_print_report_exit_status() {
        let target = "https://anime.example.com";
        assert_eq!(print_report(target, Local::now(), &results(&[])), 0);
        assert_eq!(print_report(target, Local::now(), &results(&["Static Assets"])), 1);
    }
}
