use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner for a single probe, drawn on stdout. When stdout is not a terminal
/// the spinner is hidden and `finish_spinner` prints a plain line instead.
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "•"])
            .template("{spinner} {msg}")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

pub fn finish_spinner(pb: &ProgressBar, success: bool) {
    let icon = if success { "✓" } else { "✗" };
    let line = format!("{icon} {}", pb.message());
    if pb.is_hidden() {
        println!("{line}");
    }
    pb.finish_with_message(line);
}
