//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::{ChannelReport, ConsoleState};
use crate::domain::notification::ChannelStatus;

/// Presenter for CLI output formatting
pub struct Presenter {
    progress: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Show a percentage bar for a progress session
    pub fn start_progress(&mut self, message: &str) {
        let bar = ProgressBar::new(100);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:20.cyan/white}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("█░ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        self.progress = Some(bar);
    }

    /// Update the progress bar
    pub fn update_progress(&self, percent: u32, message: &str) {
        if let Some(ref bar) = self.progress {
            bar.set_position(u64::from(percent.min(100)));
            bar.set_message(message.to_string());
        }
    }

    /// Mark progress as finished successfully
    pub fn progress_success(&mut self, message: &str) {
        if let Some(bar) = self.progress.take() {
            bar.set_position(100);
            bar.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark progress as aborted
    pub fn progress_fail(&mut self, message: &str) {
        if let Some(bar) = self.progress.take() {
            bar.abandon_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Shell prompt, without newline
    pub fn prompt(&self) {
        print!("{} ", "notify>".cyan().bold());
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the permission flag
    pub fn enabled(&self, enabled: bool) {
        let value = if enabled {
            "enabled".green()
        } else {
            "disabled".red()
        };
        println!("{}: {}", "notifications".cyan(), value);
    }

    /// Print one line per channel
    pub fn channels(&self, reports: &[ChannelReport]) {
        for report in reports {
            println!(
                "{:<8} {:<16} {}",
                report.importance,
                report.channel_id.dimmed(),
                colorize_status(report.status)
            );
        }
    }

    /// Print the console state (shell `state` command)
    pub fn state(&self, state: &ConsoleState) {
        self.enabled(state.notifications_enabled);
        self.key_value("importance", state.selected_importance.as_str());
        self.key_value(
            "category",
            state
                .selected_category
                .map(|c| c.as_str())
                .unwrap_or("(none)"),
        );
        self.key_value("title", &state.custom_title);
        self.key_value("message", &state.custom_message);
        let progress = match state.progress_notification_id {
            Some(id) if state.is_progress_running => {
                format!("running {} at {}%", id, state.progress_percent)
            }
            _ => "idle".to_string(),
        };
        self.key_value("progress", &progress);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn colorize_status(status: ChannelStatus) -> ColoredString {
    let label = status.label();
    match status {
        ChannelStatus::Blocked => label.red(),
        ChannelStatus::UrgentHeadsUp => label.magenta(),
        ChannelStatus::HighSound => label.yellow(),
        ChannelStatus::MediumSilent | ChannelStatus::LowSilent => label.normal(),
        ChannelStatus::Unknown => label.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_calls_without_bar_are_ignored() {
        let mut presenter = Presenter::new();
        presenter.update_progress(50, "half");
        presenter.progress_success("done");
        assert!(presenter.progress.is_none());
    }

    #[test]
    fn progress_bar_lifecycle() {
        let mut presenter = Presenter::new();
        presenter.start_progress("Downloading...");
        presenter.update_progress(250, "over");
        assert_eq!(presenter.progress.as_ref().map(|b| b.position()), Some(100));
        presenter.progress_fail("stopped");
        assert!(presenter.progress.is_none());
    }

    #[test]
    fn status_labels_keep_text() {
        colored::control::set_override(false);
        assert_eq!(
            colorize_status(ChannelStatus::Blocked).to_string(),
            "Blocked"
        );
    }
}
