//! Progress spinner.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::PreflightTheme;
use super::SpinnerHandle;

/// A spinner shown while facts are gathered.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: PreflightTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str, theme: PreflightTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// A spinner that draws nothing (verbose mode, or not a terminal).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: PreflightTheme::plain(),
        }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(self.theme.format_success(msg));
    }
}
