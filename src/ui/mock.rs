//! Recording UI for tests.
//!
//! ```
//! use ae_preflight::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.warning("Overall Result: WARN");
//! assert!(ui.has_warning("WARN"));
//! ```

use super::{SpinnerHandle, UserInterface};

/// Records every line written through [`UserInterface`].
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of every spinner that was started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    pub fn has_message(&self, msg: &str) -> bool {
        contains(&self.messages, msg)
    }

    pub fn has_success(&self, msg: &str) -> bool {
        contains(&self.successes, msg)
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        contains(&self.warnings, msg)
    }

    pub fn has_error(&self, msg: &str) -> bool {
        contains(&self.errors, msg)
    }

    pub fn has_header(&self, title: &str) -> bool {
        contains(&self.headers, title)
    }
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(SilentSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}

struct SilentSpinner;

impl SpinnerHandle for SilentSpinner {
    fn finish_success(&mut self, _msg: &str) {}
}
