//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Diagnostics are logged to the terminal; no spinner.
    Verbose,
    /// Spinner and summary only.
    #[default]
    Normal,
}

impl OutputMode {
    /// Mode for a `-v` count.
    pub fn from_verbosity(verbose: u8) -> Self {
        if verbose > 0 {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows progress spinners.
    ///
    /// A spinner would interleave with log lines in verbose mode.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
