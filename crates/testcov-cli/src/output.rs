//! Output formatting and progress reporting

use console::{style, Term};

/// Progress reporter for coverage checks
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Write verdict text exactly as produced, with no prefix or styling.
    ///
    /// Verdict text is machine-readable and its layout is part of the tool's
    /// contract, so it bypasses quiet mode and color handling entirely.
    pub fn diagnostic(&self, text: &str) {
        if text.is_empty() {
            return;
        }

        let _ = self.term.write_str(text);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reporter() {
        let reporter = ProgressReporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_default_reporter() {
        let reporter = ProgressReporter::default();
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_quiet_reporter() {
        let reporter = ProgressReporter::new(false, true);
        assert!(reporter.quiet);
    }

    #[test]
    fn test_success_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.success("coverage unchanged");
        // No panic = success
    }

    #[test]
    fn test_failure_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.failure("new untested sections");
        // No panic = success
    }

    #[test]
    fn test_warning_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.warning("configured allowance is generous");
        // No panic = success
    }

    #[test]
    fn test_info_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.info("running go test");
        // No panic = success
    }

    #[test]
    fn test_diagnostic_passthrough() {
        let reporter = ProgressReporter::new(false, true);
        // Diagnostics ignore quiet mode and are written verbatim
        reporter.diagnostic("pkg/foo.go new untested sections introduced\n");
        reporter.diagnostic("");
        // No panic = success
    }

    #[test]
    fn test_quiet_mode_suppresses_output() {
        let reporter = ProgressReporter::new(false, true);
        reporter.success("hidden");
        reporter.warning("hidden");
        reporter.info("hidden");
        // Failure is still printed
        reporter.failure("shown");
        // No panic = success
    }
}
