//! Text output formatting with colors.

use checkin_core::{AccountInfo, CheckinOutcome, ExtractionMode};

use crate::report::RunReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Width of the label column.
const LABEL_WIDTH: usize = 18;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a whole run report.
    pub fn format_report(&self, report: &RunReport) -> String {
        let mut lines = vec![format!(
            "{} ({})",
            self.bold(&report.host),
            self.cyan(&report.account)
        )];

        if let Some(err) = &report.login_error {
            lines.push(format!("Login:    {}", self.red(&format!("✗ {err}"))));
        }

        if let Some(outcome) = &report.checkin {
            lines.push(format!("Check-in: {}", self.format_outcome(outcome)));
        }

        if let Some(info) = &report.account_info {
            lines.extend(self.format_info(info));
        }

        if let Some(err) = &report.info_error {
            lines.push(format!("Account:  {}", self.yellow(&format!("⚠ {err}"))));
        }

        lines.push(self.dim(&format!("Finished in {:.2}s", report.elapsed.as_secs_f64())));

        lines.join("\n")
    }

    /// Formats a check-in outcome on one line.
    pub fn format_outcome(&self, outcome: &CheckinOutcome) -> String {
        let detail = outcome.detail();
        let text = if detail.is_empty() {
            outcome.display_name().to_string()
        } else {
            format!("{} - {}", outcome.display_name(), detail)
        };

        match outcome {
            CheckinOutcome::Success { .. } => self.green(&format!("✓ {text}")),
            CheckinOutcome::AlreadyDone { .. } => self.yellow(&format!("✓ {text}")),
            CheckinOutcome::Failed { .. } => self.red(&format!("✗ {text}")),
        }
    }

    /// Formats account fields as an aligned block.
    pub fn format_info(&self, info: &AccountInfo) -> Vec<String> {
        let mut lines = vec!["Account:".to_string()];

        for (label, value) in info.pairs() {
            lines.push(format!("  {label:<LABEL_WIDTH$}{value}"));
        }

        match info.mode {
            ExtractionMode::Cards => {}
            ExtractionMode::NumericFallback => {
                lines.push(self.dim("  (no dashboard cards; values found in page text)"));
            }
            ExtractionMode::Empty => {
                lines.push(self.yellow("  ⚠ No account information found"));
            }
        }

        lines
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
