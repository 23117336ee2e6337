//! Core preflight trait and result types

use std::time::Duration;

use crate::config::GameConfig;

/// Status of a preflight check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully
    Pass,
    /// Check passed with warnings
    Warn,
    /// Check failed
    Fail,
}

impl CheckStatus {
    /// Returns true if the game can still start (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    /// Returns true if the check failed
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    /// Returns the status label coloured for a terminal
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Pass => self.label().green().to_string(),
            CheckStatus::Warn => self.label().yellow().to_string(),
            CheckStatus::Fail => self.label().red().to_string(),
        }
    }
}

/// Result of a preflight check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary for the report table
    pub message: String,
    /// Individual findings, printed below the table
    pub details: Vec<String>,
    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Collects findings while a check runs and derives the final status
///
/// The worst finding wins: any failure fails the check, otherwise any
/// warning downgrades it to a warning.
#[derive(Debug, Default)]
pub struct Findings {
    lines: Vec<String>,
    warned: bool,
    failed: bool,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("  ✓ {}", line.as_ref()));
    }

    pub fn warn(&mut self, line: impl AsRef<str>) {
        self.warned = true;
        self.lines.push(format!("  ⚠ {}", line.as_ref()));
    }

    pub fn fail(&mut self, line: impl AsRef<str>) {
        self.failed = true;
        self.lines.push(format!("  ✗ {}", line.as_ref()));
    }

    /// Plain informational line
    pub fn note(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("    {}", line.as_ref()));
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Picks the message matching the worst finding
    pub fn finish(
        self,
        pass: impl Into<String>,
        warn: impl Into<String>,
        fail: impl Into<String>,
    ) -> CheckResult {
        let result = if self.failed {
            CheckResult::fail(fail)
        } else if self.warned {
            CheckResult::warn(warn)
        } else {
            CheckResult::pass(pass)
        };
        result.with_details(self.lines)
    }
}

/// A startup prerequisite that can be verified without opening a window
pub trait PreflightCheck {
    /// Name shown in the report
    fn name(&self) -> &'static str;

    /// Runs the check against the configuration the game would start with
    fn run(&self, config: &GameConfig) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}
