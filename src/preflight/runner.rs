//! Runs preflight checks and aggregates their results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, PreflightCheck};
use crate::config::GameConfig;

/// Results from running the preflight suite
#[derive(Debug)]
pub struct PreflightReport {
    /// Profile the checks ran against
    pub profile: String,
    /// Individual results with their check names
    pub results: Vec<(&'static str, CheckResult)>,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl PreflightReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = warnings only
    pub fn exit_code(&self) -> u8 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }

    /// Looks up a result by check name
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check, _)| *check == name)
            .map(|(_, result)| result)
    }
}

/// Orchestrates running checks and collecting results
#[derive(Default)]
pub struct PreflightRunner {
    checks: Vec<Box<dyn PreflightCheck>>,
}

impl PreflightRunner {
    /// Creates a new runner with no checks
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check to the runner
    pub fn add_check<C: PreflightCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs every registered check in order against `config`
    pub fn run(&self, config: &GameConfig) -> PreflightReport {
        let mut results = Vec::with_capacity(self.checks.len());
        let mut passed = 0;
        let mut warned = 0;
        let mut failed = 0;

        for check in &self.checks {
            let name = check.name();
            let start = Instant::now();
            let result = check.run(config).with_duration(start.elapsed());

            match result.status {
                CheckStatus::Pass => passed += 1,
                CheckStatus::Warn => warned += 1,
                CheckStatus::Fail => failed += 1,
            }

            if result.status.is_fail() {
                warn!(check = name, message = %result.message, "Preflight check failed");
            } else {
                debug!(check = name, status = ?result.status, "Preflight check finished");
            }

            results.push((name, result));
        }

        PreflightReport {
            profile: config.profile.clone(),
            results,
            passed,
            warned,
            failed,
        }
    }
}
