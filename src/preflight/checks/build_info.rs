//! Build information preflight check

use crate::build_info;
use crate::config::GameConfig;
use crate::preflight::check::{CheckResult, Findings, PreflightCheck};

/// Checks that build metadata was embedded
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn run(&self, _config: &GameConfig) -> CheckResult {
        let mut findings = Findings::new();

        findings.ok(format!("Version: {}", build_info::version_string()));
        findings.ok(format!("Build time: {}", build_info::BUILD_TIMESTAMP));
        findings.ok(format!(
            "Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));

        match build_info::GIT_SHA {
            Some(_) => findings.ok(format!(
                "Git: {}@{}",
                build_info::GIT_BRANCH.unwrap_or("detached"),
                build_info::git_sha_short()
            )),
            None => findings.warn("Built outside a git checkout, no revision recorded"),
        }

        findings.finish(
            "Build metadata present",
            "Build metadata partial",
            "Build metadata missing",
        )
    }
}
