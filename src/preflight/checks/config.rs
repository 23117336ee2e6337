//! Configuration preflight check

use crate::config::GameConfig;
use crate::preflight::check::{CheckResult, Findings, PreflightCheck};

/// Checks that every shipped profile loads and validates
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Checks the `debug` and `release` profiles
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile from files and environment and validates it")
    }

    fn run(&self, config: &GameConfig) -> CheckResult {
        let mut findings = Findings::new();

        for profile in &self.profiles {
            match GameConfig::load(profile) {
                Ok(loaded) => findings.ok(format!(
                    "Profile '{}': window {}x{}, {} meteors, velocity {}",
                    profile,
                    loaded.window.width,
                    loaded.window.height,
                    loaded.gameplay.meteor_count,
                    loaded.gameplay.velocity
                )),
                Err(e) => findings.fail(format!("Profile '{}': {}", profile, e)),
            }
        }

        match config.validate() {
            Ok(()) => findings.ok(format!("Active profile '{}' is valid", config.profile)),
            Err(e) => findings.fail(format!("Active profile '{}': {}", config.profile, e)),
        }

        match config.gameplay.seed {
            Some(seed) => findings.note(format!("Fixed seed: {}", seed)),
            None => findings.note("Seed: random per run"),
        }

        findings.finish(
            format!("{} profiles validated", self.profiles.len()),
            "Configuration loaded with warnings",
            "Configuration is invalid",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_active_config_fails() {
        let mut config = GameConfig::builtin("broken");
        config.gameplay.velocity = 0.0;
        let result = ConfigCheck::with_profiles(vec![]).run(&config);
        assert!(result.status.is_fail());
    }

    #[test]
    fn test_builtin_config_passes_without_profiles() {
        let config = GameConfig::builtin("release");
        let result = ConfigCheck::with_profiles(vec![]).run(&config);
        assert!(result.status.is_ok(), "{:?}", result.details);
    }
}
