//! Preflight checks for validating that the game can start
//!
//! Everything here runs without opening a window, which makes it usable
//! from CI and on machines without a display:
//! - configuration profiles load and validate
//! - textures exist and fit the playfield
//! - a headless game plays a scripted round
//! - a graphics adapter is visible
//!
//! # Example
//!
//! ```no_run
//! use spaceship_game::config::GameConfig;
//! use spaceship_game::preflight;
//!
//! let config = GameConfig::load("release")?;
//! let report = preflight::run_all(&config);
//! preflight::print_report(&report);
//! std::process::exit(report.exit_code().into());
//! # Ok::<(), spaceship_game::error::GameError>(())
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

use crate::config::GameConfig;

pub use check::{CheckResult, CheckStatus, Findings, PreflightCheck};
pub use reporter::{format_report, print_report};
pub use runner::{PreflightReport, PreflightRunner};

/// Runner with every built-in check, in dependency order
pub fn default_runner() -> PreflightRunner {
    PreflightRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::AssetCheck::new())
        .add_check(checks::GameRoundCheck::new())
        .add_check(checks::GraphicsBackendCheck::new())
        .add_check(checks::BuildInfoCheck::new())
}

/// Runs all built-in checks against `config`
pub fn run_all(config: &GameConfig) -> PreflightReport {
    default_runner().run(config)
}
