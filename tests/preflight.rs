//! Integration tests for the preflight suite

use spaceship_game::config::GameConfig;
use spaceship_game::preflight::{self, CheckStatus, PreflightCheck, PreflightRunner, checks::*};

fn config() -> GameConfig {
    GameConfig::load("release").expect("release profile loads")
}

#[test]
fn test_all_preflight_checks() {
    let report = preflight::run_all(&config());

    if !report.is_healthy() {
        eprintln!("\n{}", preflight::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Preflight failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total(), 5);
    assert_ne!(report.exit_code(), 1);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().run(&config());
    assert_eq!(result.status, CheckStatus::Pass, "{:#?}", result.details);
}

#[test]
fn test_asset_check() {
    let result = AssetCheck::new().run(&config());
    assert_eq!(result.status, CheckStatus::Pass, "{:#?}", result.details);
}

#[test]
fn test_game_round_check() {
    let result = GameRoundCheck::new().run(&config());
    assert_eq!(result.status, CheckStatus::Pass, "{:#?}", result.details);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().run(&config());
    assert!(result.status.is_ok(), "{}", result.message);
}

#[test]
fn test_broken_assets_fail_the_suite() {
    let mut config = config();
    config.assets.root = "missing-assets".into();

    let report = PreflightRunner::new()
        .add_check(AssetCheck::new())
        .add_check(GameRoundCheck::new())
        .run(&config);

    assert_eq!(report.failed, 2);
    assert_eq!(report.exit_code(), 1);
    assert!(report.result("Assets").is_some_and(|r| r.status.is_fail()));
}
