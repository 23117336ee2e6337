//! Headless gameplay preflight check
//!
//! Builds the game from the real asset dimensions and plays one scripted
//! round: start, fly clear of the meteors while they cycle, collide, look at
//! the game over screen, restart.

use glam::Vec2;

use crate::config::GameConfig;
use crate::preflight::check::{CheckResult, Findings, PreflightCheck};
use crate::sim::{Controls, DrawList, Game, GameState, HeadlessTextures};

/// Seed used when the profile leaves it random, so failures reproduce
const PREFLIGHT_SEED: u64 = 0x5EED;

/// Frames spent flying before the forced collision
const FLIGHT_FRAMES: u32 = 700;

/// Plays a scripted round against a headless game
pub struct GameRoundCheck;

impl GameRoundCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GameRoundCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightCheck for GameRoundCheck {
    fn name(&self) -> &'static str {
        "Game Round"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Plays start, flight, collision and restart without a window")
    }

    fn run(&self, config: &GameConfig) -> CheckResult {
        let mut findings = Findings::new();
        let mut config = config.clone();
        config.gameplay.seed.get_or_insert(PREFLIGHT_SEED);

        match Game::new(&config, &mut HeadlessTextures::new()) {
            Ok(mut game) => {
                findings.ok(format!(
                    "Game built: {} meteors, seed {}",
                    game.actors().meteors.len(),
                    game.seed()
                ));
                if let Err(problem) = play_round(&mut game, &config, &mut findings) {
                    findings.fail(problem);
                }
            }
            Err(e) => findings.fail(format!("Game could not be built: {}", e)),
        }

        findings.finish(
            "Scripted round completed",
            "Scripted round completed with warnings",
            "Scripted round failed",
        )
    }
}

fn expect_state(game: &Game, expected: GameState, step: &str) -> Result<(), String> {
    if game.state() == expected {
        Ok(())
    } else {
        Err(format!(
            "{}: expected {:?}, got {:?}",
            step,
            expected,
            game.state()
        ))
    }
}

fn play_round(game: &mut Game, config: &GameConfig, findings: &mut Findings) -> Result<(), String> {
    let idle = Controls::default();
    let mut draws = DrawList::new();

    expect_state(game, GameState::BeforeStart, "initial state")?;
    game.update(&idle);
    expect_state(game, GameState::BeforeStart, "idle before start")?;
    game.draw(&mut draws);
    if draws.len() != 2 {
        return Err(format!("start screen drew {} sprites, expected 2", draws.len()));
    }
    findings.ok("Start screen waits for confirm");

    game.update(&Controls {
        confirm: true,
        ..Default::default()
    });
    expect_state(game, GameState::Running, "after confirm")?;
    findings.ok("Confirm starts the game");

    // Dive below the playfield so the meteors can pass and recycle
    let dive = Controls {
        down: true,
        ..Default::default()
    };
    let margin = config.gameplay.offscreen_margin;
    let mut recycled = 0;
    for frame in 0..FLIGHT_FRAMES {
        let before: Vec<f32> = game
            .actors()
            .meteors
            .iter()
            .map(|m| m.sprite().position().x)
            .collect();

        if game.update(&dive) != GameState::Running {
            findings.warn(format!("Spaceship was hit while diving at frame {}", frame));
            break;
        }

        for (index, meteor) in game.actors().meteors.iter().enumerate() {
            let position = meteor.sprite().position();
            let band = meteor.band();
            if position.y < band.min() || position.y >= band.max() {
                return Err(format!(
                    "meteor {} left its spawn band: y = {}",
                    index, position.y
                ));
            }
            if position.x < -margin {
                return Err(format!("meteor {} was not recycled at x = {}", index, position.x));
            }
            if position.x > before[index] {
                recycled += 1;
            }
        }
    }

    if recycled == 0 {
        findings.warn(format!("No meteor recycled within {} frames", FLIGHT_FRAMES));
    } else {
        findings.ok(format!("{} meteor recycles, all within spawn bands", recycled));
    }

    if game.state() == GameState::Running {
        // The rightmost meteor cannot be recycled during the next step
        let target = game
            .actors()
            .meteors
            .iter()
            .map(|m| m.sprite().position())
            .max_by(|a, b| a.x.total_cmp(&b.x))
            .ok_or("game has no meteors")?;
        game.spaceship_mut().set_position(target);
        game.update(&idle);
    }
    expect_state(game, GameState::GameOver, "after collision")?;
    if game.drawn_state() != GameState::Running {
        return Err("collision frame should still draw the running scene".to_string());
    }
    findings.ok("Collision ends the game");

    game.update(&idle);
    expect_state(game, GameState::GameOver, "idle after game over")?;
    draws.clear();
    game.draw(&mut draws);
    let game_over = game.actors().game_over.texture();
    if draws.calls().last().map(|call| call.texture) != Some(game_over) {
        return Err("game over screen is not drawn on top".to_string());
    }
    findings.ok("Game over screen shown");

    game.update(&Controls {
        restart: true,
        ..Default::default()
    });
    expect_state(game, GameState::BeforeStart, "after restart")?;
    let spawn = game.spawn_point();
    if game.actors().spaceship.position() != spawn {
        return Err(format!(
            "spaceship not back at spawn point {:?}",
            Vec2::new(spawn.x, spawn.y)
        ));
    }
    let right_edge = game.playfield().x;
    if game
        .actors()
        .meteors
        .iter()
        .any(|m| m.sprite().position().x != right_edge)
    {
        return Err("meteors not reset to the right edge".to_string());
    }
    findings.ok("Restart resets the actors");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_passes_with_shipped_assets() {
        let config = GameConfig::builtin("test");
        let result = GameRoundCheck::new().run(&config);
        assert!(result.status.is_ok(), "{:#?}", result.details);
    }

    #[test]
    fn test_round_fails_without_assets() {
        let mut config = GameConfig::builtin("test");
        config.assets.root = "nowhere".into();
        let result = GameRoundCheck::new().run(&config);
        assert!(result.status.is_fail());
    }
}
