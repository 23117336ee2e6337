//! Integration tests for the game through its public API, using the shipped
//! assets without a GPU

use glam::Vec3;
use spaceship_game::config::GameConfig;
use spaceship_game::error::GameError;
use spaceship_game::sim::{Controls, DrawList, Game, GameState, HeadlessTextures};

fn config(seed: u64) -> GameConfig {
    let mut config = GameConfig::builtin("test");
    config.gameplay.seed = Some(seed);
    config
}

fn game(seed: u64) -> Game {
    Game::new(&config(seed), &mut HeadlessTextures::new()).expect("shipped assets load")
}

fn press(f: impl FnOnce(&mut Controls)) -> Controls {
    let mut controls = Controls::default();
    f(&mut controls);
    controls
}

fn meteor_heights(game: &Game) -> Vec<f32> {
    game.actors()
        .meteors
        .iter()
        .map(|m| m.sprite().position().y)
        .collect()
}

#[test]
fn test_draw_order_follows_the_drawn_state() {
    let mut game = game(7);
    let mut draws = DrawList::new();
    let background = game.actors().background.texture();

    game.draw(&mut draws);
    assert_eq!(
        draws.textures(),
        vec![background, game.actors().start_screen.texture()]
    );

    // The confirm frame still shows the start screen
    assert_eq!(game.update(&press(|c| c.confirm = true)), GameState::Running);
    assert_eq!(game.drawn_state(), GameState::BeforeStart);

    game.update(&Controls::default());
    draws.clear();
    game.draw(&mut draws);
    let textures = draws.textures();
    assert_eq!(textures.len(), 2 + game.actors().meteors.len());
    assert_eq!(textures[0], background);
    assert_eq!(
        textures.last().copied(),
        Some(game.actors().spaceship.texture())
    );
}

#[test]
fn test_same_seed_same_meteors() {
    let a = game(99);
    let b = game(99);
    assert_eq!(meteor_heights(&a), meteor_heights(&b));
    assert_eq!(a.seed(), 99);

    let c = game(100);
    assert_ne!(meteor_heights(&a), meteor_heights(&c));
}

#[test]
fn test_ship_moves_with_velocity_per_frame() {
    let mut game = game(3);
    game.update(&press(|c| c.confirm = true));

    let start = game.actors().spaceship.position();
    game.update(&press(|c| {
        c.right = true;
        c.up = true;
    }));
    let moved = game.actors().spaceship.position();
    assert!((moved.x - start.x - 1.2).abs() < 1e-4);
    assert!((moved.y - start.y - 1.2).abs() < 1e-4);

    // Opposite keys cancel out
    game.update(&press(|c| {
        c.left = true;
        c.right = true;
    }));
    assert_eq!(game.actors().spaceship.position(), moved);
}

#[test]
fn test_full_round() {
    let mut game = game(11);
    game.update(&press(|c| c.confirm = true));

    let target = game.actors().meteors[2].sprite().position();
    game.spaceship_mut().set_position(target);
    assert_eq!(game.update(&Controls::default()), GameState::GameOver);

    // Held movement keys do nothing once the game is over
    let parked = game.actors().spaceship.position();
    game.update(&press(|c| c.down = true));
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.actors().spaceship.position(), parked);

    assert_eq!(
        game.update(&press(|c| c.restart = true)),
        GameState::BeforeStart
    );
    assert_eq!(game.actors().spaceship.position(), Vec3::new(100.0, 300.0, 0.0));
    let width = game.playfield().x;
    for meteor in &game.actors().meteors {
        let position = meteor.sprite().position();
        assert_eq!(position.x, width);
        assert!(position.y >= meteor.band().min() && position.y < meteor.band().max());
    }

    // And the next round starts normally
    assert_eq!(game.update(&press(|c| c.confirm = true)), GameState::Running);
}

#[test]
fn test_missing_texture_is_reported() {
    let mut config = config(1);
    config.assets.root = "no/such/dir".into();
    match Game::new(&config, &mut HeadlessTextures::new()) {
        Err(GameError::Texture { path, .. }) => {
            assert!(path.ends_with("textures/space.png"), "{}", path.display())
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("game built without textures"),
    }
}

#[test]
fn test_loaded_profiles_build_a_game() {
    for profile in ["debug", "release"] {
        let config = GameConfig::load(profile).expect("profile loads");
        let game = Game::new(&config, &mut HeadlessTextures::new()).expect("game builds");
        assert_eq!(game.actors().meteors.len(), config.gameplay.meteor_count);
        assert_eq!(game.state(), GameState::BeforeStart);
    }
}
