//! The spaceship game: actors, per-frame update, reset and draw order

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::backend::{SpriteSink, TextureSource};
use super::controls::Controls;
use super::meteor::Meteor;
use super::sprite::Sprite;
use super::state::{GameState, Trigger};
use crate::config::{AssetConfig, GameConfig, GameplayConfig, SpriteAsset};
use crate::error::Result;

/// Every sprite in the game
#[derive(Debug, Clone)]
pub struct Actors {
    pub background: Sprite,
    pub spaceship: Sprite,
    pub meteors: Vec<Meteor>,
    pub game_over: Sprite,
    pub start_screen: Sprite,
}

impl Actors {
    /// Loads all textures and places every sprite at its starting position
    ///
    /// Meteors start in a row at `meteor_start_x` and are given their
    /// heights later, once the game owns a random generator.
    pub fn load(config: &GameConfig, textures: &mut impl TextureSource) -> Result<Self> {
        let [width, height] = config.playfield();
        let center = Vec3::new(width / 2.0, height / 2.0, 0.0);
        let gameplay = &config.gameplay;
        let assets = &config.assets;

        let background = load_sprite(textures, assets, &assets.background, center)?;
        let spawn = Vec3::new(gameplay.spawn_point[0], gameplay.spawn_point[1], 0.0);
        let spaceship = load_sprite(textures, assets, &assets.spaceship, spawn)?;

        // One texture shared by every meteor
        let meteor_template = load_sprite(textures, assets, &assets.meteor, center)?;
        let meteors = (0..gameplay.meteor_count)
            .map(|i| {
                let x = gameplay.meteor_start_x + i as f32 * gameplay.meteor_spacing;
                let mut sprite = meteor_template.clone();
                sprite.set_position(Vec3::new(x, center.y, 0.0));
                Meteor::new(sprite, height)
            })
            .collect::<Result<Vec<_>>>()?;

        let game_over = load_sprite(textures, assets, &assets.game_over, center)?;
        let start_screen = load_sprite(textures, assets, &assets.start_screen, center)?;

        Ok(Self {
            background,
            spaceship,
            meteors,
            game_over,
            start_screen,
        })
    }
}

fn load_sprite(
    textures: &mut impl TextureSource,
    assets: &AssetConfig,
    asset: &SpriteAsset,
    position: Vec3,
) -> Result<Sprite> {
    let path = assets.resolve(asset);
    let texture = textures.load(&path)?;
    let size = Vec3::new(
        texture.width as f32 * asset.scale,
        texture.height as f32 * asset.scale,
        1.0,
    );
    Sprite::new(texture.handle, position, size, 1, 1)
}

/// Game world: actors plus the state machine driving them
pub struct Game {
    actors: Actors,
    state: GameState,
    /// Branch executed by the latest update, which is what gets drawn
    drawn: GameState,
    playfield: Vec2,
    velocity: f32,
    offscreen_margin: f32,
    spawn_point: Vec3,
    rng: StdRng,
    seed: u64,
    frame: u64,
}

impl Game {
    /// Builds the game from configuration, loading every texture through
    /// `textures`
    pub fn new(config: &GameConfig, textures: &mut impl TextureSource) -> Result<Self> {
        let actors = Actors::load(config, textures)?;
        let [width, height] = config.playfield();
        let mut game = Self::from_actors(actors, Vec2::new(width, height), &config.gameplay);

        for meteor in &mut game.actors.meteors {
            let x = meteor.sprite().position().x;
            meteor.respawn(x, &mut game.rng);
        }

        info!(
            seed = game.seed,
            meteors = game.actors.meteors.len(),
            playfield.width = width,
            playfield.height = height,
            "Game created"
        );
        Ok(game)
    }

    /// Wraps already-placed actors without moving them
    pub fn from_actors(actors: Actors, playfield: Vec2, gameplay: &GameplayConfig) -> Self {
        let seed = gameplay.seed.unwrap_or_else(rand::random);
        Self {
            actors,
            state: GameState::BeforeStart,
            drawn: GameState::BeforeStart,
            playfield,
            velocity: gameplay.velocity,
            offscreen_margin: gameplay.offscreen_margin,
            spawn_point: Vec3::new(gameplay.spawn_point[0], gameplay.spawn_point[1], 0.0),
            rng: StdRng::seed_from_u64(seed),
            seed,
            frame: 0,
        }
    }

    /// Runs one frame of the state machine
    ///
    /// Returns the state after the frame. At most one transition happens.
    pub fn update(&mut self, controls: &Controls) -> GameState {
        self.frame += 1;
        self.drawn = self.state;

        match self.state {
            GameState::BeforeStart => {
                if controls.confirm {
                    self.fire(Trigger::Confirm);
                }
            }
            GameState::Running => {
                if self.step(controls) {
                    self.fire(Trigger::Collision);
                }
            }
            GameState::GameOver => {
                if controls.restart {
                    self.fire(Trigger::Restart);
                    self.reset();
                }
            }
        }

        self.state
    }

    fn fire(&mut self, trigger: Trigger) {
        if let Some(next) = self.state.on(trigger) {
            info!(from = ?self.state, to = ?next, ?trigger, frame = self.frame, "Game state changed");
            self.state = next;
        }
    }

    /// Moves everything one frame; returns true if the spaceship was hit
    fn step(&mut self, controls: &Controls) -> bool {
        let velocity = self.velocity;
        self.actors
            .spaceship
            .translate(controls.direction() * velocity);
        let ship = *self.actors.spaceship.bounds();

        for (index, meteor) in self.actors.meteors.iter_mut().enumerate() {
            meteor.advance(-velocity);

            if meteor.sprite().position().x < -self.offscreen_margin {
                meteor.respawn(self.playfield.x, &mut self.rng);
                debug!(
                    meteor = index,
                    y = meteor.sprite().position().y,
                    "Meteor recycled"
                );
            }

            if meteor.sprite().bounds().intersects(&ship) {
                info!(
                    meteor = index,
                    ship.x = ship.center().x,
                    ship.y = ship.center().y,
                    "Spaceship hit"
                );
                return true;
            }
        }

        false
    }

    /// Puts the spaceship back at its spawn point and sends every meteor
    /// to the right edge at a fresh height
    pub fn reset(&mut self) {
        self.actors.spaceship.set_position(self.spawn_point);
        for meteor in &mut self.actors.meteors {
            meteor.respawn(self.playfield.x, &mut self.rng);
        }
        debug!("Actors reset");
    }

    /// Submits this frame's sprites in back-to-front order
    pub fn draw(&self, sink: &mut impl SpriteSink) {
        submit(sink, &self.actors.background);

        match self.drawn {
            GameState::BeforeStart => submit(sink, &self.actors.start_screen),
            GameState::Running => {
                for meteor in &self.actors.meteors {
                    submit(sink, meteor.sprite());
                }
                submit(sink, &self.actors.spaceship);
            }
            GameState::GameOver => submit(sink, &self.actors.game_over),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The branch the next draw will render
    pub fn drawn_state(&self) -> GameState {
        self.drawn
    }

    pub fn actors(&self) -> &Actors {
        &self.actors
    }

    pub fn spaceship_mut(&mut self) -> &mut Sprite {
        &mut self.actors.spaceship
    }

    /// Meteors can be moved but not added or removed
    pub fn meteors_mut(&mut self) -> &mut [Meteor] {
        &mut self.actors.meteors
    }

    pub fn playfield(&self) -> Vec2 {
        self.playfield
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn_point
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of updates run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

fn submit(sink: &mut impl SpriteSink, sprite: &Sprite) {
    sink.submit(sprite.texture(), sprite.model_matrix(), sprite.atlas_cell());
}
