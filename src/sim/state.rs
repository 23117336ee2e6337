//! Game state machine

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Title screen, waiting for the confirm key
    #[default]
    BeforeStart,
    /// Gameplay
    Running,
    /// Crash screen, waiting for the restart key
    GameOver,
}

/// Events that can move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Confirm,
    Collision,
    Restart,
}

impl GameState {
    /// Returns the next state if `trigger` is accepted in this state
    ///
    /// Each state accepts exactly one trigger; anything else is ignored.
    pub fn on(self, trigger: Trigger) -> Option<GameState> {
        match (self, trigger) {
            (GameState::BeforeStart, Trigger::Confirm) => Some(GameState::Running),
            (GameState::Running, Trigger::Collision) => Some(GameState::GameOver),
            (GameState::GameOver, Trigger::Restart) => Some(GameState::BeforeStart),
            _ => None,
        }
    }
}
