//! Key bindings: raw key table to game controls

use super::keys::Key;
use super::state::InputState;
use crate::sim::Controls;

const LEFT: &[Key] = &[Key::Left, Key::A];
const RIGHT: &[Key] = &[Key::Right, Key::D];
const UP: &[Key] = &[Key::Up, Key::W];
const DOWN: &[Key] = &[Key::Down, Key::S];
const CONFIRM: &[Key] = &[Key::Enter];
const RESTART: &[Key] = &[Key::Space];
const QUIT: &[Key] = &[Key::Escape];

/// Reads this frame's controls from the key table
pub fn controls(input: &InputState) -> Controls {
    Controls {
        left: input.any_down(LEFT),
        right: input.any_down(RIGHT),
        up: input.any_down(UP),
        down: input.any_down(DOWN),
        confirm: input.any_down(CONFIRM),
        restart: input.any_down(RESTART),
    }
}

/// True if the player asked to quit
pub fn quit_requested(input: &InputState) -> bool {
    input.any_down(QUIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_are_equivalent() {
        for (arrow, letter) in [
            (Key::Left, Key::A),
            (Key::Right, Key::D),
            (Key::Up, Key::W),
            (Key::Down, Key::S),
        ] {
            let mut a = InputState::new();
            a.press(arrow);
            let mut b = InputState::new();
            b.press(letter);
            assert_eq!(controls(&a), controls(&b));
            assert_ne!(controls(&a), Controls::default());
        }
    }

    #[test]
    fn test_confirm_restart_and_quit() {
        let mut input = InputState::new();
        input.press(Key::Enter);
        assert!(controls(&input).confirm);
        assert!(!controls(&input).restart);

        input.press(Key::Space);
        assert!(controls(&input).restart);

        assert!(!quit_requested(&input));
        input.press(Key::Escape);
        assert!(quit_requested(&input));
    }

    #[test]
    fn test_held_keys_stay_active() {
        let mut input = InputState::new();
        input.press(Key::D);
        input.advance_frame();
        input.advance_frame();
        assert!(controls(&input).right);
    }
}
