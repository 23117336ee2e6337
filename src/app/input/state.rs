//! Raw input state

use enum_map::EnumMap;

use super::keys::Key;

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: EnumMap<Key, ButtonState>,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys[key].is_down()
    }

    /// True if any of `keys` is down
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&key| self.is_down(key))
    }

    pub fn press(&mut self, key: Key) {
        // Key repeat must not re-trigger the edge
        if !self.keys[key].is_down() {
            self.keys[key] = ButtonState::JustPressed;
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.keys[key].is_down() {
            self.keys[key] = ButtonState::JustReleased;
        }
    }

    /// Releases every key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        for (_, state) in self.keys.iter_mut() {
            if state.is_down() {
                *state = ButtonState::JustReleased;
            }
        }
    }

    /// Advance all key states for next frame
    pub fn advance_frame(&mut self) {
        for (_, state) in self.keys.iter_mut() {
            *state = state.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release_cycle() {
        let mut input = InputState::new();
        input.press(Key::Enter);
        assert!(input.keys[Key::Enter].is_just_pressed());
        assert!(input.is_down(Key::Enter));

        input.advance_frame();
        assert_eq!(input.keys[Key::Enter], ButtonState::Pressed);

        // Repeat events while held keep the steady state
        input.press(Key::Enter);
        assert_eq!(input.keys[Key::Enter], ButtonState::Pressed);

        input.release(Key::Enter);
        assert_eq!(input.keys[Key::Enter], ButtonState::JustReleased);
        assert!(!input.is_down(Key::Enter));

        input.advance_frame();
        assert_eq!(input.keys[Key::Enter], ButtonState::Released);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.press(Key::A);
        input.press(Key::Up);
        input.release_all();
        assert!(!input.any_down(&[Key::A, Key::Up]));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut input = InputState::new();
        input.press(Key::Left);
        assert!(input.is_down(Key::Left));
        assert!(!input.is_down(Key::Right));
        assert!(input.any_down(&[Key::Right, Key::Left]));
    }
}
