//! Keys the game tracks

use enum_map::Enum;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard keys with a meaning in the game
///
/// Anything else winit reports is dropped at the door, so the key table
/// never needs a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Enter,
    Space,
    Escape,
}

impl Key {
    /// Maps a physical key to a tracked key
    pub fn from_physical(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(code) => Self::from_code(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::ArrowLeft => Self::Left,
            KeyCode::ArrowRight => Self::Right,
            KeyCode::ArrowUp => Self::Up,
            KeyCode::ArrowDown => Self::Down,
            KeyCode::KeyA => Self::A,
            KeyCode::KeyD => Self::D,
            KeyCode::KeyW => Self::W,
            KeyCode::KeyS => Self::S,
            KeyCode::Enter | KeyCode::NumpadEnter => Self::Enter,
            KeyCode::Space => Self::Space,
            KeyCode::Escape => Self::Escape,
            _ => return None,
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_keys_map() {
        assert_eq!(Key::from_code(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(Key::from_code(KeyCode::KeyW), Some(Key::W));
        assert_eq!(Key::from_code(KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::Escape)),
            Some(Key::Escape)
        );
    }

    #[test]
    fn test_untracked_keys_are_ignored() {
        assert_eq!(Key::from_code(KeyCode::KeyQ), None);
        assert_eq!(Key::from_code(KeyCode::F12), None);
        assert_eq!(
            Key::from_physical(PhysicalKey::Unidentified(
                winit::keyboard::NativeKeyCode::Unidentified
            )),
            None
        );
    }
}
