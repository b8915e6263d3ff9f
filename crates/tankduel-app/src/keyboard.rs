//! Held-key state built from discrete key events.

use std::collections::HashSet;

use tankduel_core::input::{InputEvent, Key};
use tankduel_sim::player::InputSource;

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed(key) => {
                self.pressed.insert(key);
            }
            InputEvent::KeyReleased(key) => {
                self.pressed.remove(&key);
            }
        }
    }

    pub fn held_count(&self) -> usize {
        self.pressed.len()
    }
}

impl InputSource for KeyboardState {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keyboard = KeyboardState::new();
        keyboard.apply(&InputEvent::KeyPressed(Key::Space));
        keyboard.apply(&InputEvent::KeyPressed(Key::Space));
        assert!(keyboard.is_key_pressed(Key::Space));
        assert_eq!(keyboard.held_count(), 1);

        keyboard.apply(&InputEvent::KeyReleased(Key::Space));
        assert!(!keyboard.is_key_pressed(Key::Space));

        // Releasing a key that was never pressed is harmless.
        keyboard.apply(&InputEvent::KeyReleased(Key::W));
        assert_eq!(keyboard.held_count(), 0);
    }
}
