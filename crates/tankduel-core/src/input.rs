//! Physical input vocabulary.
//!
//! Keys and discrete key events as delivered by the windowing layer.

use serde::{Deserialize, Serialize};

/// Keyboard keys the game can bind. `Unknown` is returned when an action
/// has no key assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Unknown,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Space,
    Enter,
    Escape,
    LControl,
    RControl,
    LShift,
    RShift,
    Left,
    Right,
    Up,
    Down,
}

/// Discrete input delivered once per physical transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "key")]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
}

impl InputEvent {
    pub fn key(&self) -> Key {
        match *self {
            InputEvent::KeyPressed(key) | InputEvent::KeyReleased(key) => key,
        }
    }
}
