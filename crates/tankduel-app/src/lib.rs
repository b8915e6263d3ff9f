//! TANK DUEL application layer.
//!
//! Wires the simulation to a keyboard, a HUD, and a fixed-rate game loop
//! thread. Presentation is headless: frames are recorded, not shown.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod hud;
pub mod keyboard;
pub mod render;

pub use tankduel_core as core;
pub use tankduel_sim as sim;
