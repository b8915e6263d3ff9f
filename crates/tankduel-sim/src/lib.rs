//! Simulation core for TANK DUEL.
//!
//! Owns the scene graph (a hecs world arranged as a tree), the command
//! queue that decouples input from entity behavior, the player input
//! bindings, and the per-frame `World` driver. Completely headless.

pub mod collision;
pub mod command;
pub mod entity;
pub mod error;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod render;
pub mod scene;
pub mod tank;
pub mod world;

pub use tankduel_core as core;
pub use command::{Command, CommandQueue};
pub use scene::{NodeId, SceneGraph};
pub use world::{SimConfig, World};
