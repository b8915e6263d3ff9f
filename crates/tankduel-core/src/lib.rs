//! Core types and definitions for TANK DUEL.
//!
//! This crate defines the vocabulary shared across the other crates:
//! categories, components, per-type data tables, input keys, snapshots,
//! events, and constants. It has no dependency on the scene graph runtime
//! or on any windowing framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod tables;
pub mod types;

#[cfg(test)]
mod tests;
