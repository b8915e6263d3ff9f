//! Game state snapshot: everything the HUD and any observer needs after a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete visible state after an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    /// One entry per player, player 1 first.
    pub tanks: Vec<TankView>,
    pub projectile_count: usize,
    pub pickup_count: usize,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Events produced by the last update.
    pub events: Vec<GameEvent>,
}

impl GameSnapshot {
    pub fn tank(&self, player: PlayerId) -> Option<&TankView> {
        self.tanks.iter().find(|t| t.player == player)
    }
}

/// A player's tank as shown on the HUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    pub player: PlayerId,
    /// Zero once the tank has been destroyed.
    pub hitpoints: i32,
    pub missile_ammo: u32,
    pub position: Vec2,
    pub facing: Direction,
    pub has_fire_rate_upgrade: bool,
    pub has_explosive_shots_upgrade: bool,
    pub alive: bool,
}

impl TankView {
    /// View of a tank that has already been removed from the scene.
    pub fn destroyed(player: PlayerId) -> Self {
        Self {
            player,
            hitpoints: 0,
            missile_ammo: 0,
            position: Vec2::ZERO,
            facing: player.tank_type().initial_facing(),
            has_fire_rate_upgrade: false,
            has_explosive_shots_upgrade: false,
            alive: false,
        }
    }
}
