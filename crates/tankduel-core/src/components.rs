//! Components attached to scene nodes.
//!
//! Components are plain data. Behavior lives in the simulation crate.

use std::time::Duration;

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Local transform relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in degrees, clockwise on screen.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation.to_radians(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Physical state shared by every entity: health and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Never negative.
    pub hitpoints: i32,
    pub max_hitpoints: i32,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Set once hitpoints reach zero. The node is removed by the pruning pass.
    pub destroyed: bool,
}

impl Body {
    pub fn new(hitpoints: i32) -> Self {
        Self {
            hitpoints,
            max_hitpoints: hitpoints,
            velocity: Vec2::ZERO,
            destroyed: false,
        }
    }
}

/// Tank-specific state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    pub tank_type: TankType,
    pub facing: Direction,
    /// Base interval between shots for this tank type.
    pub fire_interval: Duration,
    /// Counts down to zero; a shot is only possible at zero.
    pub fire_cooldown: Duration,
    /// Set by input, cleared after every update.
    pub is_firing: bool,
    /// Set by the discrete missile action, cleared after every update.
    pub is_launching_missile: bool,
    pub missile_ammo: u32,
    /// Remaining time of the fire-rate upgrade.
    pub fire_rate_upgrade: Duration,
    /// Remaining time of the explosive-shots upgrade.
    pub explosive_shots_upgrade: Duration,
}

/// Projectile-specific state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub projectile_type: ProjectileType,
    /// Category of the tank that fired it. Projectiles never hit their owner.
    pub owner: Category,
}

/// Collectible upgrade lying in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupState {
    pub pickup_type: PickupType,
}

/// Drawable texture for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureId,
}

/// Bounding circle used for the simple overlap checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}
