//! Per-type data tables.
//!
//! Immutable lookups indexed by the type enums. Nothing here is mutated
//! at runtime.

use std::time::Duration;

use crate::enums::{PickupType, ProjectileType, TankType, TextureId};

/// Static data for a tank type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankData {
    pub hitpoints: i32,
    /// Maximum speed (pixels per second).
    pub speed: f32,
    pub fire_interval: Duration,
    pub missile_ammo: u32,
    /// Bounding radius in world pixels.
    pub radius: f32,
    pub texture: TextureId,
}

/// Static data for a projectile type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileData {
    pub damage: i32,
    /// Maximum speed (pixels per second).
    pub speed: f32,
    pub radius: f32,
    pub texture: TextureId,
}

/// Static data for a pickup type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupData {
    pub radius: f32,
    pub texture: TextureId,
}

static TANK_TABLE: [TankData; 2] = [
    TankData {
        hitpoints: 100,
        speed: 200.0,
        fire_interval: Duration::from_millis(500),
        missile_ammo: 2,
        radius: 20.0,
        texture: TextureId::Player1Tank,
    },
    TankData {
        hitpoints: 100,
        speed: 200.0,
        fire_interval: Duration::from_millis(500),
        missile_ammo: 2,
        radius: 20.0,
        texture: TextureId::Player2Tank,
    },
];

static PROJECTILE_TABLE: [ProjectileData; 3] = [
    ProjectileData {
        damage: 10,
        speed: 300.0,
        radius: 4.0,
        texture: TextureId::Bullet,
    },
    ProjectileData {
        damage: 25,
        speed: 250.0,
        radius: 6.0,
        texture: TextureId::ExplosiveShell,
    },
    ProjectileData {
        damage: 40,
        speed: 200.0,
        radius: 8.0,
        texture: TextureId::Missile,
    },
];

static PICKUP_TABLE: [PickupData; 4] = [
    PickupData {
        radius: 12.0,
        texture: TextureId::HealthRefill,
    },
    PickupData {
        radius: 12.0,
        texture: TextureId::MissileRefill,
    },
    PickupData {
        radius: 12.0,
        texture: TextureId::FireRate,
    },
    PickupData {
        radius: 12.0,
        texture: TextureId::ExplosiveShots,
    },
];

pub fn tank_data(tank_type: TankType) -> &'static TankData {
    &TANK_TABLE[tank_type as usize]
}

pub fn projectile_data(projectile_type: ProjectileType) -> &'static ProjectileData {
    &PROJECTILE_TABLE[projectile_type as usize]
}

pub fn pickup_data(pickup_type: PickupType) -> &'static PickupData {
    &PICKUP_TABLE[pickup_type as usize]
}
