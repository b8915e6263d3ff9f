//! Pickups: collectible upgrades and their periodic spawner.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tankduel_core::components::{Body, Collider, PickupState, Sprite, TankState, Transform};
use tankduel_core::constants::{HEALTH_REFILL_AMOUNT, MISSILE_REFILL_AMOUNT, UPGRADE_DURATION};
use tankduel_core::enums::{Category, PickupType};
use tankduel_core::tables::pickup_data;

use crate::entity;
use crate::error::SceneError;
use crate::scene::{NodeId, SceneGraph};

pub fn spawn(
    graph: &mut SceneGraph,
    parent: NodeId,
    pickup_type: PickupType,
    position: Vec2,
) -> Result<NodeId, SceneError> {
    let data = pickup_data(pickup_type);
    graph.spawn_child(
        parent,
        Category::PICKUP,
        Transform::from_position(position),
        (
            Body::new(1),
            PickupState { pickup_type },
            Sprite {
                texture: data.texture,
            },
            Collider {
                radius: data.radius,
            },
        ),
    )
}

/// Apply a collected pickup to a tank.
pub fn apply(pickup_type: PickupType, tank: &mut TankState, body: &mut Body) {
    match pickup_type {
        PickupType::HealthRefill => entity::apply_repair(body, HEALTH_REFILL_AMOUNT),
        PickupType::MissileRefill => tank.missile_ammo += MISSILE_REFILL_AMOUNT,
        PickupType::FireRate => tank.fire_rate_upgrade = UPGRADE_DURATION,
        PickupType::ExplosiveShots => tank.explosive_shots_upgrade = UPGRADE_DURATION,
    }
}

/// Drops a random pickup into the arena at a fixed interval while fewer
/// than `max_pickups` are lying around.
#[derive(Debug, Clone)]
pub struct PickupSpawner {
    pub interval: Duration,
    pub max_pickups: usize,
    /// Spawn rectangle, inclusive min and exclusive max corner.
    pub min: Vec2,
    pub max: Vec2,
    elapsed: Duration,
}

impl PickupSpawner {
    pub fn new(interval: Duration, max_pickups: usize, min: Vec2, max: Vec2) -> Self {
        Self {
            interval,
            max_pickups,
            min,
            max,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the timer. When it elapses, returns the type and position of
    /// the pickup to spawn, if the cap allows one.
    pub fn tick(
        &mut self,
        dt: Duration,
        rng: &mut ChaCha8Rng,
        current_pickups: usize,
    ) -> Option<(PickupType, Vec2)> {
        if self.interval.is_zero() {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed -= self.interval;

        if current_pickups >= self.max_pickups || self.min.x >= self.max.x || self.min.y >= self.max.y {
            return None;
        }

        let pickup_type = PickupType::ALL[rng.gen_range(0..PickupType::ALL.len())];
        let position = Vec2::new(
            rng.gen_range(self.min.x..self.max.x),
            rng.gen_range(self.min.y..self.max.y),
        );
        Some((pickup_type, position))
    }
}
