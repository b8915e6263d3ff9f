//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events collected during one update. The sound collaborator maps
/// them to effects; the HUD may use them for flashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ProjectileFired {
        player: PlayerId,
        projectile_type: ProjectileType,
    },
    TankHit {
        player: PlayerId,
        damage: i32,
        remaining: i32,
    },
    TankDestroyed {
        player: PlayerId,
    },
    PickupSpawned {
        pickup_type: PickupType,
    },
    PickupCollected {
        player: PlayerId,
        pickup_type: PickupType,
    },
    GameOver {
        winner: Option<PlayerId>,
    },
}
