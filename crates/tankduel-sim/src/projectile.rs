//! Projectile factory.

use glam::Vec2;

use tankduel_core::components::{Body, Collider, ProjectileState, Sprite, Transform};
use tankduel_core::enums::{Category, ProjectileType};
use tankduel_core::tables::projectile_data;

use crate::error::SceneError;
use crate::scene::{NodeId, SceneGraph};

/// Spawn a projectile under `parent` with the given local position,
/// velocity, and rotation (degrees).
pub fn spawn(
    graph: &mut SceneGraph,
    parent: NodeId,
    projectile_type: ProjectileType,
    owner: Category,
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
) -> Result<NodeId, SceneError> {
    let data = projectile_data(projectile_type);
    let mut body = Body::new(1);
    body.velocity = velocity;

    graph.spawn_child(
        parent,
        Category::PROJECTILE,
        Transform {
            position,
            rotation,
            scale: Vec2::ONE,
        },
        (
            body,
            ProjectileState {
                projectile_type,
                owner,
            },
            Sprite {
                texture: data.texture,
            },
            Collider {
                radius: data.radius,
            },
        ),
    )
}

pub fn max_speed(projectile_type: ProjectileType) -> f32 {
    projectile_data(projectile_type).speed
}

pub fn damage(projectile_type: ProjectileType) -> i32 {
    projectile_data(projectile_type).damage
}
