//! Collision system: projectile hits, pickup collection, and arena bounds.
//!
//! Every collider is a circle. Destroyed bodies are skipped, and nothing is
//! removed here; pruning happens afterwards in the scene graph.

use glam::Vec2;
use tracing::info;

use tankduel_core::components::{Body, Collider, PickupState, ProjectileState, TankState, Transform};
use tankduel_core::enums::{Category, PickupType, PlayerId, ProjectileType};
use tankduel_core::events::GameEvent;

use crate::entity;
use crate::pickup;
use crate::projectile;
use crate::scene::{NodeId, SceneGraph};

pub fn overlaps(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

struct TankHitbox {
    node: NodeId,
    player: PlayerId,
    category: Category,
    position: Vec2,
    radius: f32,
}

struct ProjectileHitbox {
    node: NodeId,
    projectile_type: ProjectileType,
    owner: Category,
    position: Vec2,
    radius: f32,
}

struct PickupHitbox {
    node: NodeId,
    pickup_type: PickupType,
    position: Vec2,
    radius: f32,
}

/// Resolve projectile/tank and tank/pickup contacts for this tick.
pub fn run(graph: &mut SceneGraph) {
    let world = graph.ecs();
    let tanks: Vec<TankHitbox> = world
        .query::<(&TankState, &Body, &Collider)>()
        .iter()
        .filter(|(_, (_, body, _))| !body.destroyed)
        .filter_map(|(node, (tank, _, collider))| {
            Some(TankHitbox {
                node,
                player: tank.tank_type.player(),
                category: tank.tank_type.category(),
                position: graph.world_position(node)?,
                radius: collider.radius,
            })
        })
        .collect();
    let projectiles: Vec<ProjectileHitbox> = world
        .query::<(&ProjectileState, &Body, &Collider)>()
        .iter()
        .filter(|(_, (_, body, _))| !body.destroyed)
        .filter_map(|(node, (projectile, _, collider))| {
            Some(ProjectileHitbox {
                node,
                projectile_type: projectile.projectile_type,
                owner: projectile.owner,
                position: graph.world_position(node)?,
                radius: collider.radius,
            })
        })
        .collect();
    let pickups: Vec<PickupHitbox> = world
        .query::<(&PickupState, &Body, &Collider)>()
        .iter()
        .filter(|(_, (_, body, _))| !body.destroyed)
        .filter_map(|(node, (pickup, _, collider))| {
            Some(PickupHitbox {
                node,
                pickup_type: pickup.pickup_type,
                position: graph.world_position(node)?,
                radius: collider.radius,
            })
        })
        .collect();

    for projectile in &projectiles {
        for tank in &tanks {
            if projectile.owner.intersects(tank.category) {
                continue;
            }
            if entity::is_destroyed(graph, tank.node) {
                continue;
            }
            if !overlaps(projectile.position, projectile.radius, tank.position, tank.radius) {
                continue;
            }

            let damage = projectile::damage(projectile.projectile_type);
            entity::destroy(graph, projectile.node);
            let Some(remaining) = entity::damage(graph, tank.node, damage) else {
                continue;
            };
            graph.emit(GameEvent::TankHit {
                player: tank.player,
                damage,
                remaining,
            });
            if remaining == 0 {
                info!(player = ?tank.player, "tank destroyed");
                graph.emit(GameEvent::TankDestroyed { player: tank.player });
            }
            break;
        }
    }

    for pickup in &pickups {
        for tank in &tanks {
            if entity::is_destroyed(graph, tank.node) {
                continue;
            }
            if !overlaps(pickup.position, pickup.radius, tank.position, tank.radius) {
                continue;
            }

            if let Ok((state, body)) = graph
                .ecs_mut()
                .query_one_mut::<(&mut TankState, &mut Body)>(tank.node)
            {
                pickup::apply(pickup.pickup_type, state, body);
            }
            entity::destroy(graph, pickup.node);
            graph.emit(GameEvent::PickupCollected {
                player: tank.player,
                pickup_type: pickup.pickup_type,
            });
            break;
        }
    }
}

/// Keep tanks inside the arena and destroy projectiles that leave it.
pub fn enforce_bounds(graph: &mut SceneGraph, width: f32, height: f32) {
    let mut escaped = Vec::new();
    for (node, (transform, collider, tank, projectile)) in graph.ecs_mut().query_mut::<(
        &mut Transform,
        &Collider,
        Option<&TankState>,
        Option<&ProjectileState>,
    )>() {
        if tank.is_some() {
            let r = collider.radius;
            transform.position.x = transform.position.x.clamp(r, (width - r).max(r));
            transform.position.y = transform.position.y.clamp(r, (height - r).max(r));
        } else if projectile.is_some() {
            let p = transform.position;
            if p.x < 0.0 || p.y < 0.0 || p.x > width || p.y > height {
                escaped.push(node);
            }
        }
    }
    for node in escaped {
        entity::destroy(graph, node);
    }
}
