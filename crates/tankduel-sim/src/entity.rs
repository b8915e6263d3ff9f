//! Entity behavior: health and velocity shared by tanks, projectiles, and pickups.
//!
//! Hitpoints never go below zero. Reaching zero sets the destroyed flag; the
//! node itself is only removed later by the scene graph's pruning pass.

use std::time::Duration;

use glam::Vec2;

use tankduel_core::components::{Body, Transform};

use crate::command::CommandQueue;
use crate::scene::{NodeId, SceneGraph};
use crate::tank;

/// Per-node update, run by the scene graph before the node's children.
/// Moves the body, then runs type-specific behavior.
pub fn update_current(graph: &mut SceneGraph, node: NodeId, dt: Duration, commands: &mut CommandQueue) {
    if let Ok((body, transform)) = graph.ecs_mut().query_one_mut::<(&Body, &mut Transform)>(node) {
        integrate(body, transform, dt);
    }
    tank::update_current(graph, node, dt, commands);
}

/// Advance position by velocity * dt.
pub fn integrate(body: &Body, transform: &mut Transform, dt: Duration) {
    transform.position += body.velocity * dt.as_secs_f32();
}

/// Add `amount` hitpoints, never exceeding the maximum.
pub fn apply_repair(body: &mut Body, amount: i32) {
    if body.destroyed {
        return;
    }
    body.hitpoints = (body.hitpoints + amount.max(0)).min(body.max_hitpoints);
}

/// Remove `amount` hitpoints, clamped at zero. Returns the remaining hitpoints.
pub fn apply_damage(body: &mut Body, amount: i32) -> i32 {
    body.hitpoints = (body.hitpoints - amount.max(0)).max(0);
    if body.hitpoints == 0 {
        body.destroyed = true;
    }
    body.hitpoints
}

pub fn accelerate(graph: &mut SceneGraph, node: NodeId, velocity: Vec2) -> bool {
    match graph.ecs_mut().query_one_mut::<&mut Body>(node) {
        Ok(body) => {
            body.velocity += velocity;
            true
        }
        Err(_) => false,
    }
}

/// Damage a live entity. Returns the remaining hitpoints, or `None` if the
/// node has no body or was already destroyed.
pub fn damage(graph: &mut SceneGraph, node: NodeId, amount: i32) -> Option<i32> {
    let body = graph.ecs_mut().query_one_mut::<&mut Body>(node).ok()?;
    if body.destroyed {
        return None;
    }
    Some(apply_damage(body, amount))
}

/// Mark an entity for removal regardless of its hitpoints.
pub fn destroy(graph: &mut SceneGraph, node: NodeId) {
    if let Ok(body) = graph.ecs_mut().query_one_mut::<&mut Body>(node) {
        body.hitpoints = 0;
        body.destroyed = true;
    }
}

pub fn is_destroyed(graph: &SceneGraph, node: NodeId) -> bool {
    graph
        .ecs()
        .get::<&Body>(node)
        .map(|b| b.destroyed)
        .unwrap_or(false)
}
