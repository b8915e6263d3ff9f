//! Tank behavior: facing, firing state machine, and projectile spawning.
//!
//! Firing is intent-based. `fire` only raises the intent flag; the tank's
//! own update decides whether a shot actually happens. A shot needs the
//! cooldown at zero, resets the cooldown to the current fire interval, and
//! is delivered as a `SCENE` command so the projectile is created by the
//! scene root rather than by the tank. The intent is cleared on every
//! update whether or not a shot went out, so a held key keeps firing only
//! because realtime input re-arms the intent each tick.

use std::time::Duration;

use glam::Vec2;
use tracing::debug;

use tankduel_core::components::{Body, Collider, Sprite, TankState, Transform};
use tankduel_core::constants::{
    FIRE_RATE_UPGRADE_FACTOR, MUZZLE_OFFSET, PROJECTILE_ROTATION_OFFSET, TANK_SCALE,
};
use tankduel_core::enums::{Category, Direction, ProjectileType, TankType};
use tankduel_core::events::GameEvent;
use tankduel_core::tables::tank_data;

use crate::command::{Command, CommandQueue};
use crate::error::SceneError;
use crate::projectile;
use crate::scene::{NodeId, SceneGraph};

/// Observable state of the firing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiringState {
    Idle,
    CooldownActive,
}

pub fn new_state(tank_type: TankType) -> TankState {
    let data = tank_data(tank_type);
    TankState {
        tank_type,
        facing: tank_type.initial_facing(),
        fire_interval: data.fire_interval,
        fire_cooldown: Duration::ZERO,
        is_firing: false,
        is_launching_missile: false,
        missile_ammo: data.missile_ammo,
        fire_rate_upgrade: Duration::ZERO,
        explosive_shots_upgrade: Duration::ZERO,
    }
}

/// Spawn a tank under `parent`, facing its type's initial direction.
pub fn spawn(
    graph: &mut SceneGraph,
    parent: NodeId,
    tank_type: TankType,
    position: Vec2,
) -> Result<NodeId, SceneError> {
    let node = spawn_detached(graph, tank_type, position);
    if let Err(err) = graph.attach_child(parent, node) {
        let _ = graph.remove_node(node);
        return Err(err);
    }
    Ok(node)
}

/// Spawn a tank outside the tree; the caller attaches it.
pub fn spawn_detached(graph: &mut SceneGraph, tank_type: TankType, position: Vec2) -> NodeId {
    let data = tank_data(tank_type);
    let state = new_state(tank_type);
    let transform = Transform {
        position,
        rotation: state.facing.rotation(),
        scale: Vec2::splat(TANK_SCALE),
    };
    graph.spawn_node(
        tank_type.category(),
        transform,
        (
            Body::new(data.hitpoints),
            state,
            Sprite {
                texture: data.texture,
            },
            Collider {
                radius: data.radius,
            },
        ),
    )
}

/// Raise the firing intent. Calling it again before the next update has no
/// further effect.
pub fn fire(tank: &mut TankState) {
    tank.is_firing = true;
}

/// Request a missile launch on the next update.
pub fn launch_missile(tank: &mut TankState) {
    tank.is_launching_missile = true;
}

pub fn firing_state(tank: &TankState) -> FiringState {
    if tank.fire_cooldown.is_zero() {
        FiringState::Idle
    } else {
        FiringState::CooldownActive
    }
}

pub fn max_speed(tank: &TankState) -> f32 {
    tank_data(tank.tank_type).speed
}

pub fn has_fire_rate_upgrade(tank: &TankState) -> bool {
    !tank.fire_rate_upgrade.is_zero()
}

pub fn has_explosive_shots_upgrade(tank: &TankState) -> bool {
    !tank.explosive_shots_upgrade.is_zero()
}

/// Interval applied after a shot, shortened by the fire-rate upgrade.
pub fn effective_fire_interval(tank: &TankState) -> Duration {
    if has_fire_rate_upgrade(tank) {
        tank.fire_interval / FIRE_RATE_UPGRADE_FACTOR
    } else {
        tank.fire_interval
    }
}

/// Projectile used for regular shots.
pub fn shot_type(tank: &TankState) -> ProjectileType {
    if has_explosive_shots_upgrade(tank) {
        ProjectileType::ExplosiveShell
    } else {
        ProjectileType::Bullet
    }
}

/// Consume the firing intent. Returns the projectile to fire when the
/// cooldown allows a shot.
pub fn poll_fire(tank: &mut TankState) -> Option<ProjectileType> {
    let mut shot = None;
    if tank.is_firing {
        if tank.fire_cooldown.is_zero() {
            shot = Some(shot_type(tank));
            tank.fire_cooldown = effective_fire_interval(tank);
        }
        tank.is_firing = false;
    }
    shot
}

/// Consume the missile request. Returns whether a missile goes out.
pub fn poll_missile(tank: &mut TankState) -> bool {
    let mut launched = false;
    if tank.is_launching_missile {
        if tank.missile_ammo > 0 {
            tank.missile_ammo -= 1;
            launched = true;
        }
        tank.is_launching_missile = false;
    }
    launched
}

/// Count down the fire cooldown and upgrade timers.
pub fn tick_timers(tank: &mut TankState, dt: Duration) {
    if !tank.fire_cooldown.is_zero() {
        tank.fire_cooldown = tank.fire_cooldown.saturating_sub(dt);
    }
    tank.fire_rate_upgrade = tank.fire_rate_upgrade.saturating_sub(dt);
    tank.explosive_shots_upgrade = tank.explosive_shots_upgrade.saturating_sub(dt);
}

/// Tank part of the per-node update. Nodes without a tank state are skipped.
pub fn update_current(graph: &mut SceneGraph, node: NodeId, dt: Duration, commands: &mut CommandQueue) {
    let Ok(tank) = graph.ecs_mut().query_one_mut::<&mut TankState>(node) else {
        return;
    };

    let shot = poll_fire(tank);
    let missile = poll_missile(tank);
    tick_timers(tank, dt);

    if let Some(projectile_type) = shot {
        commands.push(fire_command(node, projectile_type));
    }
    if missile {
        commands.push(fire_command(node, ProjectileType::Missile));
    }
}

/// Command delivered to the scene root that creates one projectile from `tank`.
pub fn fire_command(tank: NodeId, projectile_type: ProjectileType) -> Command {
    Command::new(Category::SCENE, move |graph, scene, _dt| {
        create_projectile(graph, tank, scene, projectile_type);
    })
}

/// Turn the tank to a fixed facing.
pub fn face_direction(graph: &mut SceneGraph, node: NodeId, direction: Direction) -> bool {
    match graph
        .ecs_mut()
        .query_one_mut::<(&mut TankState, &mut Transform)>(node)
    {
        Ok((tank, transform)) => {
            tank.facing = direction;
            transform.rotation = direction.rotation();
            true
        }
        Err(_) => false,
    }
}

/// Spawn a projectile at the tank's muzzle, travelling along its facing at
/// the projectile's max speed. The projectile is attached under `parent`
/// (the scene root), so it outlives the tank and ignores later tank moves.
pub fn create_projectile(
    graph: &mut SceneGraph,
    tank: NodeId,
    parent: NodeId,
    projectile_type: ProjectileType,
) -> Option<NodeId> {
    let tank_type = graph.ecs().get::<&TankState>(tank).ok()?.tank_type;
    let rotation = graph.transform(tank)?.rotation;
    let muzzle = graph.world_transform(tank)?.transform_point2(MUZZLE_OFFSET);
    let position = graph.world_transform(parent)?.inverse().transform_point2(muzzle);

    let angle = rotation.to_radians();
    let velocity = Vec2::new(angle.cos(), angle.sin()) * projectile::max_speed(projectile_type);

    let node = projectile::spawn(
        graph,
        parent,
        projectile_type,
        tank_type.category(),
        position,
        velocity,
        rotation + PROJECTILE_ROTATION_OFFSET,
    )
    .ok()?;

    debug!(
        player = ?tank_type.player(),
        ?projectile_type,
        x = position.x,
        y = position.y,
        "projectile fired"
    );
    graph.emit(GameEvent::ProjectileFired {
        player: tank_type.player(),
        projectile_type,
    });
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: Duration = Duration::from_millis(100);

    #[test]
    fn test_new_tank_is_idle() {
        let tank = new_state(TankType::Player1Tank);
        assert_eq!(firing_state(&tank), FiringState::Idle);
        assert!(!tank.is_firing);
        assert_eq!(tank.facing, Direction::Down);
        assert_eq!(new_state(TankType::Player2Tank).facing, Direction::Up);
    }

    #[test]
    fn test_repeated_fire_is_one_shot() {
        let mut tank = new_state(TankType::Player1Tank);
        fire(&mut tank);
        fire(&mut tank);
        fire(&mut tank);
        assert_eq!(poll_fire(&mut tank), Some(ProjectileType::Bullet));
        assert_eq!(poll_fire(&mut tank), None);
        assert_eq!(firing_state(&tank), FiringState::CooldownActive);
    }

    #[test]
    fn test_intent_cleared_during_cooldown() {
        let mut tank = new_state(TankType::Player1Tank);
        fire(&mut tank);
        poll_fire(&mut tank);
        tick_timers(&mut tank, DT);

        fire(&mut tank);
        assert_eq!(poll_fire(&mut tank), None);
        assert!(!tank.is_firing);
    }

    #[test]
    fn test_cooldown_counts_down_to_zero() {
        let mut tank = new_state(TankType::Player1Tank);
        tank.fire_interval = Duration::from_millis(300);
        fire(&mut tank);
        poll_fire(&mut tank);
        assert_eq!(tank.fire_cooldown, Duration::from_millis(300));
        for _ in 0..3 {
            tick_timers(&mut tank, DT);
        }
        assert_eq!(firing_state(&tank), FiringState::Idle);
        tick_timers(&mut tank, DT);
        assert_eq!(tank.fire_cooldown, Duration::ZERO);
    }

    #[test]
    fn test_upgrades_change_shot() {
        let mut tank = new_state(TankType::Player2Tank);
        tank.fire_rate_upgrade = Duration::from_secs(1);
        tank.explosive_shots_upgrade = Duration::from_secs(1);
        assert_eq!(effective_fire_interval(&tank), tank.fire_interval / 2);
        assert_eq!(shot_type(&tank), ProjectileType::ExplosiveShell);

        tick_timers(&mut tank, Duration::from_secs(2));
        assert!(!has_fire_rate_upgrade(&tank));
        assert!(!has_explosive_shots_upgrade(&tank));
        assert_eq!(shot_type(&tank), ProjectileType::Bullet);
    }

    #[test]
    fn test_missile_needs_ammo() {
        let mut tank = new_state(TankType::Player1Tank);
        tank.missile_ammo = 1;
        launch_missile(&mut tank);
        assert!(poll_missile(&mut tank));
        assert_eq!(tank.missile_ammo, 0);
        launch_missile(&mut tank);
        assert!(!poll_missile(&mut tank));
        assert!(!tank.is_launching_missile);
    }
}
