//! Game constants and tuning parameters.

use std::time::Duration;

use glam::Vec2;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Playfield width in pixels.
pub const ARENA_WIDTH: f32 = 900.0;

/// Playfield height in pixels. The HUD strip sits below it.
pub const ARENA_HEIGHT: f32 = 600.0;

/// Height of the HUD strip under the arena.
pub const HUD_HEIGHT: f32 = 200.0;

/// Pickups never spawn closer than this to the arena edge.
pub const PICKUP_SPAWN_MARGIN: f32 = 60.0;

// --- Tanks ---

/// Sprite scale applied to tank nodes.
pub const TANK_SCALE: f32 = 5.0;

/// Muzzle position in tank-local (unscaled) coordinates.
pub const MUZZLE_OFFSET: Vec2 = Vec2::new(5.0, -1.0);

/// Player 1 spawn point.
pub const PLAYER1_SPAWN: Vec2 = Vec2::new(450.0, 100.0);

/// Player 2 spawn point.
pub const PLAYER2_SPAWN: Vec2 = Vec2::new(450.0, 500.0);

/// Fire interval divisor while the fire-rate upgrade is active.
pub const FIRE_RATE_UPGRADE_FACTOR: u32 = 2;

/// How long a timed upgrade lasts after pickup.
pub const UPGRADE_DURATION: Duration = Duration::from_secs(10);

// --- Projectiles ---

/// Projectile sprites are rotated this many degrees from the firing angle.
pub const PROJECTILE_ROTATION_OFFSET: f32 = 90.0;

// --- Pickups ---

/// Default interval between pickup spawns.
pub const PICKUP_SPAWN_INTERVAL: Duration = Duration::from_secs(8);

/// Default maximum number of pickups lying in the arena at once.
pub const MAX_PICKUPS: usize = 3;

/// Hitpoints restored by a health refill.
pub const HEALTH_REFILL_AMOUNT: i32 = 25;

/// Missiles granted by a missile refill.
pub const MISSILE_REFILL_AMOUNT: u32 = 3;
