//! Enumeration types used throughout the game.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Routing tag for scene nodes. A command reaches every node whose
    /// category intersects the command's category.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Category: u32 {
        const SCENE = 1 << 0;
        const PLAYER1_TANK = 1 << 1;
        const PLAYER2_TANK = 1 << 2;
        const PROJECTILE = 1 << 3;
        const PICKUP = 1 << 4;
        /// Both player tanks.
        const ANY_TANK = Self::PLAYER1_TANK.bits() | Self::PLAYER2_TANK.bits();
    }
}

/// One of the two local players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn tank_type(self) -> TankType {
        match self {
            PlayerId::One => TankType::Player1Tank,
            PlayerId::Two => TankType::Player2Tank,
        }
    }

    pub fn category(self) -> Category {
        self.tank_type().category()
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Short label used by the HUD ("P1", "P2").
    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "P1",
            PlayerId::Two => "P2",
        }
    }
}

/// Tank variants. Indexes the tank data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankType {
    Player1Tank,
    Player2Tank,
}

impl TankType {
    pub fn category(self) -> Category {
        match self {
            TankType::Player1Tank => Category::PLAYER1_TANK,
            TankType::Player2Tank => Category::PLAYER2_TANK,
        }
    }

    pub fn player(self) -> PlayerId {
        match self {
            TankType::Player1Tank => PlayerId::One,
            TankType::Player2Tank => PlayerId::Two,
        }
    }

    /// Direction the tank faces when it enters the arena.
    pub fn initial_facing(self) -> Direction {
        match self {
            TankType::Player1Tank => Direction::Down,
            TankType::Player2Tank => Direction::Up,
        }
    }
}

/// Projectile variants. Indexes the projectile data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileType {
    /// Standard shot.
    Bullet,
    /// Shot fired while the explosive-shots upgrade is active.
    ExplosiveShell,
    /// Limited-ammo heavy shot launched by the discrete missile action.
    Missile,
}

/// Collectible upgrade variants. Indexes the pickup data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupType {
    HealthRefill,
    MissileRefill,
    FireRate,
    ExplosiveShots,
}

impl PickupType {
    pub const ALL: [PickupType; 4] = [
        PickupType::HealthRefill,
        PickupType::MissileRefill,
        PickupType::FireRate,
        PickupType::ExplosiveShots,
    ];
}

/// Four-way facing. Screen coordinates: +x right, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Rotation in degrees for this facing.
    pub fn rotation(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => -90.0,
            Direction::Left => 180.0,
            Direction::Down => 90.0,
        }
    }

    /// Unit vector pointing along this facing.
    pub fn unit_vector(self) -> Vec2 {
        match self {
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Down => Vec2::Y,
        }
    }
}

/// Semantic actions a player can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    LaunchMissile,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 6] = [
        PlayerAction::MoveLeft,
        PlayerAction::MoveRight,
        PlayerAction::MoveUp,
        PlayerAction::MoveDown,
        PlayerAction::Fire,
        PlayerAction::LaunchMissile,
    ];

    /// Realtime actions are polled every tick while their key is held.
    /// The rest fire once per key press.
    pub fn is_realtime(self) -> bool {
        match self {
            PlayerAction::MoveLeft
            | PlayerAction::MoveRight
            | PlayerAction::MoveUp
            | PlayerAction::MoveDown
            | PlayerAction::Fire => true,
            PlayerAction::LaunchMissile => false,
        }
    }

    /// Facing for movement actions.
    pub fn direction(self) -> Option<Direction> {
        match self {
            PlayerAction::MoveLeft => Some(Direction::Left),
            PlayerAction::MoveRight => Some(Direction::Right),
            PlayerAction::MoveUp => Some(Direction::Up),
            PlayerAction::MoveDown => Some(Direction::Down),
            PlayerAction::Fire | PlayerAction::LaunchMissile => None,
        }
    }
}

/// Texture keys resolved by the external resource holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    Player1Tank,
    Player2Tank,
    Bullet,
    ExplosiveShell,
    Missile,
    HealthRefill,
    MissileRefill,
    FireRate,
    ExplosiveShots,
}

/// Text colors available to the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Blue,
    Green,
    White,
}
