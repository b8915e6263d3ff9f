//! Player input binding.
//!
//! A player owns two maps: physical key to semantic action, and action to
//! a command template. Templates are built once, with the category of the
//! player's own tank, so a command can only ever reach that tank.

use std::collections::{BTreeMap, HashMap};

use tankduel_core::components::TankState;
use tankduel_core::enums::{Category, Direction, PlayerAction, PlayerId};
use tankduel_core::input::{InputEvent, Key};
use tracing::debug;

use crate::command::{Command, CommandQueue};
use crate::entity;
use crate::tank;

/// Polled keyboard state. Implemented by whatever owns the window.
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Key layout used when a player is created without explicit bindings.
pub fn default_bindings(id: PlayerId) -> BTreeMap<Key, PlayerAction> {
    let keys = match id {
        PlayerId::One => [Key::A, Key::D, Key::W, Key::S, Key::Space, Key::M],
        PlayerId::Two => [
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Down,
            Key::RControl,
            Key::RShift,
        ],
    };
    keys.into_iter().zip(PlayerAction::ALL).collect()
}

#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    key_binding: BTreeMap<Key, PlayerAction>,
    action_binding: HashMap<PlayerAction, Command>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self::with_bindings(id, default_bindings(id))
    }

    pub fn with_bindings(id: PlayerId, key_binding: BTreeMap<Key, PlayerAction>) -> Self {
        let category = id.category();
        let action_binding = PlayerAction::ALL
            .into_iter()
            .map(|action| (action, action_command(category, action)))
            .collect();
        Self {
            id,
            key_binding,
            action_binding,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Category every command of this player is addressed to.
    pub fn category(&self) -> Category {
        self.id.category()
    }

    /// Edge-triggered input. Only key presses bound to non-realtime actions
    /// produce a command; everything else is left to realtime polling.
    pub fn handle_event(&self, event: &InputEvent, commands: &mut CommandQueue) {
        let InputEvent::KeyPressed(key) = *event else {
            return;
        };
        if let Some(&action) = self.key_binding.get(&key) {
            if !action.is_realtime() {
                self.push_action(action, commands);
            }
        }
    }

    /// Level-triggered input, polled every tick. Pushes one command per held
    /// key bound to a realtime action.
    pub fn handle_realtime_input(&self, input: &dyn InputSource, commands: &mut CommandQueue) {
        for (&key, &action) in &self.key_binding {
            if action.is_realtime() && input.is_key_pressed(key) {
                self.push_action(action, commands);
            }
        }
    }

    /// Bind `key` to `action`. Any key previously bound to `action` is
    /// released first, and `key` loses whatever action it had before.
    pub fn assign_key(&mut self, action: PlayerAction, key: Key) {
        self.key_binding.retain(|_, bound| *bound != action);
        if let Some(previous) = self.key_binding.insert(key, action) {
            if previous != action {
                debug!(player = ?self.id, ?key, ?previous, "key rebound");
            }
        }
    }

    /// Key bound to `action`, or `Key::Unknown` when it has none.
    pub fn assigned_key(&self, action: PlayerAction) -> Key {
        self.key_binding
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(&key, _)| key)
            .unwrap_or(Key::Unknown)
    }

    pub fn key_bindings(&self) -> &BTreeMap<Key, PlayerAction> {
        &self.key_binding
    }

    fn push_action(&self, action: PlayerAction, commands: &mut CommandQueue) {
        if let Some(command) = self.action_binding.get(&action) {
            commands.push(command.clone());
        }
    }
}

fn action_command(category: Category, action: PlayerAction) -> Command {
    match action {
        PlayerAction::MoveLeft => mover(category, Direction::Left),
        PlayerAction::MoveRight => mover(category, Direction::Right),
        PlayerAction::MoveUp => mover(category, Direction::Up),
        PlayerAction::MoveDown => mover(category, Direction::Down),
        PlayerAction::Fire => Command::derived::<TankState, _>(category, |state, _| tank::fire(state)),
        PlayerAction::LaunchMissile => {
            Command::derived::<TankState, _>(category, |state, _| tank::launch_missile(state))
        }
    }
}

/// Turn the tank to `direction` and push it along at its max speed.
fn mover(category: Category, direction: Direction) -> Command {
    Command::new(category, move |graph, node, _dt| {
        if !tank::face_direction(graph, node, direction) {
            return;
        }
        let speed = graph
            .ecs()
            .get::<&TankState>(node)
            .map(|state| tank::max_speed(&state))
            .unwrap_or(0.0);
        entity::accelerate(graph, node, direction.unit_vector() * speed);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Held(HashSet<Key>);

    impl InputSource for Held {
        fn is_key_pressed(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    #[test]
    fn test_default_bindings() {
        let p1 = Player::new(PlayerId::One);
        assert_eq!(p1.assigned_key(PlayerAction::MoveLeft), Key::A);
        assert_eq!(p1.assigned_key(PlayerAction::Fire), Key::Space);
        assert_eq!(p1.assigned_key(PlayerAction::LaunchMissile), Key::M);

        let p2 = Player::new(PlayerId::Two);
        assert_eq!(p2.assigned_key(PlayerAction::MoveUp), Key::Up);
        assert_eq!(p2.category(), Category::PLAYER2_TANK);
    }

    #[test]
    fn test_assign_key_replaces_previous_key() {
        let mut player = Player::new(PlayerId::One);
        player.assign_key(PlayerAction::Fire, Key::F);
        assert_eq!(player.assigned_key(PlayerAction::Fire), Key::F);
        assert!(!player.key_bindings().contains_key(&Key::Space));
    }

    #[test]
    fn test_unbound_action_reports_unknown() {
        let player = Player::with_bindings(PlayerId::One, BTreeMap::new());
        assert_eq!(player.assigned_key(PlayerAction::Fire), Key::Unknown);
    }

    #[test]
    fn test_realtime_input_only_for_held_realtime_keys() {
        let player = Player::new(PlayerId::One);
        let held = Held([Key::W, Key::Space, Key::M, Key::Left].into_iter().collect());
        let mut commands = CommandQueue::new();
        player.handle_realtime_input(&held, &mut commands);
        // W and Space; M is not realtime, Left belongs to nobody here.
        assert_eq!(commands.len(), 2);
        while let Some(command) = commands.pop() {
            assert_eq!(command.category(), Category::PLAYER1_TANK);
        }
    }

    #[test]
    fn test_event_only_for_discrete_actions() {
        let player = Player::new(PlayerId::One);
        let mut commands = CommandQueue::new();
        player.handle_event(&InputEvent::KeyPressed(Key::Space), &mut commands);
        assert!(commands.is_empty());
        player.handle_event(&InputEvent::KeyReleased(Key::M), &mut commands);
        assert!(commands.is_empty());
        player.handle_event(&InputEvent::KeyPressed(Key::M), &mut commands);
        assert_eq!(commands.len(), 1);
    }
}
