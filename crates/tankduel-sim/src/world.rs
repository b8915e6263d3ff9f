//! World driver: builds the arena scene and runs one frame at a time.
//!
//! `World` owns the scene graph, the command queue, and the pickup RNG.
//! Completely headless; the app layer feeds it input and pulls snapshots.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tankduel_core::components::{Body, PickupState, ProjectileState, TankState};
use tankduel_core::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, MAX_PICKUPS, PICKUP_SPAWN_INTERVAL, PICKUP_SPAWN_MARGIN,
    PLAYER1_SPAWN, PLAYER2_SPAWN,
};
use tankduel_core::enums::PlayerId;
use tankduel_core::events::GameEvent;
use tankduel_core::state::{GameSnapshot, TankView};
use tankduel_core::types::SimTime;

use crate::collision;
use crate::command::{Command, CommandQueue};
use crate::pickup::{self, PickupSpawner};
use crate::render::RenderTarget;
use crate::scene::{NodeId, SceneGraph};
use crate::tank;

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and input = same match.
    pub seed: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    pub pickups_enabled: bool,
    /// Seconds between pickup drops.
    pub pickup_interval_secs: f32,
    pub max_pickups: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            pickups_enabled: true,
            pickup_interval_secs: PICKUP_SPAWN_INTERVAL.as_secs_f32(),
            max_pickups: MAX_PICKUPS,
        }
    }
}

pub struct World {
    config: SimConfig,
    graph: SceneGraph,
    commands: CommandQueue,
    tanks: [NodeId; 2],
    spawner: PickupSpawner,
    rng: ChaCha8Rng,
    time: SimTime,
    game_over: bool,
    winner: Option<PlayerId>,
    events: Vec<GameEvent>,
}

impl World {
    /// Build the arena: root plus one tank per player at its spawn point.
    pub fn new(config: SimConfig) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let tanks = PlayerId::ALL.map(|player| {
            let position = match player {
                PlayerId::One => PLAYER1_SPAWN,
                PlayerId::Two => PLAYER2_SPAWN,
            };
            let node = tank::spawn_detached(&mut graph, player.tank_type(), position);
            // A fresh node always attaches under the root.
            let _ = graph.attach_child(root, node);
            node
        });

        let margin = Vec2::splat(PICKUP_SPAWN_MARGIN);
        let interval = if config.pickups_enabled {
            Duration::try_from_secs_f32(config.pickup_interval_secs).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
        let spawner = PickupSpawner::new(
            interval,
            config.max_pickups,
            margin,
            Vec2::new(config.arena_width, config.arena_height) - margin,
        );

        info!(seed = config.seed, "match started");
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            graph,
            commands: CommandQueue::new(),
            tanks,
            spawner,
            time: SimTime::default(),
            game_over: false,
            winner: None,
            events: Vec::new(),
        }
    }

    /// Queue that input producers append to. Drained on the next update.
    pub fn command_queue(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    pub fn queue_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Advance the match by `dt`. Once the match is over the scene is frozen;
    /// queued input is discarded and no events are reported.
    pub fn update(&mut self, dt: Duration) {
        self.events.clear();
        if self.game_over {
            self.commands.clear();
            return;
        }

        // Movement commands accumulate velocity, so tanks start each frame still.
        for (_, (_, body)) in self.graph.ecs_mut().query_mut::<(&TankState, &mut Body)>() {
            body.velocity = Vec2::ZERO;
        }

        self.drain_commands(dt);
        self.graph.update(dt, &mut self.commands);
        // Fire commands pushed by tanks during the pass.
        self.drain_commands(dt);

        collision::run(&mut self.graph);
        collision::enforce_bounds(&mut self.graph, self.config.arena_width, self.config.arena_height);
        self.graph.prune_destroyed();

        self.spawn_pickups(dt);
        self.time.advance(dt);
        self.check_game_over();

        let events = self.graph.take_events();
        self.events.extend(events);
    }

    /// Update by `dt` and return the resulting snapshot.
    pub fn tick(&mut self, dt: Duration) -> GameSnapshot {
        self.update(dt);
        self.snapshot()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        self.graph.draw(target);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let tanks = PlayerId::ALL
            .into_iter()
            .map(|player| self.tank_view(player))
            .collect();
        GameSnapshot {
            time: self.time,
            tanks,
            projectile_count: self.graph.count_in_tree::<ProjectileState>(),
            pickup_count: self.graph.count_in_tree::<PickupState>(),
            game_over: self.game_over,
            winner: self.winner,
            events: self.events.clone(),
        }
    }

    /// The player's tank node, if it is still in the scene.
    pub fn tank(&self, player: PlayerId) -> Option<NodeId> {
        let node = self.tanks[player_index(player)];
        self.graph.contains(node).then_some(node)
    }

    pub fn tank_state(&self, player: PlayerId) -> Option<TankState> {
        let node = self.tank(player)?;
        self.graph.ecs().get::<&TankState>(node).ok().map(|s| *s)
    }

    pub fn tank_body(&self, player: PlayerId) -> Option<Body> {
        let node = self.tank(player)?;
        self.graph.ecs().get::<&Body>(node).ok().map(|b| *b)
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn drain_commands(&mut self, dt: Duration) {
        while let Some(command) = self.commands.pop() {
            self.graph.on_command(&command, dt);
        }
    }

    fn spawn_pickups(&mut self, dt: Duration) {
        let current = self.graph.ecs().query::<&PickupState>().iter().count();
        let Some((pickup_type, position)) = self.spawner.tick(dt, &mut self.rng, current) else {
            return;
        };
        let root = self.graph.root();
        if pickup::spawn(&mut self.graph, root, pickup_type, position).is_ok() {
            debug!(?pickup_type, x = position.x, y = position.y, "pickup spawned");
            self.graph.emit(GameEvent::PickupSpawned { pickup_type });
        }
    }

    fn check_game_over(&mut self) {
        let alive = PlayerId::ALL.map(|player| self.tank_alive(player));
        let winner = match alive {
            [true, true] => return,
            [true, false] => Some(PlayerId::One),
            [false, true] => Some(PlayerId::Two),
            [false, false] => None,
        };
        self.game_over = true;
        self.winner = winner;
        info!(?winner, tick = self.time.tick, elapsed = self.time.elapsed_secs(), "match over");
        self.graph.emit(GameEvent::GameOver { winner });
    }

    fn tank_alive(&self, player: PlayerId) -> bool {
        self.tank_body(player).is_some_and(|body| !body.destroyed)
    }

    fn tank_view(&self, player: PlayerId) -> TankView {
        let (Some(node), Some(state), Some(body)) = (
            self.tank(player),
            self.tank_state(player),
            self.tank_body(player),
        ) else {
            return TankView::destroyed(player);
        };
        TankView {
            player,
            hitpoints: body.hitpoints,
            missile_ammo: state.missile_ammo,
            position: self.graph.world_position(node).unwrap_or_default(),
            facing: state.facing,
            has_fire_rate_upgrade: tank::has_fire_rate_upgrade(&state),
            has_explosive_shots_upgrade: tank::has_explosive_shots_upgrade(&state),
            alive: !body.destroyed,
        }
    }
}

fn player_index(player: PlayerId) -> usize {
    match player {
        PlayerId::One => 0,
        PlayerId::Two => 1,
    }
}
