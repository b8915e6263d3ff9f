//! Game loop thread: runs the match at a fixed tick rate.
//!
//! The session is created inside this thread and owned by it. Key events
//! arrive via an `mpsc` channel; after each tick the latest snapshot is
//! stored in shared state for polling, and the frame is drawn to a
//! `FrameRecorder`. The thread returns a `LoopReport` when it stops.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tankduel_core::enums::PlayerId;
use tankduel_core::input::InputEvent;
use tankduel_core::state::GameSnapshot;
use tankduel_sim::player::Player;
use tankduel_sim::World;

use crate::config::AppConfig;
use crate::error::GameLoopError;
use crate::hud::Hud;
use crate::keyboard::KeyboardState;
use crate::render::{FrameRecorder, FrameStats};

/// Messages from the input side to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLoopCommand {
    Input(InputEvent),
    /// Stop after the current tick.
    Shutdown,
}

/// Final state handed back when the loop stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopReport {
    pub ticks: u64,
    pub snapshot: GameSnapshot,
    pub frames: FrameStats,
}

/// One match with everything a frame needs: world, players, held keys, and
/// the HUD. Stepped by the loop thread, or directly in tests.
pub struct GameSession {
    config: AppConfig,
    world: World,
    players: [Player; 2],
    keyboard: KeyboardState,
    hud: Hud,
    recorder: FrameRecorder,
    tick: u64,
    last_snapshot: GameSnapshot,
}

impl GameSession {
    pub fn new(config: AppConfig) -> Self {
        let world = World::new(config.sim.clone());
        let players = PlayerId::ALL.map(|id| config.build_player(id));
        let hud = Hud::new(config.sim.arena_width, config.sim.arena_height);
        let last_snapshot = world.snapshot();
        Self {
            config,
            world,
            players,
            keyboard: KeyboardState::new(),
            hud,
            recorder: FrameRecorder::new(),
            tick: 0,
            last_snapshot,
        }
    }

    /// Feed a discrete key event: updates held keys and lets each player
    /// react to the edge.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.keyboard.apply(event);
        for player in &self.players {
            player.handle_event(event, self.world.command_queue());
        }
    }

    /// Run one frame: scripted input, realtime input, update, HUD, draw.
    pub fn step(&mut self) -> GameSnapshot {
        let scripted: Vec<InputEvent> = self.config.script_at(self.tick).copied().collect();
        for event in &scripted {
            debug!(tick = self.tick, ?event, "scripted input");
            self.handle_input(event);
        }

        for player in &self.players {
            player.handle_realtime_input(&self.keyboard, self.world.command_queue());
        }

        let snapshot = self.world.tick(self.config.tick_duration());
        self.tick += 1;

        self.hud.update(&snapshot);
        self.recorder.begin_frame();
        self.world.draw(&mut self.recorder);
        self.hud.draw(&mut self.recorder);

        self.last_snapshot = snapshot.clone();
        snapshot
    }

    /// Whether the tick cap or, if configured, the end of the match was reached.
    pub fn is_finished(&self) -> bool {
        let capped = self.config.max_ticks.is_some_and(|max| self.tick >= max);
        capped || (self.config.stop_on_game_over && self.last_snapshot.game_over)
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    pub fn report(&self) -> LoopReport {
        LoopReport {
            ticks: self.tick,
            snapshot: self.last_snapshot.clone(),
            frames: self.recorder.stats(),
        }
    }
}

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    thread: JoinHandle<LoopReport>,
}

impl GameLoopHandle {
    pub fn sender(&self) -> mpsc::Sender<GameLoopCommand> {
        self.command_tx.clone()
    }

    /// Forward a key event. Returns `false` once the loop has stopped.
    pub fn send_input(&self, event: InputEvent) -> bool {
        self.command_tx.send(GameLoopCommand::Input(event)).is_ok()
    }

    pub fn latest_snapshot(&self) -> Option<GameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Result<LoopReport, GameLoopError> {
        // Already stopped if the send fails; join still collects the report.
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to stop on its own.
    pub fn join(self) -> Result<LoopReport, GameLoopError> {
        self.thread.join().map_err(|_| GameLoopError::Panicked)
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: AppConfig) -> Result<GameLoopHandle, GameLoopError> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = latest_snapshot.clone();

    let thread = std::thread::Builder::new()
        .name("tankduel-game-loop".into())
        .spawn(move || run_game_loop(config, command_rx, &shared))?;

    Ok(GameLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until the session finishes, a Shutdown command
/// arrives, or the channel disconnects.
fn run_game_loop(
    config: AppConfig,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
) -> LoopReport {
    let tick_duration = config.tick_duration();
    let realtime = config.realtime;
    let mut session = GameSession::new(config);
    let mut next_tick_time = Instant::now();

    info!(
        tick_rate = session.config.tick_rate,
        realtime,
        max_ticks = ?session.config.max_ticks,
        "game loop started"
    );

    'running: loop {
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::Input(event)) => session.handle_input(&event),
                Ok(GameLoopCommand::Shutdown) => break 'running,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'running,
            }
        }

        let snapshot = session.step();
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if session.is_finished() {
            break;
        }

        if realtime {
            pace(&mut next_tick_time, tick_duration);
        }
    }

    let report = session.report();
    info!(
        ticks = report.ticks,
        game_over = report.snapshot.game_over,
        winner = ?report.snapshot.winner,
        "game loop stopped"
    );
    report
}

/// Sleep until the next tick boundary, resetting instead of catching up when
/// far behind.
fn pace(next_tick_time: &mut Instant, tick_duration: Duration) {
    *next_tick_time += tick_duration;
    let now = Instant::now();
    if *next_tick_time > now {
        std::thread::sleep(*next_tick_time - now);
    } else if now - *next_tick_time > tick_duration * 2 {
        *next_tick_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankduel_core::enums::ProjectileType;
    use tankduel_core::events::GameEvent;
    use tankduel_core::input::Key;
    use tankduel_sim::SimConfig;

    use crate::config::ScriptStep;

    fn quiet_config() -> AppConfig {
        AppConfig {
            sim: SimConfig {
                pickups_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Input(InputEvent::KeyPressed(Key::Space)))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::Input(InputEvent::KeyPressed(Key::Space)),
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_scripted_key_press_is_applied_on_its_tick() {
        let mut config = quiet_config();
        config.script.push(ScriptStep {
            tick: 2,
            event: InputEvent::KeyPressed(Key::M),
        });
        let mut session = GameSession::new(config);

        assert_eq!(shots(&session.step()), 0);
        assert_eq!(shots(&session.step()), 0);
        let snapshot = session.step();
        assert!(snapshot.events.contains(&GameEvent::ProjectileFired {
            player: PlayerId::One,
            projectile_type: ProjectileType::Missile,
        }));
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn test_step_draws_scene_and_hud() {
        let mut session = GameSession::new(quiet_config());
        session.step();
        let frame = session.recorder().frame();
        // Two tanks; no upgrades held, so no icons.
        assert_eq!(frame.sprite_count(), 2);
        assert!(frame.texts().any(|t| t == "P1 Health: 100"));
        assert!(frame.texts().any(|t| t == "P2 Ammo: 2"));
    }

    #[test]
    fn test_session_stops_at_tick_cap() {
        let mut config = quiet_config();
        config.max_ticks = Some(3);
        let mut session = GameSession::new(config);
        while !session.is_finished() {
            session.step();
        }
        assert_eq!(session.report().ticks, 3);
        assert_eq!(session.report().frames.frames, 3);
    }

    #[test]
    fn test_shutdown_stops_uncapped_loop() {
        let mut config = quiet_config();
        config.max_ticks = None;
        let handle = spawn_game_loop(config).unwrap();
        assert!(handle.send_input(InputEvent::KeyPressed(Key::W)));
        let report = handle.shutdown().unwrap();
        assert!(!report.snapshot.game_over);
    }

    #[test]
    fn test_tick_duration_default() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(
            AppConfig::default().tick_duration().as_nanos(),
            expected_nanos as u128
        );
    }

    fn shots(snapshot: &GameSnapshot) -> usize {
        snapshot
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileFired { .. }))
            .count()
    }
}
