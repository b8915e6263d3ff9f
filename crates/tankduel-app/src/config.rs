//! Application configuration, loaded from a JSON file.
//!
//! Every field has a default, so `{}` is a valid config.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use tankduel_core::constants::TICK_RATE;
use tankduel_core::enums::{PlayerAction, PlayerId};
use tankduel_core::input::{InputEvent, Key};
use tankduel_sim::player::Player;
use tankduel_sim::SimConfig;

use crate::error::ConfigError;

/// Key overrides for one player, applied over the default layout.
pub type BindingConfig = BTreeMap<PlayerAction, Key>;

/// Input event injected at a given tick, as if it came from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    pub event: InputEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Stop after this many ticks. `None` runs until game over or shutdown.
    pub max_ticks: Option<u64>,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
    pub stop_on_game_over: bool,
    pub player1_bindings: BindingConfig,
    pub player2_bindings: BindingConfig,
    pub script: Vec<ScriptStep>,
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            max_ticks: Some(u64::from(TICK_RATE) * 60),
            realtime: false,
            stop_on_game_over: true,
            player1_bindings: BindingConfig::new(),
            player2_bindings: BindingConfig::new(),
            script: Vec::new(),
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if !(self.sim.arena_width > 0.0 && self.sim.arena_height > 0.0) {
            return Err(ConfigError::Invalid("arena size must be positive".into()));
        }
        if !self.sim.pickup_interval_secs.is_finite() || self.sim.pickup_interval_secs < 0.0 {
            return Err(ConfigError::Invalid(
                "pickup_interval_secs must be a finite, non-negative number".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn bindings(&self, player: PlayerId) -> &BindingConfig {
        match player {
            PlayerId::One => &self.player1_bindings,
            PlayerId::Two => &self.player2_bindings,
        }
    }

    /// Build a player with the default layout plus this config's overrides.
    pub fn build_player(&self, id: PlayerId) -> Player {
        let mut player = Player::new(id);
        for (&action, &key) in self.bindings(id) {
            player.assign_key(action, key);
        }
        player
    }

    /// Scripted events due at `tick`, in file order.
    pub fn script_at(&self, tick: u64) -> impl Iterator<Item = &InputEvent> {
        self.script
            .iter()
            .filter(move |step| step.tick == tick)
            .map(|step| &step.event)
    }
}
