//! Gameplay tuning and runtime options.
//!
//! Defaults match the classic balance.  A JSON file can override any subset of
//! fields; a couple of environment variables override the file.

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::ScreenGeometry;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_VAR: &str = "SPACE_PROTECTOR_CONFIG";
/// `1`/`true` enables god mode.
pub const GOD_MODE_VAR: &str = "SPACE_PROTECTOR_GOD_MODE";
/// Fixed RNG seed for reproducible runs.
pub const SEED_VAR: &str = "SPACE_PROTECTOR_SEED";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Average targets per second at mach 1.
    pub base_targets_per_second: f64,
    /// Projectiles per second at mach 1 while fire is held.
    pub base_projectiles_per_second: f64,
    /// Units per tick.
    pub projectile_speed: f64,
    /// Units per tick.
    pub target_start_speed: f64,
    /// Once the ramped target speed reaches this cap it is reset to
    /// `target_speed_baseline`.
    pub max_target_speed: f64,
    pub target_speed_baseline: f64,
    pub seconds_per_mach: u32,
    /// Target speed gained per second while at max mach.
    pub target_speed_ramp_per_second: f64,
    pub dead_target_seconds: f64,
    pub max_mach: u32,
    /// Disables the loss condition.
    pub god_mode: bool,

    /// Side of the square play area, in screen units.
    pub screen_size: f64,
    /// A target this close to the centre ends the game.
    pub kill_distance: f64,
    pub ship_size: f64,
    pub projectile_size: f64,
    pub target_size: f64,
    pub dead_target_size: f64,
    /// Ticks the wrecked ship sprite stays up after a breach.
    pub ship_death_frames: u32,

    /// Seed for the spawn RNG; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Ring the terminal bell for one-shot cues.
    pub bell: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            base_targets_per_second: 2.0,
            base_projectiles_per_second: 3.0,
            projectile_speed: 10.0,
            target_start_speed: 2.0,
            max_target_speed: 3.5,
            target_speed_baseline: 3.5,
            seconds_per_mach: 20,
            target_speed_ramp_per_second: 0.0175,
            dead_target_seconds: 0.5,
            max_mach: 5,
            god_mode: false,

            screen_size: 750.0,
            kill_distance: 25.0,
            ship_size: 60.0,
            projectile_size: 10.0,
            target_size: 40.0,
            dead_target_size: 40.0,
            ship_death_frames: 20,

            seed: None,
            bell: true,
        }
    }
}

impl GameConfig {
    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry::square(self.screen_size)
    }

    /// Ticks between mach transitions.
    pub fn mach_period_ticks(&self) -> u64 {
        self.tick_rate as u64 * self.seconds_per_mach as u64
    }

    /// Lifetime of a dead-target marker, in ticks.
    pub fn dead_target_frames(&self) -> u32 {
        (self.dead_target_seconds * self.tick_rate as f64).round() as u32
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                log::info!("Loaded config from {}", path.display());
                Self::from_json(&json)?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load using the path in `SPACE_PROTECTOR_CONFIG`, if set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).ok();
        Self::load(path.as_deref().map(Path::new))
    }

    fn apply_env(&mut self) {
        if let Some(god_mode) = env::var(GOD_MODE_VAR).ok().and_then(|v| parse_flag(&v)) {
            self.god_mode = god_mode;
        }
        if let Some(seed) = env::var(SEED_VAR).ok().and_then(|v| v.trim().parse().ok()) {
            self.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.tick_rate == 0 {
            return invalid("tick_rate must be positive");
        }
        if self.max_mach == 0 {
            return invalid("max_mach must be at least 1");
        }
        if self.seconds_per_mach == 0 {
            return invalid("seconds_per_mach must be positive");
        }
        if self.base_targets_per_second <= 0.0 || self.base_projectiles_per_second <= 0.0 {
            return invalid("spawn rates must be positive");
        }
        if self.screen_size <= 0.0 {
            return invalid("screen_size must be positive");
        }
        if self.projectile_speed <= 0.0 || self.target_start_speed <= 0.0 {
            return invalid("speeds must be positive");
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
