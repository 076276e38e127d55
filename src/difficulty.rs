//! Mach levels: the difficulty ladder driven purely by elapsed ticks.

use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyState {
    pub elapsed_ticks: u64,
    /// 1 ..= `max_mach`.
    pub mach: u32,
    /// Average targets spawned per second.
    pub target_spawn_rate: f64,
    /// Projectiles per second while fire is held.
    pub projectile_spawn_rate: f64,
    /// Distance every target covers per tick.
    pub target_speed: f64,
    /// Latched the first time max mach is reached.
    pub max_mach_reached: bool,
}

/// What changed during one `advance` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DifficultyStep {
    pub mach_changed: bool,
    /// True on exactly one tick per session.
    pub reached_max: bool,
}

impl DifficultyState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            elapsed_ticks: 0,
            mach: 1,
            target_spawn_rate: scaled_rate(config.base_targets_per_second, 1),
            projectile_spawn_rate: scaled_rate(config.base_projectiles_per_second, 1),
            target_speed: config.target_start_speed,
            max_mach_reached: false,
        }
    }

    pub fn at_max(&self, config: &GameConfig) -> bool {
        self.mach >= config.max_mach
    }

    /// Count one tick, then update mach, the max-mach speed ramp and the
    /// derived rates, in that order.
    pub fn advance(&mut self, config: &GameConfig) -> DifficultyStep {
        let mut step = DifficultyStep::default();

        self.elapsed_ticks += 1;
        let mach = mach_for(self.elapsed_ticks, config);
        if mach != self.mach {
            step.mach_changed = true;
            log::info!("Mach {} -> {}", self.mach, mach);
        }
        self.mach = mach;

        if self.at_max(config) && !self.max_mach_reached {
            self.max_mach_reached = true;
            step.reached_max = true;
        }

        if self.at_max(config) {
            self.ramp_target_speed(config);
        }

        self.target_spawn_rate = scaled_rate(config.base_targets_per_second, self.mach);
        self.projectile_spawn_rate = scaled_rate(config.base_projectiles_per_second, self.mach);

        step
    }

    /// Speed creeps up while at max mach.  Hitting the cap resets it to the
    /// baseline rather than pinning it.
    fn ramp_target_speed(&mut self, config: &GameConfig) {
        self.target_speed += config.target_speed_ramp_per_second / config.tick_rate as f64;
        if self.target_speed >= config.max_target_speed {
            self.target_speed = config.target_speed_baseline;
        }
    }
}

/// Mach level after `elapsed_ticks` ticks.
pub fn mach_for(elapsed_ticks: u64, config: &GameConfig) -> u32 {
    let level = elapsed_ticks / config.mach_period_ticks() + 1;
    level.min(config.max_mach as u64) as u32
}

/// Each mach step above 1 adds half the base rate.
pub fn scaled_rate(base: f64, mach: u32) -> f64 {
    base + 0.5 * (mach as f64 - 1.0) * base
}
