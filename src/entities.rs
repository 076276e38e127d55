//! Game entities and the per-session state that owns them.
//!
//! Every entity keeps its own state and knows how to advance itself by one
//! tick; sequencing the updates is the job of `compute::tick`.

use std::f64::consts::SQRT_2;

use rand::Rng;

use crate::config::GameConfig;
use crate::difficulty::DifficultyState;
use crate::geometry::{cart_to_polar, polar_to_cart, radius_to_edge, Rect};

/// Projectiles die once their sprite leaves `[OUT_OF_BOUNDS_MARGIN, width]`
/// on either axis.  The small margin stops a projectile from bouncing off
/// the folded top edge.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 0.05;

/// Height of the band above the centre line (measured from it) in which a
/// target moving upward is treated as folded and hidden.
pub const FOLD_BAND: f64 = 25.0;

/// Projectiles start this fraction of the ship width away from the centre.
pub const MUZZLE_OFFSET: f64 = 0.4;

/// Top-left corner that centres a `size` x `size` sprite on `center`.
fn sprite_origin((x, y): (f64, f64), size: f64) -> (f64, f64) {
    (x - size / 2.0, y - size / 2.0)
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShipSprite {
    Normal,
    Wrecked,
}

/// The turret at the centre of the screen.
#[derive(Clone, Debug)]
pub struct Ship {
    /// Rotation in degrees relative to "pointing up".
    pub facing: f64,
    pub death_frames: u32,
    pub sprite: ShipSprite,
    /// Top-left of the rotated sprite's bounding box.
    pub origin: (f64, f64),
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        let corner = (config.screen_size - config.ship_size) / 2.0;
        Self {
            facing: 0.0,
            death_frames: 0,
            sprite: ShipSprite::Normal,
            origin: (corner, corner),
        }
    }

    /// Turn toward the cursor and pick the sprite; returns the render origin.
    ///
    /// Rotating a square sprite grows its bounding box by up to a factor of
    /// √2 (at 45°), so the origin is pulled back by the growth to keep the
    /// pivot on the screen centre.
    pub fn update(
        &mut self,
        cursor: (f64, f64),
        end_of_game: bool,
        config: &GameConfig,
    ) -> (f64, f64) {
        if end_of_game {
            self.death_frames = config.ship_death_frames;
        }
        if self.death_frames > 0 {
            self.death_frames -= 1;
            self.sprite = ShipSprite::Wrecked;
        } else {
            self.sprite = ShipSprite::Normal;
        }

        let geometry = config.geometry();
        self.facing = cart_to_polar(&geometry, cursor.0, cursor.1).angle - 90.0;

        let corner = (config.screen_size - config.ship_size) / 2.0 - self.rotation_growth(config);
        self.origin = (corner, corner);
        self.origin
    }

    /// Extra margin the rotated bounding box gains on each side.
    fn rotation_growth(&self, config: &GameConfig) -> f64 {
        let w = config.ship_size;
        let constant = w / SQRT_2 - w / 2.0;
        constant * (2.0 * self.facing.to_radians()).sin().abs()
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        let side = config.ship_size + 2.0 * self.rotation_growth(config);
        Rect::sized(side, side).moved_to(self.origin)
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    /// Degrees; fixed when fired.
    pub angle: f64,
    pub distance: f64,
    pub alive: bool,
    /// Sprite top-left.
    pub position: (f64, f64),
}

impl Projectile {
    /// Fire from the ship toward `cursor`.
    pub fn fire(cursor: (f64, f64), config: &GameConfig) -> Self {
        let geometry = config.geometry();
        let angle = cart_to_polar(&geometry, cursor.0, cursor.1).angle;
        Self::at(angle, config.ship_size * MUZZLE_OFFSET, config)
    }

    pub fn at(angle: f64, distance: f64, config: &GameConfig) -> Self {
        let center = polar_to_cart(&config.geometry(), distance, angle);
        Self {
            angle,
            distance,
            alive: true,
            position: sprite_origin(center, config.projectile_size),
        }
    }

    pub fn update(&mut self, config: &GameConfig) {
        if !self.alive {
            return;
        }
        let geometry = config.geometry();
        self.position = sprite_origin(
            polar_to_cart(&geometry, self.distance, self.angle),
            config.projectile_size,
        );

        let (x, y) = self.position;
        let inside = |v: f64, max: f64| (OUT_OF_BOUNDS_MARGIN..=max).contains(&v);
        if !inside(x, geometry.width) || !inside(y, geometry.height) {
            self.alive = false;
        }

        self.distance += config.projectile_speed;
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::sized(config.projectile_size, config.projectile_size).moved_to(self.position)
    }
}

// ── Target ────────────────────────────────────────────────────────────────────

/// An alien flying straight at the ship.
#[derive(Clone, Debug)]
pub struct Target {
    pub angle: f64,
    pub distance: f64,
    pub alive: bool,
    /// Eligible for drawing and collision this tick.
    pub interactive: bool,
    pub position: (f64, f64),
    pub previous_position: (f64, f64),
}

impl Target {
    /// A new target on the screen edge at a random angle.
    pub fn spawn(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let angle = 0.01 * rng.gen_range(0..=99) as f64 + rng.gen_range(0..=359) as f64;
        let distance = radius_to_edge(&config.geometry(), angle);
        Self::at(angle, distance, config)
    }

    pub fn at(angle: f64, distance: f64, config: &GameConfig) -> Self {
        let center = polar_to_cart(&config.geometry(), distance, angle);
        let position = sprite_origin(center, config.target_size);
        Self {
            angle,
            distance,
            alive: true,
            interactive: true,
            position,
            previous_position: position,
        }
    }

    /// Move one step inward at `speed`.  Returns true when the target got
    /// within the kill distance, which ends the game.
    pub fn update(&mut self, speed: f64, config: &GameConfig) -> bool {
        if !self.alive {
            return false;
        }
        let geometry = config.geometry();
        self.previous_position = self.position;
        self.position = sprite_origin(
            polar_to_cart(&geometry, self.distance, self.angle),
            config.target_size,
        );

        self.distance -= speed;

        let breached = self.distance <= config.kill_distance;
        if breached {
            self.alive = false;
        }

        // Past the top edge `polar_to_cart` folds positions back on screen, so
        // an inbound target there appears to climb.  Hide it until it unfolds.
        let folded = self.position.1 < geometry.width / 2.0 - FOLD_BAND
            && self.previous_position.1 >= self.position.1;
        self.interactive = !folded;

        breached
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::sized(config.target_size, config.target_size).moved_to(self.position)
    }
}

// ── Dead target marker ────────────────────────────────────────────────────────

/// Short-lived wreck left where a target died.
#[derive(Clone, Debug)]
pub struct DeadTarget {
    pub position: (f64, f64),
    pub frames_remaining: u32,
}

impl DeadTarget {
    pub fn new(position: (f64, f64), config: &GameConfig) -> Self {
        Self {
            position,
            frames_remaining: config.dead_target_frames(),
        }
    }

    /// Count down one frame.  Returns false once expired.
    pub fn update(&mut self) -> bool {
        if self.frames_remaining == 0 {
            return false;
        }
        self.frames_remaining -= 1;
        true
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::sized(config.dead_target_size, config.dead_target_size).moved_to(self.position)
    }
}

// ── Progress bar ──────────────────────────────────────────────────────────────

/// Progress toward the next mach level, in `[0, 1]`.
#[derive(Clone, Debug, Default)]
pub struct ProgressIndicator {
    pub fill: f64,
}

impl ProgressIndicator {
    pub fn update(&mut self, difficulty: &DifficultyState, config: &GameConfig) {
        self.fill = if difficulty.at_max(config) {
            1.0
        } else {
            let period = config.mach_period_ticks();
            (difficulty.elapsed_ticks % period) as f64 / period as f64
        };
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Things that happened during the last tick, for sound and logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    TargetHit,
    MaxMachReached,
    /// A target reached the ship.
    TargetBreached,
}

/// Everything that changes during a game session.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub dead_targets: Vec<DeadTarget>,
    pub progress: ProgressIndicator,
    pub difficulty: DifficultyState,
    pub score: u32,
    /// Ticks since the last shot.
    pub fire_counter: u32,
    pub end_of_game: bool,
    pub frame: u64,
    /// Cleared at the start of every tick.
    pub events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ship: Ship::new(config),
            projectiles: Vec::new(),
            targets: Vec::new(),
            dead_targets: Vec::new(),
            progress: ProgressIndicator::default(),
            difficulty: DifficultyState::new(config),
            score: 0,
            fire_counter: 0,
            end_of_game: false,
            frame: 0,
            events: Vec::new(),
        }
    }
}
