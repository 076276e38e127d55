//! Pure game-logic functions.
//!
//! `tick` takes an immutable reference to the current `GameSession` (plus the
//! sampled input and an RNG handle) and returns a brand-new `GameSession`.
//! Side effects are limited to the injected RNG; sounds and other outward
//! effects are reported through `GameSession::events`.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{DeadTarget, GameEvent, GameSession, Projectile, Target};

/// Input sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Cursor position in screen units.
    pub cursor: (f64, f64),
    /// Fire button currently held.
    pub fire: bool,
}

/// A spawn draw at or below this value creates a target.
const SPAWN_WINDOW: u32 = 10;

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Upper bound of the per-tick spawn draw.  With one draw per tick and a
/// window of 10, targets appear `avg_per_second` times a second on average.
pub fn target_spawn_limit(tick_rate: u32, avg_per_second: f64) -> u32 {
    let limit = (tick_rate as f64 / avg_per_second) * SPAWN_WINDOW as f64;
    (limit as u32).max(1)
}

/// Memoryless per-tick spawn decision.
pub fn roll_target_spawn(limit: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=limit) <= SPAWN_WINDOW
}

/// Advance the fire rate limiter.  Returns the new counter and whether a
/// projectile is fired this tick.
pub fn step_fire_counter(
    counter: u32,
    fire_held: bool,
    tick_rate: u32,
    per_second: f64,
) -> (u32, bool) {
    let counter = counter + 1;
    if fire_held && counter as f64 >= tick_rate as f64 / per_second {
        (0, true)
    } else {
        (counter, false)
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Kill every interactive target touched by a projectile.  Returns the
/// updated targets and the number of kills.  Projectiles fly on.
pub fn resolve_collisions(
    targets: &[Target],
    projectiles: &[Projectile],
    config: &GameConfig,
) -> (Vec<Target>, u32) {
    let mut kills = 0;
    let targets = targets
        .iter()
        .map(|t| {
            if !(t.alive && t.interactive) {
                return t.clone();
            }
            let rect = t.rect(config);
            let hit = projectiles.iter().any(|p| rect.intersects(&p.rect(config)));
            if hit {
                kills += 1;
                Target { alive: false, ..t.clone() }
            } else {
                t.clone()
            }
        })
        .collect();
    (targets, kills)
}

// ── Per-frame tick (RNG injected) ──────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameSession,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameSession {
    let mut events = Vec::new();

    // ── 1. Collisions against last tick's positions ──────────────────────────
    let (targets, kills) = resolve_collisions(&state.targets, &state.projectiles, config);
    events.extend(std::iter::repeat(GameEvent::TargetHit).take(kills as usize));

    // ── 2. Difficulty, speed ramp and rates ──────────────────────────────────
    let mut difficulty = state.difficulty.clone();
    if difficulty.advance(config).reached_max {
        log::info!("Max mach reached after {} ticks", difficulty.elapsed_ticks);
        events.push(GameEvent::MaxMachReached);
    }

    // ── 3. Spawning: target, then projectile ─────────────────────────────────
    let mut targets = targets;
    let limit = target_spawn_limit(config.tick_rate, difficulty.target_spawn_rate);
    if roll_target_spawn(limit, rng) {
        let target = Target::spawn(rng, config);
        log::trace!("Target spawned at {:.2}°", target.angle);
        targets.push(target);
    }

    let mut projectiles = state.projectiles.clone();
    let (fire_counter, fired) = step_fire_counter(
        state.fire_counter,
        input.fire,
        config.tick_rate,
        difficulty.projectile_spawn_rate,
    );
    if fired {
        projectiles.push(Projectile::fire(input.cursor, config));
        events.push(GameEvent::ProjectileFired);
    }

    // ── 4. Projectiles ───────────────────────────────────────────────────────
    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .filter_map(|mut p| {
            p.update(config);
            p.alive.then_some(p)
        })
        .collect();

    // ── 5. Targets; the dead leave a wreck behind ────────────────────────────
    let mut end_of_game = state.end_of_game;
    let mut dead_targets = state.dead_targets.clone();
    let mut survivors = Vec::with_capacity(targets.len());
    for mut target in targets {
        if target.update(difficulty.target_speed, config) {
            log::info!("Target breached at {:.2}°", target.angle);
            end_of_game = true;
            events.push(GameEvent::TargetBreached);
        }
        if target.alive {
            survivors.push(target);
        } else {
            dead_targets.push(DeadTarget::new(target.position, config));
        }
    }

    // ── 6. Wrecks count down ─────────────────────────────────────────────────
    dead_targets.retain_mut(|d| d.update());

    // ── 7. Ship and progress bar ─────────────────────────────────────────────
    let mut ship = state.ship.clone();
    ship.update(input.cursor, end_of_game, config);

    let mut progress = state.progress.clone();
    progress.update(&difficulty, config);

    GameSession {
        ship,
        projectiles,
        targets: survivors,
        dead_targets,
        progress,
        difficulty,
        score: state.score + kills,
        fire_counter,
        end_of_game,
        frame: state.frame + 1,
        events,
    }
}
