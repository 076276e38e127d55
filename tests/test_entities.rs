use space_protector::difficulty::DifficultyState;
use space_protector::entities::*;
use space_protector::geometry::radius_to_edge;
use space_protector::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_starts_centred_and_upright() {
    let config = GameConfig::default();
    let ship = Ship::new(&config);
    assert_eq!(ship.origin, (345.0, 345.0));
    assert_eq!(ship.facing, 0.0);
    assert_eq!(ship.sprite, ShipSprite::Normal);
}

#[test]
fn ship_faces_the_cursor() {
    let config = GameConfig::default();
    let mut ship = Ship::new(&config);

    let origin = ship.update((375.0, 0.0), false, &config);
    assert!(approx(ship.facing, 0.0));
    assert!(approx(origin.0, 345.0) && approx(origin.1, 345.0));

    // Top-right corner: 45° on screen, so the turret leans 45° to the right
    ship.update((750.0, 0.0), false, &config);
    assert!(approx(ship.facing, -45.0));
}

#[test]
fn rotated_ship_stays_centred() {
    let config = GameConfig::default();
    let mut ship = Ship::new(&config);
    for cursor in [(750.0, 0.0), (600.0, 100.0), (0.0, 500.0), (375.0, 750.0)] {
        ship.update(cursor, false, &config);
        let (cx, cy) = ship.rect(&config).center();
        assert!(approx(cx, 375.0) && approx(cy, 375.0), "{:?}", cursor);
    }

    ship.update((750.0, 0.0), false, &config);
    let side = ship.rect(&config).w;
    assert!(approx(side, 60.0 * std::f64::consts::SQRT_2));
}

#[test]
fn ship_wrecked_for_death_frames() {
    let config = GameConfig::default();
    let mut ship = Ship::new(&config);

    ship.update((375.0, 0.0), true, &config);
    assert_eq!(ship.sprite, ShipSprite::Wrecked);
    assert_eq!(ship.death_frames, 19);

    for _ in 0..19 {
        ship.update((375.0, 0.0), false, &config);
        assert_eq!(ship.sprite, ShipSprite::Wrecked);
    }
    ship.update((375.0, 0.0), false, &config);
    assert_eq!(ship.sprite, ShipSprite::Normal);
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_fires_from_the_muzzle() {
    let config = GameConfig::default();
    let p = Projectile::fire((375.0, 0.0), &config);
    assert!(approx(p.angle, 90.0));
    assert!(approx(p.distance, 24.0));
    assert!(approx(p.position.0, 370.0));
    assert!(approx(p.position.1, 346.0));
    assert!(p.alive);
}

#[test]
fn projectile_moves_outward() {
    let config = GameConfig::default();
    let mut p = Projectile::at(0.0, 100.0, &config);
    p.update(&config);
    assert!(approx(p.distance, 110.0));
    p.update(&config);
    // Position lags one step behind the distance
    assert!(approx(p.position.0, 375.0 + 110.0 - 5.0));
}

#[test]
fn projectile_dies_off_the_right_edge() {
    let config = GameConfig::default();
    let mut p = Projectile::at(0.0, 400.0, &config);
    p.update(&config);
    assert!(!p.alive);
}

#[test]
fn projectile_dies_at_the_top_edge() {
    let config = GameConfig::default();
    let mut p = Projectile::at(90.0, 370.0, &config);
    p.update(&config);
    assert!(!p.alive);
}

#[test]
fn dead_projectile_stays_put() {
    let config = GameConfig::default();
    let mut p = Projectile::at(0.0, 400.0, &config);
    p.update(&config);
    let distance = p.distance;
    p.update(&config);
    assert_eq!(p.distance, distance);
}

// ── Target ────────────────────────────────────────────────────────────────────

#[test]
fn target_spawns_on_the_edge() {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let t = Target::spawn(&mut rng, &config);
        assert!((0.0..360.0).contains(&t.angle));
        assert!(approx(t.distance, radius_to_edge(&config.geometry(), t.angle)));
        assert!(t.alive && t.interactive);
    }
}

#[test]
fn target_closes_in() {
    let config = GameConfig::default();
    let mut t = Target::at(0.0, 300.0, &config);
    assert!(!t.update(2.0, &config));
    assert!(approx(t.distance, 298.0));
    assert!(t.alive);
}

#[test]
fn target_breaches_at_kill_distance() {
    let config = GameConfig::default();
    let mut t = Target::at(180.0, 28.0, &config);
    assert!(!t.update(2.0, &config)); // 26 left
    assert!(t.update(2.0, &config)); // 24 ≤ 25
    assert!(!t.alive);
    assert!(!t.update(2.0, &config)); // reported once
}

#[test]
fn target_above_the_screen_stays_hidden() {
    // Beyond the top edge the fold makes an inbound target look like it is
    // climbing; it must not be drawn or hit.
    let config = GameConfig::default();
    let mut t = Target::at(90.0, 500.0, &config);
    for _ in 0..40 {
        t.update(2.0, &config);
        assert!(!t.interactive);
    }
}

#[test]
fn target_below_the_top_edge_unfolds() {
    let config = GameConfig::default();
    let mut t = Target::at(90.0, 300.0, &config);
    t.update(2.0, &config);
    assert!(!t.interactive); // no movement seen yet
    t.update(2.0, &config);
    assert!(t.interactive);
}

#[test]
fn target_in_lower_half_is_interactive_at_once() {
    let config = GameConfig::default();
    let mut t = Target::at(270.0, 300.0, &config);
    t.update(2.0, &config);
    assert!(t.interactive);
}

// ── DeadTarget ────────────────────────────────────────────────────────────────

#[test]
fn dead_target_counts_down() {
    let config = GameConfig::default();
    let mut wreck = DeadTarget::new((10.0, 20.0), &config);
    assert_eq!(wreck.frames_remaining, 30);
    for _ in 0..30 {
        assert!(wreck.update());
    }
    assert_eq!(wreck.frames_remaining, 0);
    assert!(!wreck.update());
    assert_eq!(wreck.rect(&config).center(), (30.0, 40.0));
}

// ── ProgressIndicator ─────────────────────────────────────────────────────────

#[test]
fn progress_tracks_the_current_mach() {
    let config = GameConfig::default();
    let mut difficulty = DifficultyState::new(&config);
    let mut progress = ProgressIndicator::default();

    for _ in 0..600 {
        difficulty.advance(&config);
    }
    progress.update(&difficulty, &config);
    assert!(approx(progress.fill, 0.5));

    for _ in 0..600 {
        difficulty.advance(&config);
    }
    progress.update(&difficulty, &config);
    assert!(approx(progress.fill, 0.0)); // mach 2 just started
}

#[test]
fn progress_full_at_max_mach() {
    let config = GameConfig::default();
    let mut difficulty = DifficultyState::new(&config);
    let mut progress = ProgressIndicator::default();
    for _ in 0..4800 {
        difficulty.advance(&config);
    }
    progress.update(&difficulty, &config);
    assert_eq!(progress.fill, 1.0);
}

// ── GameSession ───────────────────────────────────────────────────────────────

#[test]
fn new_session_is_empty() {
    let config = GameConfig::default();
    let s = GameSession::new(&config);
    assert!(s.projectiles.is_empty() && s.targets.is_empty() && s.dead_targets.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.difficulty.mach, 1);
    assert!(!s.end_of_game);
}

#[test]
fn session_clone_is_independent() {
    let config = GameConfig::default();
    let s = GameSession::new(&config);
    let mut s2 = s.clone();
    s2.score = 10;
    s2.targets.push(Target::at(0.0, 100.0, &config));
    assert_eq!(s.score, 0);
    assert!(s.targets.is_empty());
}
