use space_protector::backend::Renderer;
use space_protector::display::{TerminalDisplay, Viewport};
use space_protector::entities::{GameSession, Target};
use space_protector::game::render_scene;
use space_protector::GameConfig;

fn approx((x, y): (f64, f64), (ex, ey): (f64, f64)) -> bool {
    (x - ex).abs() < 1e-9 && (y - ey).abs() < 1e-9
}

fn viewport() -> Viewport {
    Viewport::fit(100, 40, 750.0)
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn fit_keeps_the_play_area_square() {
    let v = viewport();
    assert_eq!(v.rows, 40);
    assert_eq!(v.cols, 80);
    assert_eq!(v.origin, (10, 0));
}

#[test]
fn fit_narrow_terminal_limits_rows() {
    let v = Viewport::fit(60, 50, 750.0);
    assert_eq!((v.cols, v.rows), (60, 30));
    assert_eq!(v.origin, (0, 0));
}

#[test]
fn screen_points_map_to_cells() {
    let v = viewport();
    assert_eq!(v.to_cell((0.0, 0.0)), Some((10, 0)));
    assert_eq!(v.to_cell((375.0, 375.0)), Some((50, 20)));
    assert_eq!(v.to_cell((749.9, 749.9)), Some((89, 39)));
    assert_eq!(v.to_cell((750.0, 0.0)), None);
    assert_eq!(v.to_cell((-1.0, 10.0)), None);
}

#[test]
fn cells_map_back_to_screen_points() {
    let v = viewport();
    assert!(approx(v.to_screen(10, 0), (4.6875, 9.375)));
    // Outside the play area clamps to the nearest cell
    assert!(approx(v.to_screen(0, 0), (4.6875, 9.375)));
    assert!(approx(v.to_screen(200, 100), (745.3125, 740.625)));
}

#[test]
fn widths_round_to_cells() {
    let v = viewport();
    assert_eq!(v.cells_wide(120.0), 13);
    assert_eq!(v.cells_wide(1.0), 1);
}

// ── TerminalDisplay ───────────────────────────────────────────────────────────

#[test]
fn scene_renders_to_the_writer() {
    let config = GameConfig::default();
    let mut session = GameSession::new(&config);
    session.targets.push(Target::at(0.0, 200.0, &config));

    let mut display = TerminalDisplay::with_viewport(Vec::new(), viewport());
    render_scene(&mut display, &session, &config).unwrap();
    display.present().unwrap();

    let text = String::from_utf8_lossy(&display.into_inner()).into_owned();
    assert!(text.contains("Score: 0"));
    assert!(text.contains("Mach: 1"));
    assert!(text.contains("(◉)"));
    assert!(text.contains("◆"));
    assert!(text.contains("↑"));
}

#[test]
fn wrecked_ship_is_drawn_differently() {
    let config = GameConfig::default();
    let mut session = GameSession::new(&config);
    session.ship.update((375.0, 0.0), true, &config);

    let mut display = TerminalDisplay::with_viewport(Vec::new(), viewport());
    render_scene(&mut display, &session, &config).unwrap();

    let text = String::from_utf8_lossy(&display.into_inner()).into_owned();
    assert!(text.contains("✖"));
    assert!(!text.contains("◆"));
}
