use std::sync::mpsc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use space_protector::backend::InputSource;
use space_protector::display::Viewport;
use space_protector::input::TerminalInput;

fn input() -> (mpsc::Sender<Event>, TerminalInput) {
    let (tx, rx) = mpsc::channel();
    let input = TerminalInput::new(rx, Viewport::fit(100, 40, 750.0)).fixed();
    (tx, input)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn aims_straight_up_before_the_mouse_moves() {
    let (_tx, mut input) = input();
    let frame = input.poll();
    assert_eq!(frame.cursor, (375.0, 0.0));
    assert!(!frame.fire && !frame.quit);
}

#[test]
fn mouse_moves_the_cursor() {
    let (tx, mut input) = input();
    tx.send(mouse(MouseEventKind::Moved, 50, 20)).unwrap();
    let frame = input.poll();
    let (x, y) = frame.cursor;
    assert!((x - 379.6875).abs() < 1e-9 && (y - 384.375).abs() < 1e-9);
    assert!(!frame.fire);
}

#[test]
fn left_button_holds_fire() {
    let (tx, mut input) = input();
    tx.send(mouse(MouseEventKind::Down(MouseButton::Left), 50, 20)).unwrap();
    assert!(input.poll().fire);
    assert!(input.poll().fire); // still held

    tx.send(mouse(MouseEventKind::Drag(MouseButton::Left), 60, 10)).unwrap();
    assert!(input.poll().fire);

    tx.send(mouse(MouseEventKind::Up(MouseButton::Left), 60, 10)).unwrap();
    assert!(!input.poll().fire);
}

#[test]
fn right_button_does_not_fire() {
    let (tx, mut input) = input();
    tx.send(mouse(MouseEventKind::Down(MouseButton::Right), 50, 20)).unwrap();
    assert!(!input.poll().fire);
}

#[test]
fn quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
        let (tx, mut input) = input();
        tx.send(key(code)).unwrap();
        assert!(input.poll().quit, "{:?}", code);
    }

    let (tx, mut input) = input();
    tx.send(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .unwrap();
    assert!(input.poll().quit);
}

#[test]
fn space_stays_held_within_the_window() {
    let (tx, mut input) = input();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    for poll in 1..=9 {
        assert!(input.poll().fire, "poll {}", poll);
    }
    assert!(!input.poll().fire);
}

#[test]
fn space_release_stops_fire_at_once() {
    let (tx, mut input) = input();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    assert!(input.poll().fire);

    tx.send(Event::Key(KeyEvent {
        code: KeyCode::Char(' '),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    }))
    .unwrap();
    assert!(!input.poll().fire);
}

#[test]
fn repeat_events_keep_space_held() {
    let (tx, mut input) = input();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    for poll in 1..=30 {
        if poll % 5 == 0 {
            tx.send(Event::Key(KeyEvent {
                code: KeyCode::Char(' '),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Repeat,
                state: KeyEventState::NONE,
            }))
            .unwrap();
        }
        assert!(input.poll().fire, "poll {}", poll);
    }
}

#[test]
fn first_repeat_after_the_window_leaves_a_gap() {
    // A 300 ms initial repeat delay is 18 polls at 60 Hz
    let (tx, mut input) = input();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    let held: Vec<bool> = (1..=18).map(|_| input.poll().fire).collect();
    assert!(held[..9].iter().all(|h| *h));
    assert!(held[9..].iter().all(|h| !*h));

    tx.send(Event::Key(KeyEvent {
        code: KeyCode::Char(' '),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Repeat,
        state: KeyEventState::NONE,
    }))
    .unwrap();
    assert!(input.poll().fire);
}
