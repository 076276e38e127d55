//! Terminal input: mouse aiming and firing, keyboard fire and quit.
//!
//! A dedicated thread does the blocking `event::read()` calls and forwards
//! events through a channel, so `poll` never blocks the game loop.
//!
//! Mouse buttons report both press and release, so the left button is an
//! exact "held" signal.  Space is tracked with a hold window instead: on
//! terminals without key-release reporting a key counts as held while its
//! press/repeat events keep arriving.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::backend::{InputFrame, InputSource};
use crate::display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many polls.  Steady auto-repeat (≥ 15 Hz) refreshes it in time, but
/// the initial repeat delay (250–600 ms) does not: without release events a
/// held Space fires once, pauses, then fires steadily.  The mouse button has
/// no such gap.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` polls.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Spawn the reader thread.  It exits once the receiver is dropped.
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::error!("Input reader stopped: {}", err);
                break;
            }
        }
    });
    rx
}

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    viewport: Viewport,
    follow_resize: bool,
    cursor: (f64, f64),
    mouse_down: bool,
    /// Maps each held key → the poll it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    quit: bool,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, viewport: Viewport) -> Self {
        let center = viewport.size / 2.0;
        Self {
            rx,
            viewport,
            follow_resize: true,
            // Aim straight up until the mouse moves.
            cursor: (center, 0.0),
            mouse_down: false,
            key_frame: HashMap::new(),
            frame: 0,
            quit: false,
        }
    }

    /// Keep the given viewport even when the terminal is resized.
    pub fn fixed(mut self) -> Self {
        self.follow_resize = false;
        self
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) if self.follow_resize => {
                self.viewport = Viewport::fit(cols, rows, self.viewport.size);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        self.cursor = self.viewport.to_screen(column, row);
        match kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.mouse_down = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_down = false,
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) {
        match kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputFrame {
        self.frame += 1;
        // Drain all pending input events (non-blocking)
        while let Ok(event) = self.rx.try_recv() {
            self.handle(event);
        }

        let space = is_held(&self.key_frame, &KeyCode::Char(' '), self.frame);
        InputFrame {
            cursor: self.cursor,
            fire: self.mouse_down || space,
            quit: self.quit,
        }
    }
}
