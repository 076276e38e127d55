//! Fixed-tick game loop.
//!
//! `Game` owns the session and the three backends.  Each active tick it
//! samples input, advances the simulation, plays the resulting sounds,
//! submits the frame and checks for the end of the game.  After the loss it
//! idles until the player quits.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::backend::{AudioBackend, Channel, InputFrame, InputSource, Renderer, Sound, Sprite, TextColor};
use crate::compute::{tick, TickInput};
use crate::config::GameConfig;
use crate::entities::{GameEvent, GameSession};
use crate::geometry::Rect;

/// HUD layout, in screen units.
pub const SCORE_TEXT_AT: (f64, f64) = (0.0, 0.0);
pub const MACH_TEXT_AT: (f64, f64) = (0.0, 40.0);
pub const PROGRESS_RECT: Rect = Rect { x: 3.0, y: 85.0, w: 120.0, h: 25.0 };

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Caps the loop at a fixed rate by sleeping off the rest of each frame.
/// Slow frames are not made up.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / tick_rate.max(1),
            last: None,
        }
    }

    /// Never sleeps.  For tests and headless runs.
    pub fn unpaced() -> Self {
        Self { period: Duration::ZERO, last: None }
    }

    /// Block until a full period has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub score: u32,
    pub mach: u32,
    pub ticks: u64,
    /// The player quit before losing.
    pub quit_during_play: bool,
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game<R, A, I> {
    config: GameConfig,
    session: GameSession,
    renderer: R,
    audio: A,
    input: I,
    rng: StdRng,
    clock: FrameClock,
}

impl<R: Renderer, A: AudioBackend, I: InputSource> Game<R, A, I> {
    pub fn new(config: GameConfig, renderer: R, audio: A, input: I) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if !audio.is_available() {
            log::warn!("Sound disabled: no audio output available");
        }
        if config.god_mode {
            log::info!("God mode enabled");
        }
        Self {
            session: GameSession::new(&config),
            clock: FrameClock::new(config.tick_rate),
            config,
            renderer,
            audio,
            input,
            rng,
        }
    }

    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Play both loops to the end.
    pub fn run(&mut self) -> io::Result<Outcome> {
        log::info!("Game started at {} ticks/s", self.config.tick_rate);
        let quit_during_play = self.run_active()?;
        if !quit_during_play {
            self.run_game_over()?;
        }
        self.audio.stop_all();
        Ok(self.outcome(quit_during_play))
    }

    fn outcome(&self, quit_during_play: bool) -> Outcome {
        Outcome {
            score: self.session.score,
            mach: self.session.difficulty.mach,
            ticks: self.session.frame,
            quit_during_play,
        }
    }

    /// Returns true if the player quit, false if the game was lost.
    fn run_active(&mut self) -> io::Result<bool> {
        loop {
            self.clock.wait();
            let input = self.input.poll();
            if input.quit {
                log::info!("Quit during play at tick {}", self.session.frame);
                return Ok(true);
            }
            if !self.step(&input)? {
                return Ok(false);
            }
        }
    }

    /// One active tick.  Returns false once the game is lost.
    pub fn step(&mut self, input: &InputFrame) -> io::Result<bool> {
        let tick_input = TickInput {
            cursor: input.cursor,
            fire: input.fire,
        };
        self.session = tick(&self.session, &tick_input, &self.config, &mut self.rng);
        self.dispatch_events();

        render_scene(&mut self.renderer, &self.session, &self.config)?;
        self.renderer.present()?;

        if self.config.god_mode {
            self.session.end_of_game = false;
        }
        Ok(!self.session.end_of_game)
    }

    fn dispatch_events(&mut self) {
        for event in &self.session.events {
            match event {
                GameEvent::ProjectileFired => self.audio.play(Channel::Projectile, Sound::Fire),
                GameEvent::TargetHit => self.audio.play(Channel::Target, Sound::Hit),
                GameEvent::MaxMachReached => self.audio.play(Channel::Other, Sound::MaxMach),
                GameEvent::TargetBreached => {}
            }
        }
    }

    /// Idle after a loss: freeze the last frame, show the result and wait
    /// for quit.
    fn run_game_over(&mut self) -> io::Result<()> {
        self.audio.stop_all();
        log::info!(
            "Game over: score {}, mach {}, {} ticks",
            self.session.score,
            self.session.difficulty.mach,
            self.session.frame
        );
        render_game_over(&mut self.renderer, &self.session, &self.config)?;
        self.renderer.present()?;

        loop {
            self.clock.wait();
            if self.input.poll().quit {
                return Ok(());
            }
        }
    }
}

// ── Scene submission ──────────────────────────────────────────────────────────

/// Submit one frame back-to-front: background, wrecks, projectiles, ship,
/// targets, then the HUD.
pub fn render_scene<R: Renderer>(
    out: &mut R,
    session: &GameSession,
    config: &GameConfig,
) -> io::Result<()> {
    let screen = Rect::sized(config.screen_size, config.screen_size);
    out.draw_sprite(Sprite::Background, screen)?;

    for wreck in &session.dead_targets {
        out.draw_sprite(Sprite::DeadTarget, wreck.rect(config))?;
    }
    for projectile in &session.projectiles {
        out.draw_sprite(Sprite::Projectile, projectile.rect(config))?;
    }

    let ship = &session.ship;
    out.draw_sprite(
        Sprite::Ship { facing: ship.facing, kind: ship.sprite },
        ship.rect(config),
    )?;

    for target in session.targets.iter().filter(|t| t.interactive) {
        out.draw_sprite(Sprite::Target, target.rect(config))?;
    }

    out.draw_text(&format!("Score: {}", session.score), TextColor::Normal, SCORE_TEXT_AT)?;
    let mach_color = if session.difficulty.at_max(config) {
        TextColor::Alert
    } else {
        TextColor::Normal
    };
    out.draw_text(&format!("Mach: {}", session.difficulty.mach), mach_color, MACH_TEXT_AT)?;

    out.draw_progress(PROGRESS_RECT, session.progress.fill)
}

fn render_game_over<R: Renderer>(
    out: &mut R,
    session: &GameSession,
    config: &GameConfig,
) -> io::Result<()> {
    let (cx, cy) = config.geometry().center();
    let lines = [
        ("GAME OVER".to_string(), TextColor::Alert),
        (format!("Final Score: {}", session.score), TextColor::Normal),
        ("Q - Quit".to_string(), TextColor::Normal),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        out.draw_text(text, *color, (cx - 100.0, cy + 40.0 * i as f64))?;
    }
    Ok(())
}
