use std::io::{stdout, BufWriter, Write};

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use space_protector::audio::{BellAudio, SilentAudio};
use space_protector::backend::AudioBackend;
use space_protector::display::TerminalDisplay;
use space_protector::input::{spawn_event_reader, TerminalInput};
use space_protector::{Game, GameConfig, GameError, Outcome};

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::init();

    let config = GameConfig::from_env()?;
    let tick_rate = config.tick_rate as f64;
    log::info!("Space Protector starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let outcome = result?;
    println!(
        "Final score: {}  (mach {}, {:.1}s)",
        outcome.score,
        outcome.mach,
        outcome.ticks as f64 / tick_rate
    );
    Ok(())
}

fn run<W: Write>(out: &mut W, config: GameConfig) -> Result<Outcome, GameError> {
    if config.bell {
        play(out, config, BellAudio::stdout(true))
    } else {
        play(out, config, SilentAudio)
    }
}

fn play<W: Write, A: AudioBackend>(
    out: &mut W,
    config: GameConfig,
    audio: A,
) -> Result<Outcome, GameError> {
    let display = TerminalDisplay::new(out, config.screen_size)?;
    let input = TerminalInput::new(spawn_event_reader(), display.viewport());

    let mut game = Game::new(config, display, audio, input);
    Ok(game.run()?)
}
