//! Terminal match-3 runner (default binary).
//!
//! The frame loop runs on the main thread: it advances the game with real
//! elapsed time, drains sound cues and draws a snapshot. Keyboard polling
//! runs on a second thread that feeds actions into the same [`SharedGame`].

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, LevelFilter};

use tui_match3::core::{GameConfig, GameSnapshot, GameState, SharedGame, SimpleRng};
use tui_match3::input::{handle_key_event, should_quit, should_restart, InputHandler};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, FRAME_MS};

/// Falling-block match-3 puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tui-match3",
    version,
    about = "Falling-block match-3 puzzle in the terminal.",
    long_about = "Stack three-block columns and line up three or more of a color \
        horizontally, vertically or diagonally. Chains raise the gauge, and the \
        gauge speeds up the fall.\n\n\
        CONTROLS:\n  Left/Right (A/D, H/L)  Move      Up (W/K)  Rotate   Z  Rotate back\n  \
        Down (S/J)             Soft drop Space     Hard drop\n  \
        E / C                  Rotate next piece up / down (between pieces)\n  \
        R                      Restart   Q / Esc   Quit"
)]
struct Args {
    /// Seed for piece colors; random when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// JSON file with game tunables; missing keys keep their defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level written to the log file (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    log_level: LevelFilter,

    /// Log file path.
    #[arg(long, default_value = "tui-match3.log", value_name = "FILE")]
    log_file: PathBuf,

    /// Delay before a held lateral key starts repeating.
    #[arg(long, default_value_t = DEFAULT_DAS_MS, value_name = "MS")]
    das_ms: u32,

    /// Interval between lateral repeats.
    #[arg(long, default_value_t = DEFAULT_ARR_MS, value_name = "MS")]
    arr_ms: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level, &args.log_file)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting with seed {}", seed);

    let state = GameState::new(config, SimpleRng::new(seed)).context("invalid game config")?;
    let game = SharedGame::new(state);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &game, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Flags the input thread raises for the frame loop.
#[derive(Default)]
struct Signals {
    quit: AtomicBool,
    resized: AtomicBool,
}

fn run(term: &mut TerminalRenderer, game: &SharedGame, args: &Args) -> Result<()> {
    let signals = Arc::new(Signals::default());

    let input = {
        let game = game.clone();
        let signals = Arc::clone(&signals);
        let handler = InputHandler::with_config(args.das_ms, args.arr_ms);
        thread::Builder::new()
            .name("input".into())
            .spawn(move || input_loop(game, handler, &signals))
            .context("spawn input thread")?
    };

    let result = frame_loop(term, game, &signals);

    signals.quit.store(true, Ordering::Relaxed);
    let input_result = input
        .join()
        .map_err(|_| anyhow!("input thread panicked"))?;
    result.and(input_result)
}

fn frame_loop(term: &mut TerminalRenderer, game: &SharedGame, signals: &Signals) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    while !signals.quit.load(Ordering::Relaxed) {
        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f64() * 1000.0;
        last = now;

        game.update(dt_ms);
        for cue in game.take_cues() {
            debug!("cue {}", cue.as_str());
        }

        if signals.resized.swap(false, Ordering::Relaxed) {
            term.invalidate();
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(rest) = frame.checked_sub(now.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

fn input_loop(game: SharedGame, mut handler: InputHandler, signals: &Signals) -> Result<()> {
    let poll = Duration::from_millis(FRAME_MS as u64 / 2);
    let mut last = Instant::now();

    while !signals.quit.load(Ordering::Relaxed) {
        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!("quit requested");
                            signals.quit.store(true, Ordering::Relaxed);
                            break;
                        }
                        if should_restart(key) {
                            handler.reset();
                            game.restart();
                            continue;
                        }
                        if let Some(action) = handler.handle_key_press(key.code) {
                            game.apply_action(action);
                        } else if let Some(action) = handle_key_event(key) {
                            game.apply_action(action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = handler.handle_key_release(key.code) {
                            game.apply_action(action);
                        }
                    }
                },
                Event::Resize(..) => signals.resized.store(true, Ordering::Relaxed),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis() as u32;
        if elapsed > 0 {
            last = now;
            for action in handler.update(elapsed) {
                game.apply_action(action);
            }
        }
    }
    Ok(())
}
