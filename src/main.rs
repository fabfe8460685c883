mod display;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use galaxy_defender::compute::init_state;
use galaxy_defender::config::{field_for_terminal, FRAME};
use galaxy_defender::game::Game;
use galaxy_defender::input::TerminalInput;
use galaxy_defender::tuning::{SpawnPolicy, Tuning};

use crate::display::{GameOverOverlay, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "galaxy_defender")]
#[command(about = "Single-screen arcade shooter for the terminal")]
struct Args {
    /// Seed for enemy, star and explosion randomness (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Spawn enemies at a constant rate instead of ramping up with the score
    #[arg(long)]
    flat_spawn: bool,

    /// Number of background stars
    #[arg(long)]
    stars: Option<usize>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::default();
        if self.flat_spawn {
            tuning.spawn_policy = SpawnPolicy::Flat;
        }
        if let Some(stars) = self.stars {
            tuning.star_count = stars;
        }
        tuning
    }

    fn frame(&self) -> Duration {
        match self.fps {
            Some(fps) if fps > 0 => Duration::from_secs(1) / fps,
            _ => FRAME,
        }
    }
}

/// The terminal is the game screen, so logs only go to a file when asked.
fn init_logging(path: Option<&PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut out = stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!(error = %e, "terminal event read failed");
                break;
            }
        }
    });

    let result = run(&args, rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(args: &Args, rx: mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let (width, height) = field_for_terminal(cols, rows);
    let state = init_state(width, height, args.tuning(), &mut rng);
    info!(cols, rows, seed = ?args.seed, "starting");

    let mut game = Game::new(
        state,
        TerminalRenderer::new(BufWriter::new(stdout())),
        TerminalInput::new(rx, cols, rows),
        GameOverOverlay::new(BufWriter::new(stdout())),
        rng,
    );
    game.run(args.frame()).context("game loop failed")?;
    info!(score = game.state().score, "exiting");
    Ok(())
}
