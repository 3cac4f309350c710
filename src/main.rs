use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::config::GameConfig;
use space_invaders::display::{render, TerminalCanvas};
use space_invaders::entities::{BodyKind, World};
use space_invaders::error::GameError;
use space_invaders::input::HeldKeys;

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("space_invaders: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), GameError> {
    let config = GameConfig::load()?;
    init_logging(&config)?;
    info!("starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Space Invaders"))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to timeouts.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; held keys expire by timeout");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn init_logging(config: &GameConfig) -> Result<(), GameError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_file {
        let file = File::create(path).map_err(|source| GameError::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> Result<(), GameError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let world_size = config.world_size();
    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(out, world_size, cols, rows);
    let mut world = World::new(world_size);
    let frame = Duration::from_secs_f64(1.0 / config.ticks_per_second as f64);

    info!(
        "world {}x{} on a {}x{} terminal, {} bodies",
        world_size.width,
        world_size.height,
        cols,
        rows,
        world.bodies.len()
    );

    game_loop(&mut canvas, &mut world, rx, &mut rng, frame)?;
    info!("quit after {} ticks", world.tick);
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key is seen.  The game has no terminal state: it keeps
/// stepping after the player or the whole formation is gone.
fn game_loop<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame: Duration,
) -> std::io::Result<()> {
    let mut keys = HeldKeys::new();
    let mut player_lost = false;
    let mut formation_lost = false;

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                canvas.resize(world.size, cols, rows);
                info!("terminal resized to {}x{}", cols, rows);
            }
            keys.handle(&ev);
        }
        if keys.quit_requested() {
            return Ok(());
        }

        world.step(&keys.state(), rng);

        if !player_lost && world.player().is_none() {
            player_lost = true;
            info!("tick {}: player destroyed", world.tick);
        }
        if !formation_lost && world.count(BodyKind::Invader) == 0 {
            formation_lost = true;
            info!("tick {}: last invader destroyed", world.tick);
        }

        render(canvas, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}
