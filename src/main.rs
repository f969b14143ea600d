use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pixel_shooter::display::Screen;
use pixel_shooter::entities::{GameStatus, Level};
use pixel_shooter::error::GameError;
use pixel_shooter::game::Game;
use pixel_shooter::input::KeyTracker;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelArg {
    Easy,
    Medium,
    Hard,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Easy => Level::Easy,
            LevelArg::Medium => Level::Medium,
            LevelArg::Hard => Level::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pixel_shooter")]
#[command(
    about = "Terminal vertical shooter. Logs go to stderr (set RUST_LOG and redirect 2> file)."
)]
struct Args {
    /// Skip the start screen and begin a run at this difficulty
    #[arg(long, value_enum)]
    difficulty: Option<LevelArg>,

    /// Seed for enemy placement and speed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

fn start_run<W: Write>(
    game: &mut Game<StdRng>,
    screen: &mut Screen<W>,
    level: Level,
) -> Result<(), GameError> {
    game.start(level, screen)?;
    screen.set_level_label(level.label());
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: `KeyTracker` records the frame of the last press/repeat
/// event for every key and the pointer column from mouse press/drag/release.
/// It is folded into one `InputState` at the start of each frame, so Space
/// and A/D can be held together.
fn run<W: Write>(
    screen: &mut Screen<W>,
    game: &mut Game<StdRng>,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> Result<(), GameError> {
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        keys.press(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('1') if game.status() == GameStatus::Idle => {
                                start_run(game, screen, Level::Easy)?;
                            }
                            KeyCode::Char('2') if game.status() == GameStatus::Idle => {
                                start_run(game, screen, Level::Medium)?;
                            }
                            KeyCode::Char('3') if game.status() == GameStatus::Idle => {
                                start_run(game, screen, Level::Hard)?;
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if game.status() == GameStatus::GameOver =>
                            {
                                game.restart(screen)?;
                            }
                            KeyCode::Char('m') | KeyCode::Char('M')
                                if game.status() == GameStatus::GameOver =>
                            {
                                game.return_to_idle(screen);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        keys.press(code, frame);
                    }
                    KeyEventKind::Release => {
                        keys.release(code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => keys.pointer_down(column),
                    MouseEventKind::Up(MouseButton::Left) => keys.pointer_up(),
                    _ => {}
                },
                Event::Resize(cols, rows) => screen.resize(cols, rows),
                _ => {}
            }
        }

        let input = keys.snapshot(frame, screen.cols());
        game.tick(&input, screen);
        game.render(screen)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(rng)?;
    let frame_time = Duration::from_secs(1) / args.fps;
    info!("running at {} fps, seed {:?}", args.fps, args.seed);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal lacks key-release events, using hold window");
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

    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(out, cols, rows);
    let result = match args.difficulty {
        Some(level) => start_run(&mut game, &mut screen, level.into()),
        None => Ok(()),
    }
    .and_then(|()| run(&mut screen, &mut game, &rx, frame_time));

    // Always restore the terminal
    let out = screen.get_mut();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{e}");
    }
    result
}
