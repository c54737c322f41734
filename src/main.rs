mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use log::info;
use rand::thread_rng;

use spaceship_infinity::compute::Game;
use spaceship_infinity::entities::Key;
use spaceship_infinity::options::Options;

/// How long the loop sleeps between two polls of the input channel.
const POLL: Duration = Duration::from_millis(10);

/// `sysexits.h` status for a bad command line.
const EX_USAGE: u8 = 64;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so logs are silent unless sent to a file.
/// `RUST_LOG` still overrides the default level either way.
fn init_logging(options: &Options) -> Result<()> {
    let mut builder = match &options.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Action {
    Quit,
    Step,
    Play(Key),
    Ignore,
}

fn classify(event: KeyEvent, still: bool) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('s') if still => Action::Step,
        KeyCode::Char(c) => Action::Play(Key::Char(c)),
        KeyCode::Up => Action::Play(Key::Up),
        KeyCode::Down => Action::Play(Key::Down),
        KeyCode::Left => Action::Play(Key::Left),
        KeyCode::Right => Action::Play(Key::Right),
        _ => Action::Ignore,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the ship crashes or the player quits.
fn game_loop<W: Write>(out: &mut W, game: &mut Game, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let mut rng = thread_rng();
    let still = game.options.still;
    let start = Instant::now();
    let mut last_turn = start;

    display::render(out, game)?;

    loop {
        game.set_elapsed_time(start.elapsed().as_secs_f64());
        let delay = game.next_delay();
        game.set_delay(delay);

        let mut dirty = false;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key_event) = ev else {
                continue;
            };
            match classify(key_event, still) {
                Action::Quit => {
                    info!("quit with score {}", game.score());
                    return Ok(());
                }
                Action::Step => {
                    game.compute_turn(&mut rng);
                    dirty = true;
                }
                Action::Play(key) => {
                    game.process_input(key, &mut rng);
                    dirty = true;
                }
                Action::Ignore => {}
            }
            if !game.is_alive() {
                break;
            }
        }

        if !still && game.is_alive() && last_turn.elapsed().as_secs_f64() > delay {
            game.compute_turn(&mut rng);
            last_turn = Instant::now();
            dirty = true;
        }

        if dirty || game.options.debug {
            display::render(out, game)?;
        }

        if !game.is_alive() {
            info!(
                "game over after {:.1}s, score {}",
                game.elapsed_time,
                game.score()
            );
            display::render_game_over(out, game)?;
            wait_for_key(rx);
            return Ok(());
        }

        thread::sleep(POLL);
    }
}

fn wait_for_key(rx: &mpsc::Receiver<Event>) {
    // Swallow keys that were already in flight when the ship crashed.
    thread::sleep(Duration::from_millis(500));
    while rx.try_recv().is_ok() {}
    while let Ok(ev) = rx.recv() {
        if matches!(ev, Event::Key(KeyEvent { kind: KeyEventKind::Press, .. })) {
            break;
        }
    }
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Owns raw mode and the alternate screen; dropping it hands the terminal back.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self> {
        terminal::enable_raw_mode().context("cannot switch the terminal to raw mode")?;
        // Restores on drop from here on.
        let guard = TerminalGuard;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let options = match Options::try_parse() {
        Ok(options) => options.normalized(),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                return Ok(ExitCode::from(EX_USAGE));
            }
        },
    };
    if let Err(err) = options.validate() {
        eprintln!("error: {:#}", err);
        return Ok(ExitCode::from(EX_USAGE));
    }
    init_logging(&options)?;
    info!("starting with {:?}", options);

    let mut game = Game::new(options, &mut thread_rng());

    let mut out = BufWriter::new(stdout());
    let guard = TerminalGuard::enter(&mut out)?;

    // Dedicate a thread to blocking event reads so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);
    let _ = out.flush();
    drop(guard);

    result?;
    println!("Score: {}", game.score());
    Ok(ExitCode::SUCCESS)
}
