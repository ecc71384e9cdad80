//! Tetris Train runner (default binary).
//!
//! Interactive mode drives the game from crossterm key events and renders with
//! the framebuffer renderer at a fixed 16ms step. `--headless TICKS` skips the
//! terminal entirely and prints a JSON trace instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tetris_train::cli::{parse_args, CliOptions, USAGE};
use tetris_train::core::{GameSnapshot, GameState};
use tetris_train::headless::run_headless;
use tetris_train::input::{handle_key_event, should_quit};
use tetris_train::term::{FrameBuffer, GameView, TerminalSession, Viewport};
use tetris_train::types::{CoreEvent, TICK_MS};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args)?;
    if opts.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Some(ticks) = opts.headless_ticks {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let game = run_headless(opts.seed, opts.game_config(), ticks, &mut out)?;
        log::info!(
            "headless run finished: score {}, {} pieces, {} waypoints",
            game.score(),
            game.board().placed().len(),
            game.rail_path().len()
        );
        return Ok(());
    }

    let mut session = TerminalSession::start()?;
    let result = run(&mut session, &opts);
    // Restore the terminal before reporting any error from the loop.
    session.finish()?;
    result
}

fn run(session: &mut TerminalSession, opts: &CliOptions) -> Result<()> {
    let mut game = GameState::with_config(opts.seed, opts.game_config());
    game.start();
    log::info!("game started: seed {}", opts.seed);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        session.renderer().draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        log::trace!("key {:?} -> {}", key.code, action.as_str());
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => session.renderer().invalidate(),
                _ => {}
            }
        }

        // Tick.
        while last_tick.elapsed() >= tick_duration {
            last_tick += tick_duration;
            game.tick(TICK_MS);
        }

        for event in game.take_events() {
            if let CoreEvent::GameOver { score } = event {
                log::info!("game over, final score {}", score);
            }
        }
    }
}
