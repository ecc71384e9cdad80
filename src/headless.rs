//! Headless trace: run the simulation without a terminal and write JSON lines.
//!
//! The first line echoes the configuration; after that one snapshot is written
//! per simulated second. Useful for inspecting how the rail path grows and
//! where the train is at each point.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::core::{GameSnapshot, GameState};
use crate::types::{CoreEvent, GameConfig, TICK_MS};

#[derive(Serialize)]
struct ConfigLine<'a> {
    seed: u32,
    tick_ms: u32,
    ticks: u32,
    config: &'a GameConfig,
}

#[derive(Serialize)]
struct SnapshotLine<'a> {
    t_ms: u64,
    snapshot: &'a GameSnapshot,
}

/// Simulate `ticks` fixed steps and write the trace to `out`.
///
/// Returns the final game state.
pub fn run_headless<W: Write>(
    seed: u32,
    config: GameConfig,
    ticks: u32,
    out: &mut W,
) -> Result<GameState> {
    serde_json::to_writer(
        &mut *out,
        &ConfigLine {
            seed,
            tick_ms: TICK_MS,
            ticks,
            config: &config,
        },
    )?;
    out.write_all(b"\n")?;

    let mut game = GameState::with_config(seed, config);
    game.start();

    let mut snap = GameSnapshot::default();
    let mut t_ms: u64 = 0;
    let mut next_sample_ms: u64 = 1000;

    for _ in 0..ticks {
        game.tick(TICK_MS);
        t_ms += TICK_MS as u64;

        for event in game.take_events() {
            match event {
                CoreEvent::GameOver { score } => {
                    log::info!("headless: game over at {}ms, score {}", t_ms, score)
                }
                other => log::debug!("headless: {:?}", other),
            }
        }

        if t_ms >= next_sample_ms {
            next_sample_ms += 1000;
            game.snapshot_into(&mut snap);
            serde_json::to_writer(
                &mut *out,
                &SnapshotLine {
                    t_ms,
                    snapshot: &snap,
                },
            )?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(game)
}
