//! Kokaton Arena entry point
//!
//! Runs one session on the headless platform with a random autopilot.
//!
//! Usage: `kokaton-arena [tuning.json] [seed]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use kokaton_arena::game::{self, SessionSummary};
use kokaton_arena::platform::{HeadlessPlatform, Key};
use kokaton_arena::{GameError, Tuning};

/// Autopilot session length (one minute at 50 fps)
const AUTOPILOT_TICKS: u64 = 3000;

/// Chance of each key being held on a given frame
const KEY_PROBABILITY: f64 = 0.3;

fn main() {
    env_logger::init();
    log::info!("Kokaton Arena (headless) starting...");

    match run_autopilot() {
        Ok(summary) => {
            log::info!(
                "Autopilot finished ({:?}): score {} after {} ticks",
                summary.end,
                summary.score,
                summary.ticks
            );
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_autopilot() -> Result<SessionSummary, GameError> {
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s
            .parse()
            .map_err(|e| GameError::Parse(format!("seed {:?}: {}", s, e)))?,
        None => rand::random(),
    };

    let mut platform = HeadlessPlatform::with_assets(&tuning.assets);
    let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let script: Vec<Vec<Key>> = (0..AUTOPILOT_TICKS)
        .map(|_| {
            Key::ALL
                .iter()
                .copied()
                .filter(|&k| k != Key::Quit && rng.random_bool(KEY_PROBABILITY))
                .collect()
        })
        .collect();
    platform.queue_frames(script);

    game::run(&mut platform, tuning, seed, Some(AUTOPILOT_TICKS))
}
