//! Session loop driver
//!
//! Polls input, ticks the simulation, renders and paces frames until the
//! player quits, dies, or an optional tick limit runs out. A game over
//! shows the defeated sprite for the configured pause before returning.

use crate::assets::Assets;
use crate::error::GameError;
use crate::platform::{Key, Platform};
use crate::renderer::render;
use crate::sim::{GameOverCause, GameState, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    GameOver(GameOverCause),
    /// `max_ticks` reached
    TickLimit,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    /// Ticks fully simulated
    pub ticks: u64,
    pub end: SessionEnd,
}

/// Sample the platform's key state for one tick
pub fn poll_input(platform: &impl Platform) -> TickInput {
    TickInput {
        up: platform.is_pressed(Key::Up),
        down: platform.is_pressed(Key::Down),
        left: platform.is_pressed(Key::Left),
        right: platform.is_pressed(Key::Right),
        fire: platform.is_pressed(Key::Space),
        quit: platform.is_pressed(Key::Quit),
    }
}

/// Run one session on `platform`
pub fn run(
    platform: &mut impl Platform,
    tuning: Tuning,
    seed: u64,
    max_ticks: Option<u64>,
) -> Result<SessionSummary, GameError> {
    let assets = Assets::load(platform, &tuning.assets)?;
    let mut state = GameState::new(&assets, tuning, seed)?;
    log::info!(
        "Session start: seed {}, {} hazards",
        seed,
        state.hazards.len()
    );

    let end = loop {
        if max_ticks.is_some_and(|limit| state.time_ticks >= limit) {
            break SessionEnd::TickLimit;
        }

        let input = poll_input(platform);
        match tick(&mut state, &input)? {
            TickOutcome::Continue => {}
            TickOutcome::Quit => break SessionEnd::Quit,
            TickOutcome::GameOver(cause) => {
                render(&mut state, &assets, platform)?;
                platform.present();
                platform.sleep(state.tuning.game_over_pause());
                break SessionEnd::GameOver(cause);
            }
        }

        render(&mut state, &assets, platform)?;
        platform.present();
        platform.tick(state.tuning.target_fps);
    };

    let summary = SessionSummary {
        score: state.score.value(),
        ticks: state.time_ticks,
        end,
    };
    log::info!(
        "Session end: {:?}, score {} after {} ticks",
        summary.end,
        summary.score,
        summary.ticks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::platform::HeadlessPlatform;
    use crate::platform::headless::DrawCall;
    use crate::renderer::ImageSource;

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::with_assets(&Tuning::default().assets)
    }

    #[test]
    fn test_poll_maps_keys() {
        let mut p = HeadlessPlatform::new();
        p.press(Key::Space);
        p.press(Key::Left);
        let input = poll_input(&p);
        assert!(input.fire && input.left);
        assert!(!input.up && !input.quit);
    }

    #[test]
    fn test_quit_ends_session() {
        let mut p = platform();
        p.queue_frames([vec![], vec![Key::Right], vec![Key::Quit]]);
        let summary = run(&mut p, Tuning::default(), 1, None).unwrap();
        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.score, 0);
        assert_eq!(p.frames_presented(), 2);
        assert_eq!(p.slept(), Duration::ZERO);
    }

    #[test]
    fn test_tick_limit_ends_session() {
        let mut p = platform();
        let summary = run(&mut p, Tuning::default(), 2, Some(10)).unwrap();
        assert_eq!(summary.end, SessionEnd::TickLimit);
        assert_eq!(summary.ticks, 10);
        assert_eq!(p.ticks(), 10);
        assert_eq!(p.frames_presented(), 10);
    }

    #[test]
    fn test_game_over_pauses_on_defeated_sprite() {
        // A crowd of large, immediately active hazards: contact is certain
        let tuning = Tuning {
            hazard_count: 200,
            hazard_radius_min: 25,
            hazard_radius_max: 25,
            hazard_telegraph_ticks: 0,
            spawn_exclusion_scale: 1.0,
            ..Tuning::default()
        };
        let mut p = platform();
        let summary = run(&mut p, tuning, 3, Some(5000)).unwrap();
        assert_eq!(summary.end, SessionEnd::GameOver(GameOverCause::Hazard));
        assert_eq!(p.slept(), Duration::from_millis(1000));

        let defeated = ImageSource::Asset("fig/8.png".to_string());
        assert!(p.last_frame().iter().any(|call| matches!(
            call,
            DrawCall::Image { image, .. } if image.source == defeated
        )));
    }

    #[test]
    fn test_missing_asset_fails_session() {
        let mut p = HeadlessPlatform::new();
        let err = run(&mut p, Tuning::default(), 4, None).unwrap_err();
        assert!(matches!(err, GameError::ResourceLoad { .. }));
        assert_eq!(p.frames_presented(), 0);
    }
}
