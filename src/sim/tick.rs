//! Frame-stepped simulation tick
//!
//! One call advances the session by exactly one frame, in a fixed order:
//! fire, explosion hits, hazard hits and kills, then movement of hazards,
//! player, beams and effects. Removals found during a pass are applied after
//! it.

use super::effect::ImpactEffect;
use super::state::{GameOverCause, GamePhase, GameState};
use crate::error::GameError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire a beam (space)
    pub fire: bool,
    /// End the session
    pub quit: bool,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    GameOver(GameOverCause),
}

/// Remove the marked indices from `items`, highest first, so earlier indices
/// stay valid. Duplicates and out-of-range indices are ignored. Returns the
/// removed items, highest index first.
pub fn remove_marked<T>(items: &mut Vec<T>, mut marked: Vec<usize>) -> Vec<T> {
    marked.sort_unstable_by(|a, b| b.cmp(a));
    marked.dedup();
    let mut removed = Vec::with_capacity(marked.len());
    for i in marked {
        if i < items.len() {
            removed.push(items.remove(i));
        }
    }
    removed
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<TickOutcome, GameError> {
    if let GamePhase::GameOver(cause) = state.phase {
        return Ok(TickOutcome::GameOver(cause));
    }
    if input.quit {
        log::info!("Quit requested at tick {}", state.time_ticks);
        return Ok(TickOutcome::Quit);
    }

    if input.fire {
        state
            .beams
            .try_fire(&state.player.rect(), state.player.facing())?;
    }

    let player_rect = state.player.rect();

    // Explosions are deadly while they last
    if !state.player.is_invulnerable() && state.effects.iter().any(|e| e.hits(&player_rect)) {
        return end_session(state, GameOverCause::Explosion);
    }

    // Collision pass: mark kills, apply after
    let mut killed = Vec::new();
    for (i, hazard) in state.hazards.iter().enumerate() {
        if !hazard.is_active() {
            continue;
        }
        let rect = hazard.rect();
        if rect.intersects(&player_rect) && !state.player.is_invulnerable() {
            return end_session(state, GameOverCause::Hazard);
        }
        if state.beams.hit(&rect) {
            killed.push(i);
            state.effects.push(ImpactEffect::new(&state.explosion, &rect)?);
            state.score.increment();
            state.player.set_invulnerable(state.tuning.invulnerable_ticks)?;
            log::debug!(
                "Hazard destroyed at {:?}, score {}",
                rect,
                state.score.value()
            );
        }
    }
    let replacements = remove_marked(&mut state.hazards, killed).len();
    for _ in 0..replacements {
        state.spawn_hazard()?;
    }

    for hazard in state.hazards.iter_mut() {
        hazard.update()?;
    }
    state.player.update(input)?;
    state.beams.update();

    let lifetime = state.tuning.effect_lifetime_ticks;
    let mut expired = Vec::new();
    for (i, effect) in state.effects.iter_mut().enumerate() {
        effect.update();
        if effect.is_expired(lifetime) {
            expired.push(i);
        }
    }
    remove_marked(&mut state.effects, expired);

    state.time_ticks += 1;
    Ok(TickOutcome::Continue)
}

fn end_session(state: &mut GameState, cause: GameOverCause) -> Result<TickOutcome, GameError> {
    state.phase = GamePhase::GameOver(cause);
    state.player.show_defeated()?;
    log::info!(
        "Game over ({:?}) at tick {} with score {}",
        cause,
        state.time_ticks,
        state.score.value()
    );
    Ok(TickOutcome::GameOver(cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::assets::Assets;
    use crate::platform::HeadlessPlatform;
    use crate::renderer::ImageSource;
    use crate::sim::hazard::Hazard;
    use crate::sim::rect::Rect;
    use crate::tuning::{AssetNames, Tuning};

    /// Fresh state with no random hazards
    fn empty_state() -> GameState {
        let names = AssetNames::default();
        let assets = Assets::load(&mut HeadlessPlatform::with_assets(&names), &names).unwrap();
        let mut state = GameState::new(&assets, Tuning::default(), 12345).unwrap();
        state.hazards.clear();
        state
    }

    fn still_hazard(center: (i32, i32)) -> Hazard {
        Hazard::new(center, 10, Vec2::ZERO, 0, [255, 0, 0], 96).unwrap()
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_remove_marked_highest_first() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        let removed = remove_marked(&mut items, vec![1, 3, 1, 9]);
        assert_eq!(removed, vec!['d', 'b']);
        assert_eq!(items, vec!['a', 'c', 'e']);
    }

    #[test]
    fn test_quit_stops_before_simulating() {
        let mut state = empty_state();
        state.hazards.push(still_hazard((100, 100)));
        let input = TickInput {
            quit: true,
            fire: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input).unwrap(), TickOutcome::Quit);
        assert_eq!(state.time_ticks, 0);
        assert!(state.beams.is_empty());
    }

    #[test]
    fn test_hazard_contact_ends_game() {
        let mut state = empty_state();
        state.hazards.push(still_hazard(state.player.rect().center()));
        let outcome = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(outcome, TickOutcome::GameOver(GameOverCause::Hazard));
        assert_eq!(state.phase, GamePhase::GameOver(GameOverCause::Hazard));
        let (img, _) = state.player.snapshot().unwrap();
        assert_eq!(img.source, ImageSource::Asset("fig/8.png".to_string()));

        // Terminal: further ticks change nothing
        let before = state.time_ticks;
        assert_eq!(tick(&mut state, &fire()).unwrap(), outcome);
        assert_eq!(state.time_ticks, before);
    }

    #[test]
    fn test_telegraphing_hazard_is_harmless() {
        let mut state = empty_state();
        let center = state.player.rect().center();
        state
            .hazards
            .push(Hazard::new(center, 10, Vec2::ZERO, -3, [255, 0, 0], 96).unwrap());
        for _ in 0..3 {
            assert_eq!(
                tick(&mut state, &TickInput::default()).unwrap(),
                TickOutcome::Continue
            );
        }
        assert_eq!(
            tick(&mut state, &TickInput::default()).unwrap(),
            TickOutcome::GameOver(GameOverCause::Hazard)
        );
    }

    #[test]
    fn test_invulnerable_player_survives_contact() {
        let mut state = empty_state();
        state.player.set_invulnerable(30).unwrap();
        state.hazards.push(still_hazard(state.player.rect().center()));
        let rect = state.player.rect();
        state
            .effects
            .push(ImpactEffect::new(&state.explosion, &rect).unwrap());
        assert_eq!(tick(&mut state, &TickInput::default()).unwrap(), TickOutcome::Continue);
    }

    #[test]
    fn test_explosion_contact_ends_game() {
        let mut state = empty_state();
        let rect = state.player.rect();
        state
            .effects
            .push(ImpactEffect::new(&state.explosion, &rect).unwrap());
        assert_eq!(
            tick(&mut state, &TickInput::default()).unwrap(),
            TickOutcome::GameOver(GameOverCause::Explosion)
        );
    }

    #[test]
    fn test_beam_kills_hazard_and_replaces_it() {
        let mut state = empty_state();
        let (cx, cy) = state.player.rect().center();
        // Straight above the player, in the path of an upward shot
        state.hazards.push(still_hazard((cx, cy - 166)));

        for _ in 0..30 {
            assert_eq!(tick(&mut state, &fire()).unwrap(), TickOutcome::Continue);
            if state.score.value() > 0 {
                break;
            }
        }
        assert_eq!(state.score.value(), 1);
        assert_eq!(state.score.text(), "Score: 1");
        assert!(state.beams.is_empty());
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].rect().top_left(), Vec2::new(496.0, 90.0));
        assert_eq!(state.hazards.len(), 1);
        assert!(!state.hazards[0].is_active());
        assert!(state.player.is_invulnerable());
    }

    #[test]
    fn test_effects_expire_after_lifetime() {
        let mut state = empty_state();
        let far = Rect::new(0, 0, 20, 20);
        state
            .effects
            .push(ImpactEffect::new(&state.explosion, &far).unwrap());
        state
            .effects
            .push(ImpactEffect::new(&state.explosion, &far).unwrap());
        for _ in 0..40 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert_eq!(state.effects.len(), 2);
        tick(&mut state, &TickInput::default()).unwrap();
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_only_expired_effect_is_removed() {
        let mut state = empty_state();
        let at = |y| Rect::new(0, y, 20, 20);
        let mut old = ImpactEffect::new(&state.explosion, &at(200)).unwrap();
        for _ in 0..40 {
            old.update();
        }
        let young = ImpactEffect::new(&state.explosion, &at(0)).unwrap();
        let last = ImpactEffect::new(&state.explosion, &at(400)).unwrap();
        state.effects = vec![young, old, last];

        assert_eq!(tick(&mut state, &TickInput::default()).unwrap(), TickOutcome::Continue);
        let tops: Vec<i32> = state.effects.iter().map(|e| e.rect().y).collect();
        assert_eq!(tops, vec![0, 400]);
        assert!(state.effects.iter().all(|e| e.age() == 1));
    }

    #[test]
    fn test_same_seed_same_session() {
        let script = [
            TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                down: true,
                fire: true,
                ..Default::default()
            },
        ];
        let run = || {
            let names = AssetNames::default();
            let assets = Assets::load(&mut HeadlessPlatform::with_assets(&names), &names).unwrap();
            let mut state = GameState::new(&assets, Tuning::default(), 7).unwrap();
            for i in 0..120 {
                if tick(&mut state, &script[i % script.len()]).unwrap() != TickOutcome::Continue {
                    break;
                }
            }
            (
                state.time_ticks,
                state.player.rect(),
                state.hazards.iter().map(|h| h.rect()).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(), run());
    }
}
