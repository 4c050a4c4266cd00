//! Game state
//!
//! Everything one session mutates lives here. The tick loop in `tick.rs` is
//! the only writer.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::beam::BeamLauncher;
use super::effect::ImpactEffect;
use super::hazard::Hazard;
use super::player::Player;
use super::score::ScoreTracker;
use crate::assets::Assets;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::GameError;
use crate::renderer::ImageHandle;
use crate::tuning::Tuning;

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Touched an active hazard
    Hazard,
    /// Touched a live explosion
    Explosion,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver(GameOverCause),
}

/// Player starting center: (WIDTH * 9/16, HEIGHT * 4/9)
pub const PLAYER_START: (i32, i32) = (ARENA_WIDTH * 9 / 16, ARENA_HEIGHT * 4 / 9);

#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives hazard spawns
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live hazards, telegraphing ones included
    pub hazards: Vec<Hazard>,
    pub beams: BeamLauncher,
    /// Live explosions
    pub effects: Vec<ImpactEffect>,
    pub score: ScoreTracker,
    /// First explosion frame, shared by every effect
    pub explosion: ImageHandle,
}

impl GameState {
    /// Fresh session: player at its start, `hazard_count` hazards telegraphing
    pub fn new(assets: &Assets, tuning: Tuning, seed: u64) -> Result<Self, GameError> {
        tuning.validate()?;
        let player = Player::new(assets.player.clone(), PLAYER_START, tuning.player_step)?;
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            hazards: Vec::with_capacity(tuning.hazard_count),
            beams: BeamLauncher::new(assets.beam.clone(), &tuning),
            effects: Vec::new(),
            score: ScoreTracker::new(),
            explosion: assets.explosion.clone(),
            tuning,
        };
        for _ in 0..state.tuning.hazard_count {
            state.spawn_hazard()?;
        }
        Ok(state)
    }

    /// Add one random hazard away from the player
    pub fn spawn_hazard(&mut self) -> Result<(), GameError> {
        let hazard = Hazard::spawn(&mut self.rng, &self.tuning, &self.player.rect())?;
        self.hazards.push(hazard);
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }
}
