//! Data-driven game balance
//!
//! Every tunable constant lives here. Loaded from a JSON file at startup;
//! missing fields fall back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};

/// Image asset identifiers handed to `Platform::load_image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetNames {
    pub background: String,
    /// Normal player sprite (drawn at 2x, mirrored to face right)
    pub player: String,
    /// Shown for the invulnerability window after a kill
    pub player_cheering: String,
    /// Shown during the game-over pause
    pub player_defeated: String,
    pub beam: String,
    pub explosion: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            background: "fig/pg_bg.jpg".to_string(),
            player: "fig/3.png".to_string(),
            player_cheering: "fig/9.png".to_string(),
            player_defeated: "fig/8.png".to_string(),
            beam: "fig/beam.png".to_string(),
            explosion: "fig/explosion.gif".to_string(),
        }
    }
}

/// Game balance and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Frame rate the driver paces to
    pub target_fps: u32,
    /// How long the defeated sprite stays up before returning (ms)
    pub game_over_pause_ms: u64,

    // === Hazards ===
    /// Hazards on the field at start (each kill spawns a replacement)
    pub hazard_count: usize,
    pub hazard_radius_min: i32,
    pub hazard_radius_max: i32,
    /// Ticks a new hazard spends as a translucent warning
    pub hazard_telegraph_ticks: u32,
    /// Pixels per tick
    pub hazard_speed: f32,
    pub hazard_color: [u8; 3],
    /// Alpha of the warning preview (0-255)
    pub warning_alpha: u8,
    /// Exclusion zone size relative to the player's rect, scaled about its
    /// center. The default 5.0 leaves two player extents free on every side.
    pub spawn_exclusion_scale: f32,

    // === Player ===
    /// Pixels per tick per axis
    pub player_step: i32,
    /// Invulnerability window after a kill (ticks)
    pub invulnerable_ticks: u32,

    // === Beams ===
    pub beam_speed: f32,
    pub beam_cooldown_ticks: u32,
    /// Distance from the player's center to the beam's center at spawn
    pub beam_spawn_offset: f32,

    // === Explosions ===
    pub effect_lifetime_ticks: u32,

    pub assets: AssetNames,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            target_fps: 50,
            game_over_pause_ms: 1000,

            hazard_count: 5,
            hazard_radius_min: 1,
            hazard_radius_max: 25,
            hazard_telegraph_ticks: 50,
            hazard_speed: 5.0,
            hazard_color: [255, 0, 0],
            warning_alpha: 96,
            spawn_exclusion_scale: 5.0,

            player_step: 5,
            invulnerable_ticks: 30,

            beam_speed: 5.0,
            beam_cooldown_ticks: 30,
            beam_spawn_offset: 50.0,

            effect_lifetime_ticks: 40,

            assets: AssetNames::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidTuning(msg));

        if self.target_fps == 0 {
            return invalid("target_fps must be positive".to_string());
        }
        if self.hazard_radius_min < 1 || self.hazard_radius_min > self.hazard_radius_max {
            return invalid(format!(
                "hazard radius range [{}, {}] is empty or below 1",
                self.hazard_radius_min, self.hazard_radius_max
            ));
        }
        if 2 * self.hazard_radius_max >= crate::consts::ARENA_HEIGHT {
            return invalid(format!(
                "hazard_radius_max {} does not fit in the arena",
                self.hazard_radius_max
            ));
        }
        if !(self.hazard_speed > 0.0) || !(self.beam_speed > 0.0) {
            return invalid("hazard_speed and beam_speed must be positive".to_string());
        }
        if self.player_step <= 0 {
            return invalid(format!("player_step {} must be positive", self.player_step));
        }
        for (name, ticks) in [
            ("hazard_telegraph_ticks", self.hazard_telegraph_ticks),
            ("beam_cooldown_ticks", self.beam_cooldown_ticks),
            ("invulnerable_ticks", self.invulnerable_ticks),
        ] {
            if i32::try_from(ticks).is_err() {
                return invalid(format!("{} {} exceeds {}", name, ticks, i32::MAX));
            }
        }
        if !(self.spawn_exclusion_scale >= 1.0) {
            return invalid(format!(
                "spawn_exclusion_scale {} must be at least 1",
                self.spawn_exclusion_scale
            ));
        }
        Ok(())
    }

    /// Hazard telegraph counter start value (negative)
    pub fn telegraph_start(&self) -> i32 {
        crate::countdown_start(self.hazard_telegraph_ticks)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}
