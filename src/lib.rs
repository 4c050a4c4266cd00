//! Kokaton Arena - dodge and shoot the bombs
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (sprite collections, entities, collisions)
//! - `renderer`: Image handles and the per-frame draw pass
//! - `platform`: Window/input/asset boundary and a headless implementation
//! - `tuning`: Data-driven game balance
//! - `game`: Reference loop driver

pub mod assets;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, GameError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels, fixed)
    pub const ARENA_WIDTH: i32 = 900;
    pub const ARENA_HEIGHT: i32 = 600;

    /// Player sprite is drawn at twice the asset size
    pub const PLAYER_ZOOM: f32 = 2.0;

    /// Give up on rejection sampling after this many tries
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;
}

/// Start value of a countdown that runs from negative up to zero.
/// Durations beyond `i32::MAX` saturate.
#[inline]
pub fn countdown_start(ticks: u32) -> i32 {
    -i32::try_from(ticks).unwrap_or(i32::MAX)
}

/// Screen-space unit vector for an angle in degrees (y grows downward)
#[inline]
pub fn heading_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
