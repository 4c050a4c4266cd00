//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arena;
pub mod beam;
pub mod collision;
pub mod effect;
pub mod hazard;
pub mod player;
pub mod rect;
pub mod score;
pub mod state;
pub mod surfaces;
pub mod tick;

pub use arena::{Arena, Handle};
pub use beam::{BeamLauncher, Projectile};
pub use collision::{Bounds, check_arena_bounds, check_bounds, is_off_arena};
pub use effect::ImpactEffect;
pub use hazard::{Hazard, HazardVisual};
pub use player::{Direction, Player, PlayerSprites};
pub use rect::Rect;
pub use score::ScoreTracker;
pub use state::{GameOverCause, GamePhase, GameState, PLAYER_START};
pub use surfaces::{PositionedSprite, Slot, SpriteCollection};
pub use tick::{TickInput, TickOutcome, remove_marked, tick};
