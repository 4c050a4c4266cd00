//! Arena bounds checks
//!
//! Every moving entity asks this once per tick: the player to revert a move,
//! hazards to bounce, beams to expire.

use super::rect::Rect;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Result of a bounds check (`true` = within bounds on that axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Bounds {
    /// Within bounds on both axes
    #[inline]
    pub fn inside(&self) -> bool {
        self.horizontal && self.vertical
    }
}

/// Check a rect against a `width x height` arena anchored at the origin
pub fn check_bounds(rect: &Rect, width: i32, height: i32) -> Bounds {
    Bounds {
        horizontal: rect.left() >= 0 && rect.right() <= width,
        vertical: rect.top() >= 0 && rect.bottom() <= height,
    }
}

/// `check_bounds` against the fixed game arena
#[inline]
pub fn check_arena_bounds(rect: &Rect) -> Bounds {
    check_bounds(rect, ARENA_WIDTH, ARENA_HEIGHT)
}

/// True once no part of the rect overlaps the arena
pub fn is_off_arena(rect: &Rect) -> bool {
    rect.left() >= ARENA_WIDTH
        || rect.right() <= 0
        || rect.top() >= ARENA_HEIGHT
        || rect.bottom() <= 0
}
