//! Bouncing bombs
//!
//! A hazard first spends a telegraph period as a translucent warning where it
//! will appear, then moves at constant speed and bounces off the arena walls.

use glam::Vec2;
use rand::Rng;

use super::collision::{Bounds, check_arena_bounds};
use super::rect::Rect;
use super::surfaces::{Slot, SpriteCollection};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MAX_SPAWN_ATTEMPTS};
use crate::error::ConfigError;
use crate::heading_from_degrees;
use crate::renderer::{Image, ImageHandle};
use crate::tuning::Tuning;

/// Keys of a hazard's sprite collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HazardVisual {
    /// The moving, collidable disc
    Body,
    /// Translucent preview shown while telegraphing
    Warning,
}

const BODY: Slot<HazardVisual> = Slot::Key(HazardVisual::Body);
const WARNING: Slot<HazardVisual> = Slot::Key(HazardVisual::Warning);

#[derive(Debug, Clone)]
pub struct Hazard {
    sprite: SpriteCollection<HazardVisual>,
    radius: i32,
    /// Negative while telegraphing, counts up once per tick
    telegraph: i32,
}

impl Hazard {
    /// Hazard centered at `center` that starts moving after `-telegraph` ticks
    pub fn new(
        center: (i32, i32),
        radius: i32,
        velocity: Vec2,
        telegraph: i32,
        color: [u8; 3],
        warning_alpha: u8,
    ) -> Result<Self, ConfigError> {
        let body = Image::disc(radius as u32, color);
        let warning = body.with_alpha(warning_alpha);
        let mut sprite = SpriteCollection::new(
            vec![body.shared(), warning.shared()],
            &[velocity, Vec2::ZERO],
        )?;
        sprite.reindex_by_keys(vec![HazardVisual::Body, HazardVisual::Warning])?;
        let rect = Rect::from_center(center.0, center.1, 2 * radius, 2 * radius);
        sprite.override_positions(&[rect])?;
        Ok(Self {
            sprite,
            radius,
            telegraph,
        })
    }

    /// Random hazard placed away from the player.
    ///
    /// Centers are drawn so the disc fits in the arena and rejected while they
    /// land in the player's rect scaled by `spawn_exclusion_scale`.
    pub fn spawn(rng: &mut impl Rng, tuning: &Tuning, player: &Rect) -> Result<Self, ConfigError> {
        let radius = rng.random_range(tuning.hazard_radius_min..=tuning.hazard_radius_max);
        let exclusion = spawn_exclusion(player, tuning.spawn_exclusion_scale);
        let center = sample_spawn_point(rng, radius, &exclusion);
        let velocity = heading_from_degrees(rng.random_range(0.0..360.0)) * tuning.hazard_speed;
        log::debug!(
            "Hazard spawned at {:?} (r={}, v=({:.2}, {:.2}))",
            center,
            radius,
            velocity.x,
            velocity.y
        );
        Self::new(
            center,
            radius,
            velocity,
            tuning.telegraph_start(),
            tuning.hazard_color,
            tuning.warning_alpha,
        )
    }

    /// Done telegraphing: moves and collides
    pub fn is_active(&self) -> bool {
        self.telegraph >= 0
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect(&BODY).unwrap_or_default()
    }

    pub fn velocity(&self) -> Vec2 {
        self.sprite.velocity(&BODY).unwrap_or_default()
    }

    /// One tick. Telegraphing hazards only count down; active ones bounce off
    /// any wall they are outside of, then move. Returns the bounds check that
    /// drove the bounce, if the hazard was active.
    pub fn update(&mut self) -> Result<Option<Bounds>, ConfigError> {
        if !self.is_active() {
            self.telegraph += 1;
            return Ok(None);
        }
        let bounds = check_arena_bounds(&self.rect());
        let mut v = self.velocity();
        if !bounds.horizontal {
            v.x = -v.x;
        }
        if !bounds.vertical {
            v.y = -v.y;
        }
        self.sprite.set_velocity(&BODY, v)?;
        self.sprite.advance();
        self.sprite.refresh_rects();
        Ok(Some(bounds))
    }

    /// Body once active, the warning preview before that
    pub fn snapshot(&mut self) -> Result<(&ImageHandle, Rect), ConfigError> {
        let slot = if self.is_active() { BODY } else { WARNING };
        self.sprite.snapshot_for_render(&slot)
    }
}

/// Player rect scaled about its center
pub fn spawn_exclusion(player: &Rect, scale: f32) -> Rect {
    player.scaled_about_center(scale)
}

/// Uniform center in the arena (disc fully inside) outside `exclusion`
pub fn sample_spawn_point(rng: &mut impl Rng, radius: i32, exclusion: &Rect) -> (i32, i32) {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let x = rng.random_range(radius..=ARENA_WIDTH - radius);
        let y = rng.random_range(radius..=ARENA_HEIGHT - radius);
        if !exclusion.contains_point(x, y) {
            return (x, y);
        }
    }
    let (cx, cy) = exclusion.center();
    let x = if cx < ARENA_WIDTH / 2 { ARENA_WIDTH - radius } else { radius };
    let y = if cy < ARENA_HEIGHT / 2 { ARENA_HEIGHT - radius } else { radius };
    log::warn!(
        "No free spawn point after {} attempts, using corner ({}, {})",
        MAX_SPAWN_ATTEMPTS,
        x,
        y
    );
    (x, y)
}
