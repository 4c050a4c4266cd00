//! Player beams
//!
//! The launcher owns every live beam in an arena plus the fire cooldown. A
//! beam keeps the heading the player faced when it was fired.

use glam::Vec2;

use super::arena::{Arena, Handle};
use super::collision::is_off_arena;
use super::player::Direction;
use super::rect::Rect;
use super::surfaces::{Slot, SpriteCollection};
use crate::error::ConfigError;
use crate::renderer::ImageHandle;
use crate::tuning::Tuning;

const BODY: Slot<usize> = Slot::Index(0);

/// A single shot
#[derive(Debug, Clone)]
pub struct Projectile {
    sprite: SpriteCollection,
    heading: Direction,
}

impl Projectile {
    /// Beam centered `offset` px from the owner's center along `heading`
    pub fn launch(
        image: &ImageHandle,
        owner: &Rect,
        heading: Direction,
        speed: f32,
        offset: f32,
    ) -> Result<Self, ConfigError> {
        let rotated = image.rotozoom(heading.angle(), 1.0).shared();
        let (w, h) = (rotated.width() as i32, rotated.height() as i32);
        let center = owner.center_f32() + heading.heading() * offset;
        let start = Rect::from_center(center.x.round() as i32, center.y.round() as i32, w, h);

        let mut sprite = SpriteCollection::new(vec![rotated], &[heading.heading() * speed])?;
        sprite.override_positions(&[start])?;
        Ok(Self { sprite, heading })
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect(&BODY).unwrap_or_default()
    }

    pub fn position(&self) -> Vec2 {
        self.sprite.position(&BODY).unwrap_or_default()
    }

    pub fn velocity(&self) -> Vec2 {
        self.sprite.velocity(&BODY).unwrap_or_default()
    }

    pub fn update(&mut self) {
        self.sprite.advance();
        self.sprite.refresh_rects();
    }

    pub fn snapshot(&mut self) -> Result<(&ImageHandle, Rect), ConfigError> {
        self.sprite.snapshot_for_render(&BODY)
    }
}

/// Fires beams and owns the live ones
#[derive(Debug, Clone)]
pub struct BeamLauncher {
    image: ImageHandle,
    shots: Arena<Projectile>,
    /// Ready at >= 0; firing resets it to `-cooldown_ticks`
    cooldown: i32,
    cooldown_ticks: u32,
    speed: f32,
    offset: f32,
}

impl BeamLauncher {
    pub fn new(image: ImageHandle, tuning: &Tuning) -> Self {
        Self {
            image,
            shots: Arena::new(),
            cooldown: 0,
            cooldown_ticks: tuning.beam_cooldown_ticks,
            speed: tuning.beam_speed,
            offset: tuning.beam_spawn_offset,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown >= 0
    }

    /// Fire from `owner` toward `facing` if the cooldown allows
    pub fn try_fire(
        &mut self,
        owner: &Rect,
        facing: Direction,
    ) -> Result<Option<Handle>, ConfigError> {
        if !self.is_ready() {
            return Ok(None);
        }
        let shot = Projectile::launch(&self.image, owner, facing, self.speed, self.offset)?;
        self.cooldown = crate::countdown_start(self.cooldown_ticks);
        let handle = self.shots.insert(shot);
        log::debug!("Beam {:?} fired {:?}", handle, facing);
        Ok(Some(handle))
    }

    /// One tick: cooldown, movement, and expiry of beams that left the arena
    pub fn update(&mut self) {
        self.cooldown = self.cooldown.saturating_add(1);
        for (_, shot) in self.shots.iter_mut() {
            shot.update();
        }
        self.shots.retain(|_, shot| !is_off_arena(&shot.rect()));
    }

    /// Remove every beam overlapping `target`; true if any hit
    pub fn hit(&mut self, target: &Rect) -> bool {
        !self
            .shots
            .retain(|_, shot| !shot.rect().intersects(target))
            .is_empty()
    }

    pub fn get(&self, handle: Handle) -> Option<&Projectile> {
        self.shots.get(handle)
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Projectile)> {
        self.shots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut Projectile)> {
        self.shots.iter_mut()
    }
}
