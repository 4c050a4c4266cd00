//! Explosions left behind by destroyed hazards
//!
//! An effect stays where its hazard died, flickers between two frames, and
//! kills the player on contact until it expires.

use glam::Vec2;

use super::rect::Rect;
use super::surfaces::{Slot, SpriteCollection};
use crate::error::ConfigError;
use crate::renderer::ImageHandle;

#[derive(Debug, Clone)]
pub struct ImpactEffect {
    frames: SpriteCollection,
    /// Ticks since spawn
    age: u32,
}

impl ImpactEffect {
    /// Two-frame burst anchored at the top-left of `at`: `image` and its
    /// horizontally and vertically mirrored copy
    pub fn new(image: &ImageHandle, at: &Rect) -> Result<Self, ConfigError> {
        let mirrored = image.flipped(true, true).shared();
        let mut frames = SpriteCollection::new(vec![image.clone(), mirrored], &[Vec2::ZERO])?;
        for i in 0..2 {
            frames.set_entry_position(at, &Slot::Index(i))?;
        }
        frames.refresh_rects();
        Ok(Self { frames, age: 0 })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn update(&mut self) {
        self.age += 1;
    }

    /// Past its lifetime; the tick loop removes it
    pub fn is_expired(&self, lifetime: u32) -> bool {
        self.age > lifetime
    }

    /// Index of the frame shown this tick
    pub fn frame(&self) -> usize {
        (self.age % 2) as usize
    }

    pub fn rect(&self) -> Rect {
        self.frames.rect(&Slot::Index(self.frame())).unwrap_or_default()
    }

    /// Whether the burst currently overlaps `target`
    pub fn hits(&self, target: &Rect) -> bool {
        self.rect().intersects(target)
    }

    pub fn snapshot(&mut self) -> Result<(&ImageHandle, Rect), ConfigError> {
        let slot = Slot::Index(self.frame());
        self.frames.snapshot_for_render(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Image;

    fn effect() -> ImpactEffect {
        let image = Image::asset("explosion", 64, 64).shared();
        ImpactEffect::new(&image, &Rect::new(100, 120, 20, 20)).unwrap()
    }

    #[test]
    fn test_frames_alternate_and_stay_put() {
        let mut e = effect();
        let (img, rect) = e.snapshot().unwrap();
        assert!(!img.flip_x);
        assert_eq!(rect, Rect::new(100, 120, 64, 64));
        e.update();
        let (img, rect) = e.snapshot().unwrap();
        assert!(img.flip_x && img.flip_y);
        assert_eq!(rect, Rect::new(100, 120, 64, 64));
        e.update();
        assert_eq!(e.frame(), 0);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut e = effect();
        for _ in 0..40 {
            e.update();
        }
        assert!(!e.is_expired(40));
        e.update();
        assert!(e.is_expired(40));
        assert_eq!(e.age(), 41);
    }

    #[test]
    fn test_hits_overlapping_player() {
        let e = effect();
        assert!(e.hits(&Rect::new(150, 150, 50, 50)));
        assert!(!e.hits(&Rect::new(164, 120, 50, 50)));
    }
}
