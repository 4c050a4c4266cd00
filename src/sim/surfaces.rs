//! Positioned sprite collections
//!
//! A `SpriteCollection` owns a homogeneous set of sprites, stored either as a
//! dense list (addressed by index) or as a key→entry map (addressed by key).
//! Each entry keeps two positions:
//! - `position`: continuous `Vec2`, the only source of truth, accumulates velocity
//! - `rect`: integer render rect, derived as `floor(position)` by `refresh_rects`
//!
//! Only the explicit overrides write a rect directly.

use std::collections::BTreeMap;
use std::fmt::Debug;

use glam::Vec2;

use super::rect::Rect;
use crate::error::ConfigError;
use crate::renderer::ImageHandle;

/// A single visual entity
#[derive(Debug, Clone)]
pub struct PositionedSprite {
    image: ImageHandle,
    position: Vec2,
    rect: Rect,
    velocity: Vec2,
}

impl PositionedSprite {
    /// New sprite at the origin of the image's natural rect
    fn new(image: ImageHandle, velocity: Vec2) -> Self {
        let rect = Rect::new(0, 0, image.width() as i32, image.height() as i32);
        Self {
            position: rect.top_left(),
            rect,
            image,
            velocity,
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Render rect as of the last refresh
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    fn refresh_rect(&mut self) {
        self.rect.x = self.position.x.floor() as i32;
        self.rect.y = self.position.y.floor() as i32;
    }

    fn force_position(&mut self, rect: &Rect) {
        self.position = rect.top_left();
        self.rect.x = rect.x;
        self.rect.y = rect.y;
    }
}

/// Address of an entry: dense index or key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K> {
    Index(usize),
    Key(K),
}

#[derive(Debug, Clone)]
enum Entries<K> {
    Indexed(Vec<PositionedSprite>),
    Keyed(BTreeMap<K, PositionedSprite>),
}

/// Homogeneous set of positioned sprites with per-entry velocity
#[derive(Debug, Clone)]
pub struct SpriteCollection<K = usize> {
    entries: Entries<K>,
}

impl<K> Default for SpriteCollection<K> {
    fn default() -> Self {
        Self {
            entries: Entries::Indexed(Vec::new()),
        }
    }
}

/// Velocities are either one per image or a single shared one
fn check_velocities(images: usize, velocities: usize) -> Result<(), ConfigError> {
    if velocities == 1 || velocities == images {
        Ok(())
    } else {
        Err(ConfigError::LengthMismatch {
            what: "velocities",
            expected: images,
            found: velocities,
        })
    }
}

#[inline]
fn velocity_for(velocities: &[Vec2], i: usize) -> Vec2 {
    if velocities.len() == 1 {
        velocities[0]
    } else {
        velocities[i]
    }
}

impl<K: Ord + Clone + Debug> SpriteCollection<K> {
    /// Indexed collection from images and one-or-per-image velocities
    pub fn new(images: Vec<ImageHandle>, velocities: &[Vec2]) -> Result<Self, ConfigError> {
        let mut collection = Self::default();
        collection.add_indexed(images, velocities)?;
        Ok(collection)
    }

    /// Empty keyed collection
    pub fn keyed() -> Self {
        Self {
            entries: Entries::Keyed(BTreeMap::new()),
        }
    }

    /// Convert the dense list into a key map, keeping every entry's state.
    ///
    /// Keys pair with entries in index order and must be unique.
    pub fn reindex_by_keys(&mut self, keys: Vec<K>) -> Result<(), ConfigError> {
        let list = match &mut self.entries {
            Entries::Indexed(list) => list,
            Entries::Keyed(_) => return Err(ConfigError::AlreadyKeyed),
        };
        if keys.len() != list.len() {
            return Err(ConfigError::LengthMismatch {
                what: "keys",
                expected: list.len(),
                found: keys.len(),
            });
        }
        let mut map = BTreeMap::new();
        for (key, sprite) in keys.iter().zip(list.iter()) {
            if map.insert(key.clone(), sprite.clone()).is_some() {
                return Err(ConfigError::DuplicateKey(format!("{:?}", key)));
            }
        }
        self.entries = Entries::Keyed(map);
        Ok(())
    }

    /// Append entries to an indexed collection
    pub fn add_indexed(
        &mut self,
        images: Vec<ImageHandle>,
        velocities: &[Vec2],
    ) -> Result<(), ConfigError> {
        check_velocities(images.len(), velocities.len())?;
        let Entries::Indexed(list) = &mut self.entries else {
            return Err(ConfigError::AccessMode { expected: "keyed" });
        };
        list.extend(
            images
                .into_iter()
                .enumerate()
                .map(|(i, image)| PositionedSprite::new(image, velocity_for(velocities, i))),
        );
        Ok(())
    }

    /// Append entries to a keyed collection; nothing is inserted on error
    pub fn add_keyed(
        &mut self,
        images: Vec<ImageHandle>,
        velocities: &[Vec2],
        keys: Vec<K>,
    ) -> Result<(), ConfigError> {
        check_velocities(images.len(), velocities.len())?;
        if keys.len() != images.len() {
            return Err(ConfigError::LengthMismatch {
                what: "keys",
                expected: images.len(),
                found: keys.len(),
            });
        }
        let Entries::Keyed(map) = &mut self.entries else {
            return Err(ConfigError::AccessMode { expected: "indexed" });
        };
        for (i, key) in keys.iter().enumerate() {
            if map.contains_key(key) || keys[..i].contains(key) {
                return Err(ConfigError::DuplicateKey(format!("{:?}", key)));
            }
        }
        for (i, (image, key)) in images.into_iter().zip(keys).enumerate() {
            map.insert(key, PositionedSprite::new(image, velocity_for(velocities, i)));
        }
        Ok(())
    }

    /// `position += velocity` for every entry
    pub fn advance(&mut self) {
        for sprite in self.iter_mut() {
            sprite.position += sprite.velocity;
        }
    }

    /// Re-derive every render rect from its position
    pub fn refresh_rects(&mut self) {
        for sprite in self.iter_mut() {
            sprite.refresh_rect();
        }
    }

    /// Refresh all rects, then return the requested entry's image and rect
    pub fn snapshot_for_render(
        &mut self,
        slot: &Slot<K>,
    ) -> Result<(&ImageHandle, Rect), ConfigError> {
        self.refresh_rects();
        let sprite = self.entry(slot)?;
        Ok((&sprite.image, sprite.rect))
    }

    /// Force positions (and rects) to the given top-lefts: one rect for all
    /// entries, or one per entry in iteration order
    pub fn override_positions(&mut self, rects: &[Rect]) -> Result<(), ConfigError> {
        let len = self.len();
        if rects.len() != 1 && rects.len() != len {
            return Err(ConfigError::LengthMismatch {
                what: "rects",
                expected: len,
                found: rects.len(),
            });
        }
        let shared = rects.len() == 1;
        for (i, sprite) in self.iter_mut().enumerate() {
            sprite.force_position(if shared { &rects[0] } else { &rects[i] });
        }
        Ok(())
    }

    /// Move one entry's position to the rect's top-left; the rect follows on
    /// the next refresh
    pub fn set_entry_position(&mut self, rect: &Rect, slot: &Slot<K>) -> Result<(), ConfigError> {
        self.entry_mut(slot)?.position = rect.top_left();
        Ok(())
    }

    pub fn set_velocity(&mut self, slot: &Slot<K>, velocity: Vec2) -> Result<(), ConfigError> {
        self.entry_mut(slot)?.velocity = velocity;
        Ok(())
    }

    /// Swap an entry's image; its hitbox size stays as inserted
    pub fn set_image(&mut self, slot: &Slot<K>, image: ImageHandle) -> Result<(), ConfigError> {
        self.entry_mut(slot)?.image = image;
        Ok(())
    }

    /// Drop an entry with its image, rect, velocity and position
    pub fn remove(&mut self, slot: &Slot<K>) -> Result<PositionedSprite, ConfigError> {
        if self.entry(slot).is_err() {
            return Err(self.slot_error(slot));
        }
        let removed = match (&mut self.entries, slot) {
            (Entries::Indexed(list), Slot::Index(i)) => Some(list.remove(*i)),
            (Entries::Keyed(map), Slot::Key(k)) => map.remove(k),
            _ => None,
        };
        removed.ok_or_else(|| ConfigError::MissingEntry(format!("{:?}", slot)))
    }

    pub fn get(&self, slot: &Slot<K>) -> Option<&PositionedSprite> {
        self.entry(slot).ok()
    }

    /// Cached render rect
    pub fn rect(&self, slot: &Slot<K>) -> Result<Rect, ConfigError> {
        Ok(self.entry(slot)?.rect)
    }

    pub fn position(&self, slot: &Slot<K>) -> Result<Vec2, ConfigError> {
        Ok(self.entry(slot)?.position)
    }

    pub fn velocity(&self, slot: &Slot<K>) -> Result<Vec2, ConfigError> {
        Ok(self.entry(slot)?.velocity)
    }

    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Indexed(list) => list.len(),
            Entries::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self.entries, Entries::Keyed(_))
    }

    /// Entries in index order, or key order when keyed
    pub fn iter(&self) -> Box<dyn Iterator<Item = &PositionedSprite> + '_> {
        match &self.entries {
            Entries::Indexed(list) => Box::new(list.iter()),
            Entries::Keyed(map) => Box::new(map.values()),
        }
    }

    fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut PositionedSprite> + '_> {
        match &mut self.entries {
            Entries::Indexed(list) => Box::new(list.iter_mut()),
            Entries::Keyed(map) => Box::new(map.values_mut()),
        }
    }

    fn entry(&self, slot: &Slot<K>) -> Result<&PositionedSprite, ConfigError> {
        let found = match (&self.entries, slot) {
            (Entries::Indexed(list), Slot::Index(i)) => list.get(*i),
            (Entries::Keyed(map), Slot::Key(k)) => map.get(k),
            _ => None,
        };
        found.ok_or_else(|| self.slot_error(slot))
    }

    fn entry_mut(&mut self, slot: &Slot<K>) -> Result<&mut PositionedSprite, ConfigError> {
        if self.entry(slot).is_err() {
            return Err(self.slot_error(slot));
        }
        let found = match (&mut self.entries, slot) {
            (Entries::Indexed(list), Slot::Index(i)) => list.get_mut(*i),
            (Entries::Keyed(map), Slot::Key(k)) => map.get_mut(k),
            _ => None,
        };
        found.ok_or_else(|| ConfigError::MissingEntry(format!("{:?}", slot)))
    }

    fn slot_error(&self, slot: &Slot<K>) -> ConfigError {
        match (&self.entries, slot) {
            (Entries::Indexed(_), Slot::Key(_)) => ConfigError::AccessMode { expected: "indexed" },
            (Entries::Keyed(_), Slot::Index(_)) => ConfigError::AccessMode { expected: "keyed" },
            _ => ConfigError::MissingEntry(format!("{:?}", slot)),
        }
    }
}
