//! Headless platform
//!
//! Window-less `Platform` used by the native binary and by tests: assets come
//! from a size registry, input from a per-frame script or held keys, and
//! draw calls are recorded instead of rasterized.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use super::{Key, Platform};
use crate::error::GameError;
use crate::renderer::Image;
use crate::sim::Rect;
use crate::tuning::AssetNames;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image { image: Image, rect: Rect },
    Text { text: String, x: i32, y: i32 },
}

#[derive(Debug)]
pub struct HeadlessPlatform {
    /// Known assets and their natural sizes
    assets: HashMap<String, (u32, u32)>,
    held: HashSet<Key>,
    /// Pressed keys for upcoming frames; the front entry is the current frame
    script: VecDeque<HashSet<Key>>,
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames_presented: u64,
    ticks: u64,
    slept: Duration,
    /// Actually wait in `tick`/`sleep`
    real_time: bool,
    last_tick: Option<Instant>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    /// No assets registered, no keys held, simulated time
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            held: HashSet::new(),
            script: VecDeque::new(),
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
            ticks: 0,
            slept: Duration::ZERO,
            real_time: false,
            last_tick: None,
        }
    }

    /// Registry pre-filled with every asset the game loads
    pub fn with_assets(names: &AssetNames) -> Self {
        let mut platform = Self::new();
        platform.register(&names.background, 900, 600);
        platform.register(&names.player, 48, 48);
        platform.register(&names.player_cheering, 48, 48);
        platform.register(&names.player_defeated, 48, 48);
        platform.register(&names.beam, 40, 12);
        platform.register(&names.explosion, 64, 64);
        platform
    }

    pub fn register(&mut self, id: &str, width: u32, height: u32) {
        self.assets.insert(id.to_string(), (width, height));
    }

    pub fn set_real_time(&mut self, real_time: bool) {
        self.real_time = real_time;
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Queue per-frame key sets; each `tick` advances one frame. Held keys
    /// apply again once the script runs out.
    pub fn queue_frames<I, F>(&mut self, frames: I)
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = Key>,
    {
        self.script
            .extend(frames.into_iter().map(|keys| keys.into_iter().collect()));
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total time requested through `sleep`
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Platform for HeadlessPlatform {
    fn load_image(&mut self, id: &str) -> Result<Image, GameError> {
        let (w, h) = self
            .assets
            .get(id)
            .copied()
            .ok_or_else(|| GameError::ResourceLoad {
                id: id.to_string(),
                reason: "not registered".to_string(),
            })?;
        log::debug!("Loaded image {} ({}x{})", id, w, h);
        Ok(Image::asset(id, w, h))
    }

    fn is_pressed(&self, key: Key) -> bool {
        match self.script.front() {
            Some(keys) => keys.contains(&key),
            None => self.held.contains(&key),
        }
    }

    fn draw(&mut self, image: &Image, rect: Rect) {
        self.pending.push(DrawCall::Image {
            image: image.clone(),
            rect,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.pending.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }

    fn tick(&mut self, fps: u32) -> u64 {
        self.ticks += 1;
        self.script.pop_front();
        let frame = Duration::from_secs(1) / fps.max(1);
        if !self.real_time {
            return frame.as_millis() as u64;
        }
        let now = Instant::now();
        let elapsed = match self.last_tick {
            Some(last) => {
                let spent = now - last;
                if spent < frame {
                    std::thread::sleep(frame - spent);
                }
                last.elapsed()
            }
            None => frame,
        };
        self.last_tick = Some(Instant::now());
        elapsed.as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
        if self.real_time {
            std::thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_is_resource_error() {
        let mut p = HeadlessPlatform::new();
        let err = p.load_image("nope.png").unwrap_err();
        assert!(matches!(err, GameError::ResourceLoad { ref id, .. } if id == "nope.png"));
    }

    #[test]
    fn test_registered_asset_has_natural_size() {
        let mut p = HeadlessPlatform::with_assets(&AssetNames::default());
        let img = p.load_image("fig/beam.png").unwrap();
        assert_eq!(img.size, (40, 12));
    }

    #[test]
    fn test_script_overrides_held_keys_until_exhausted() {
        let mut p = HeadlessPlatform::new();
        p.press(Key::Left);
        p.queue_frames([vec![Key::Up], vec![]]);
        assert!(p.is_pressed(Key::Up));
        assert!(!p.is_pressed(Key::Left));
        p.tick(50);
        assert!(!p.is_pressed(Key::Up));
        p.tick(50);
        assert!(p.is_pressed(Key::Left));
    }

    #[test]
    fn test_present_swaps_frames() {
        let mut p = HeadlessPlatform::new();
        p.draw_text("Score: 0", 1, 2);
        assert!(p.last_frame().is_empty());
        p.present();
        assert_eq!(p.last_frame().len(), 1);
        p.present();
        assert!(p.last_frame().is_empty());
        assert_eq!(p.frames_presented(), 2);
    }

    #[test]
    fn test_simulated_sleep_is_recorded() {
        let mut p = HeadlessPlatform::new();
        p.sleep(Duration::from_millis(1000));
        assert_eq!(p.slept(), Duration::from_secs(1));
        assert_eq!(p.tick(50), 20);
    }
}
