//! Platform abstraction layer
//!
//! Everything the simulation needs from the outside world:
//! - Image loading by identifier
//! - Key-pressed state
//! - Drawing images/text at integer rects, presenting frames
//! - Frame pacing and sleeping

pub mod headless;

pub use headless::HeadlessPlatform;

use std::time::Duration;

use crate::error::GameError;
use crate::renderer::Image;
use crate::sim::Rect;

/// The fixed key set the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Quit,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Space,
        Key::Quit,
    ];
}

/// Window, input and asset services provided by the host
pub trait Platform {
    /// Load an image asset at its natural size
    fn load_image(&mut self, id: &str) -> Result<Image, GameError>;

    /// Whether `key` is currently held
    fn is_pressed(&self, key: Key) -> bool;

    /// Blit `image` with its top-left at `rect`
    fn draw(&mut self, image: &Image, rect: Rect);

    /// Draw a line of text with its top-left at `(x, y)`
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Show the frame built since the last present
    fn present(&mut self);

    /// Wait out the rest of the frame at `fps`; returns milliseconds since the last call
    fn tick(&mut self, fps: u32) -> u64;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}
