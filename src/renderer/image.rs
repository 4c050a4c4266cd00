//! Image handles
//!
//! An `Image` describes what the platform should draw: a source (named asset
//! or a generated disc) plus a transform. Images are immutable and shared
//! through `Rc`; transforms return new images with recomputed bounds.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Where the pixels come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Asset loaded by identifier
    Asset(String),
    /// Filled circle, color-keyed background
    Disc { radius: u32, color: [u8; 3] },
}

/// Shared image handle
pub type ImageHandle = Rc<Image>;

/// A drawable image with its transform and resulting bounding size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: ImageSource,
    /// Untransformed size
    pub natural_size: (u32, u32),
    /// Bounding size after the transform
    pub size: (u32, u32),
    /// Counter-clockwise rotation in degrees
    pub angle: f32,
    pub scale: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    /// 255 = opaque
    pub alpha: u8,
}

impl Image {
    /// Asset image at its natural size
    pub fn asset(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: ImageSource::Asset(id.into()),
            natural_size: (width, height),
            size: (width, height),
            angle: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
            alpha: 255,
        }
    }

    /// Filled disc in a `2r x 2r` box
    pub fn disc(radius: u32, color: [u8; 3]) -> Self {
        let d = radius * 2;
        Self {
            source: ImageSource::Disc { radius, color },
            natural_size: (d, d),
            size: (d, d),
            angle: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
            alpha: 255,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// Rotate (degrees, counter-clockwise) and scale on top of the current transform.
    ///
    /// The bounding box grows to hold the rotated image, like an image
    /// library's rotozoom.
    pub fn rotozoom(&self, angle: f32, scale: f32) -> Self {
        let angle = self.angle + angle;
        let scale = self.scale * scale;
        Self {
            angle,
            scale,
            size: rotated_bounds(self.natural_size, angle, scale),
            ..self.clone()
        }
    }

    /// Mirror horizontally and/or vertically (toggles existing flips)
    pub fn flipped(&self, x: bool, y: bool) -> Self {
        Self {
            flip_x: self.flip_x ^ x,
            flip_y: self.flip_y ^ y,
            ..self.clone()
        }
    }

    pub fn with_alpha(&self, alpha: u8) -> Self {
        Self {
            alpha,
            ..self.clone()
        }
    }

    pub fn shared(self) -> ImageHandle {
        Rc::new(self)
    }
}

/// Axis-aligned bounds of a `w x h` box rotated by `angle` degrees and scaled
fn rotated_bounds((w, h): (u32, u32), angle: f32, scale: f32) -> (u32, u32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (w, h) = (w as f32 * scale, h as f32 * scale);
    let bw = w * cos.abs() + h * sin.abs();
    let bh = w * sin.abs() + h * cos.abs();
    (bw.round() as u32, bh.round() as u32)
}
