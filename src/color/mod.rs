//! HSV color space and the pure color math used by the flame animation.
//!
//! Hue is a unit angle in [0, 1); saturation and value are normalized to
//! [0, 1]. All functions here are stateless; the only randomness in the
//! crate enters through [`jitter`], which takes an injected RNG.

mod blend;
mod convert;

pub use blend::{JitterRanges, jitter, lerp_hsv};
pub use convert::{hsv_to_rgb, rgb_to_hsv};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// A color in HSV coordinates, all channels normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue, circular in [0, 1)
    pub h: f32,
    /// Saturation in [0, 1]
    pub s: f32,
    /// Value in [0, 1]
    pub v: f32,
}

impl Hsv {
    /// Create an HSV color, wrapping hue and clamping saturation/value.
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: wrap_unit(h),
            s: clamp_unit(s),
            v: clamp_unit(v),
        }
    }
}

/// Wrap a hue angle into [0, 1).
pub(crate) fn wrap_unit(value: f32) -> f32 {
    let wrapped = libm::fmodf(value, 1.0);
    if wrapped < 0.0 { wrapped + 1.0 } else { wrapped }
}

/// Clamp a saturation or value channel into [0, 1].
pub(crate) fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
