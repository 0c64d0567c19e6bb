//! Hue-aware interpolation and randomized jitter.

use rand::{Rng, RngCore};

use super::{Hsv, clamp_unit, wrap_unit};

/// Per-channel jitter half-ranges for drawing a new flame target.
///
/// Each channel receives an independent uniform offset in ±range.
/// Ranges must be non-negative.
#[derive(Debug, Clone, Copy)]
pub struct JitterRanges {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Default for JitterRanges {
    fn default() -> Self {
        Self {
            hue: 0.01,
            saturation: 0.05,
            value: 0.4,
        }
    }
}

/// Linearly interpolate between two HSV colors for `t` in [0, 1].
///
/// Saturation and value blend linearly. Hue blends along the shorter
/// circular arc: when the raw delta exceeds 0.5 the interpolation runs
/// through the wrap point, so 0.95 blending toward 0.05 passes through
/// 1.0/0.0 instead of sweeping back across the wheel. The result hue is
/// renormalized into [0, 1).
pub fn lerp_hsv(c1: Hsv, c2: Hsv, t: f32) -> Hsv {
    let dh = c2.h - c1.h;
    let h = if libm::fabsf(dh) > 0.5 {
        if dh > 0.0 {
            wrap_unit(c1.h + 1.0 + (c2.h - (c1.h + 1.0)) * t)
        } else {
            wrap_unit(c1.h - 1.0 + (c2.h - (c1.h - 1.0)) * t)
        }
    } else {
        wrap_unit(c1.h + dh * t)
    };

    Hsv {
        h,
        s: c1.s + (c2.s - c1.s) * t,
        v: c1.v + (c2.v - c1.v) * t,
    }
}

/// Draw a randomized color near `base` for the flame effect.
///
/// Saturation and value are clamped back into [0, 1]; hue wraps.
pub fn jitter<R: RngCore>(base: Hsv, ranges: &JitterRanges, rng: &mut R) -> Hsv {
    Hsv {
        h: wrap_unit(base.h + rng.gen_range(-ranges.hue..=ranges.hue)),
        s: clamp_unit(base.s + rng.gen_range(-ranges.saturation..=ranges.saturation)),
        v: clamp_unit(base.v + rng.gen_range(-ranges.value..=ranges.value)),
    }
}
