//! RGB <-> HSV conversion.

use super::{Hsv, Rgb, clamp_unit, wrap_unit};

/// Convert an 8-bit RGB color to normalized HSV.
///
/// Degenerate inputs follow the usual convention: hue is 0 when all
/// channels are equal, saturation is 0 when the color is black.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f32::from(rgb.r) / 255.0;
    let g = f32::from(rgb.g) / 255.0;
    let b = f32::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        libm::fmodf((g - b) / delta, 6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    if h < 0.0 {
        h += 1.0;
    }

    Hsv { h, s, v }
}

/// Convert normalized HSV to 8-bit RGB using the sector decomposition.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = wrap_unit(hsv.h);
    let s = clamp_unit(hsv.s);
    let v = clamp_unit(hsv.v);

    let c = s * v;
    let h6 = h * 6.0;
    let sector = h6 as u8;
    let frac = h6 - f32::from(sector);

    // Chroma ramps up in even sectors and down in odd ones.
    let x = if sector & 1 == 0 {
        c * frac
    } else {
        c * (1.0 - frac)
    };
    let m = v - c;

    let (r, g, b) = match sector {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: channel(r + m),
        g: channel(g + m),
        b: channel(b + m),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    libm::roundf(value * 255.0).clamp(0.0, 255.0) as u8
}
