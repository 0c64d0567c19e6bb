//! Shared animation parameters mutated by commands and read by the engine.

use crate::color::Rgb;

const MODE_NAME_STATIC: &str = "static";
const MODE_NAME_FLAME: &str = "flame";

/// Built-in default base color (warm orange).
pub const DEFAULT_BASE_COLOR: Rgb = Rgb {
    r: 255,
    g: 110,
    b: 15,
};

/// Animation styles the lamp can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// Every element holds the base color
    Static,
    /// Organic blending toward randomized targets
    Flame,
}

impl AnimationMode {
    /// Parse a mode name from a command payload.
    ///
    /// Unrecognized names yield `None`, which the command layer treats
    /// as "no mode change" rather than an error.
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_STATIC => Some(Self::Static),
            MODE_NAME_FLAME => Some(Self::Flame),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => MODE_NAME_STATIC,
            Self::Flame => MODE_NAME_FLAME,
        }
    }
}

/// The one shared-mutable parameter block in the system.
///
/// The command processor is the sole writer and the animation engine the
/// sole reader; the cooperative main loop serializes the two, so no lock
/// guards this struct. Lives for the whole process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationParameters {
    pub mode: AnimationMode,
    pub base_color: Rgb,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            mode: AnimationMode::Flame,
            base_color: DEFAULT_BASE_COLOR,
        }
    }
}
