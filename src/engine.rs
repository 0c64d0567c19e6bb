//! Per-element color state machine driving the flame animation.

use rand::RngCore;

use crate::OutputDevice;
use crate::color::{Hsv, JitterRanges, Rgb, hsv_to_rgb, jitter, lerp_hsv, rgb_to_hsv};
use crate::params::{AnimationMode, AnimationParameters};

/// Number of ticks in one blend cycle.
pub const BLEND_STEPS: u8 = 8;

/// Owns the current/target color pair for each of `N` light elements and
/// advances the blend on every tick.
///
/// The blend step counter stays in [0, `BLEND_STEPS`]. It resets to 0
/// exactly when new targets are drawn; a current color is only replaced
/// by its previous target at that cycle boundary, never mid-blend.
#[derive(Debug, Clone)]
pub struct AnimationEngine<const N: usize> {
    current: [Hsv; N],
    target: [Hsv; N],
    blend_step: u8,
    jitter: JitterRanges,
}

impl<const N: usize> AnimationEngine<N> {
    pub fn new() -> Self {
        Self::with_jitter(JitterRanges::default())
    }

    /// Create an engine with custom jitter ranges.
    pub fn with_jitter(jitter: JitterRanges) -> Self {
        let off = Hsv { h: 0.0, s: 0.0, v: 0.0 };
        Self {
            current: [off; N],
            target: [off; N],
            blend_step: 0,
            jitter,
        }
    }

    /// Seed every element from the base color and draw fresh targets.
    pub fn initialize<R: RngCore>(&mut self, base_color: Rgb, rng: &mut R) {
        let base = rgb_to_hsv(base_color);
        for (current, target) in self.current.iter_mut().zip(self.target.iter_mut()) {
            *current = base;
            *target = jitter(base, &self.jitter, rng);
        }
        self.blend_step = 0;
    }

    /// Advance the animation by one frame and commit it to the device.
    ///
    /// The caller is responsible for pacing; this method assumes it runs
    /// no more often than once per tick period.
    ///
    /// Static mode writes the base color directly and leaves the blend
    /// state untouched, so switching back to flame resumes the cycle
    /// where it left off. Flame mode picks up a changed base color only
    /// at the next cycle boundary; static reflects it on the next tick.
    pub fn tick<D: OutputDevice, R: RngCore>(
        &mut self,
        params: &AnimationParameters,
        device: &mut D,
        rng: &mut R,
    ) {
        match params.mode {
            AnimationMode::Static => {
                device.set_all(params.base_color);
                device.commit();
            }
            AnimationMode::Flame => {
                let t = f32::from(self.blend_step) / f32::from(BLEND_STEPS);
                for (i, (current, target)) in
                    self.current.iter().zip(self.target.iter()).enumerate()
                {
                    let blended = lerp_hsv(*current, *target, t);
                    device.set_element(i, hsv_to_rgb(blended));
                }
                device.commit();

                self.blend_step += 1;
                if self.blend_step > BLEND_STEPS {
                    self.blend_step = 0;
                    let base = rgb_to_hsv(params.base_color);
                    for (current, target) in
                        self.current.iter_mut().zip(self.target.iter_mut())
                    {
                        *current = *target;
                        *target = jitter(base, &self.jitter, rng);
                    }
                }
            }
        }
    }

    /// Current position within the blend cycle.
    pub const fn blend_step(&self) -> u8 {
        self.blend_step
    }
}

impl<const N: usize> Default for AnimationEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}
