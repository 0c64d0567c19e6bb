//! Cooperative scheduler interleaving the animation tick with command
//! handling.
//!
//! Single thread of control, two duties per iteration: advance the
//! animation if its deadline passed, then drain at most one pending
//! command. Neither duty blocks, which is what makes the unsynchronized
//! [`AnimationParameters`] sharing sound: a command applied between two
//! ticks is fully visible to the very next tick, with no torn reads.

use embassy_time::{Duration, Instant};
use rand::RngCore;

use crate::OutputDevice;
use crate::channel::CommandReceiver;
use crate::color::Rgb;
use crate::command::{self, Ack, CommandError};
use crate::engine::AnimationEngine;
use crate::params::AnimationParameters;

/// Fixed animation tick period.
pub const TICK_PERIOD: Duration = Duration::from_millis(33);

/// Blink period for the provisioning status indication.
pub const STATUS_BLINK_PERIOD: Duration = Duration::from_millis(500);

const STATUS_BOOT_COLOR: Rgb = Rgb {
    r: 0,
    g: 255,
    b: 255,
};
const STATUS_LINK_COLOR: Rgb = Rgb { r: 0, g: 0, b: 255 };
const STATUS_OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Coarse device lifecycle state, shown on the lights until ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Powering up (cyan)
    Boot,
    /// Joining the network (solid blue)
    LinkConnecting,
    /// Captive provisioning portal active (blinking blue)
    Provisioning,
    /// Normal operation; the animation engine owns the lights
    Ready,
}

/// Result of applying one inbound command.
///
/// The network collaborator transmits `result` to `reply_to` before
/// accepting the next command.
#[derive(Debug, Clone)]
pub struct CommandOutcome<T> {
    pub reply_to: T,
    pub result: Result<Ack, CommandError>,
}

/// What one loop iteration produced.
#[derive(Debug, Clone)]
pub struct PollResult<T> {
    /// Outcome of the command drained this iteration, if any.
    pub outcome: Option<CommandOutcome<T>>,
    /// Deadline of the next animation tick; callers may sleep until it.
    pub next_deadline: Instant,
}

/// The cooperative main loop.
///
/// Owns the engine, the shared parameters, the output device and the
/// RNG; drains command requests from the mailbox. `T` is the opaque
/// reply destination carried through [`CommandOutcome`].
pub struct MainLoop<'a, D, R, T, const N: usize, const Q: usize> {
    engine: AnimationEngine<N>,
    params: AnimationParameters,
    device: D,
    rng: R,
    requests: CommandReceiver<'a, T, Q>,
    status: DeviceStatus,
    next_tick: Instant,
    blink_last: Instant,
    blink_on: bool,
}

impl<'a, D, R, T, const N: usize, const Q: usize> MainLoop<'a, D, R, T, N, Q>
where
    D: OutputDevice,
    R: RngCore,
{
    /// Create a main loop with the built-in default parameters.
    pub fn new(device: D, rng: R, requests: CommandReceiver<'a, T, Q>) -> Self {
        Self::with_parameters(AnimationParameters::default(), device, rng, requests)
    }

    /// Create a main loop with explicit startup parameters.
    pub fn with_parameters(
        params: AnimationParameters,
        device: D,
        mut rng: R,
        requests: CommandReceiver<'a, T, Q>,
    ) -> Self {
        let mut engine = AnimationEngine::new();
        engine.initialize(params.base_color, &mut rng);

        Self {
            engine,
            params,
            device,
            rng,
            requests,
            status: DeviceStatus::Boot,
            next_tick: Instant::from_millis(0),
            blink_last: Instant::from_millis(0),
            blink_on: false,
        }
    }

    /// Run one loop iteration. Never blocks.
    ///
    /// Ticks the animation when due; a tick consumed late does not
    /// accumulate debt, the next deadline is always `now + TICK_PERIOD`,
    /// so at most one tick fires per period no matter how often the
    /// loop revisits the check. Then drains at most one pending command;
    /// bursts are worked off one per iteration.
    pub fn poll(&mut self, now: Instant) -> PollResult<T> {
        if now >= self.next_tick {
            self.next_tick = now + TICK_PERIOD;
            self.run_tick(now);
        }

        let outcome = self.requests.receive().map(|request| {
            let result = command::process(&request.payload, &mut self.params);
            CommandOutcome {
                reply_to: request.reply_to,
                result,
            }
        });

        PollResult {
            outcome,
            next_deadline: self.next_tick,
        }
    }

    fn run_tick(&mut self, now: Instant) {
        match self.status {
            DeviceStatus::Boot => self.show_status(STATUS_BOOT_COLOR),
            DeviceStatus::LinkConnecting => self.show_status(STATUS_LINK_COLOR),
            DeviceStatus::Provisioning => {
                if now.duration_since(self.blink_last) > STATUS_BLINK_PERIOD {
                    self.blink_last = now;
                    self.blink_on = !self.blink_on;
                    let color = if self.blink_on {
                        STATUS_LINK_COLOR
                    } else {
                        STATUS_OFF
                    };
                    self.show_status(color);
                }
            }
            DeviceStatus::Ready => {
                self.engine
                    .tick(&self.params, &mut self.device, &mut self.rng);
            }
        }
    }

    fn show_status(&mut self, color: Rgb) {
        self.device.set_all(color);
        self.device.commit();
    }

    /// Move the device through its lifecycle states.
    pub fn set_status(&mut self, status: DeviceStatus) {
        self.status = status;
    }

    pub const fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Read access to the shared parameters (commands are the writer).
    pub const fn parameters(&self) -> &AnimationParameters {
        &self.params
    }

    pub const fn engine(&self) -> &AnimationEngine<N> {
        &self.engine
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}
