#![no_std]

pub mod channel;
pub mod color;
pub mod command;
pub mod engine;
pub mod mainloop;
pub mod params;
pub mod settings;

pub use channel::{
    Channel, ChannelFull, CommandChannel, CommandReceiver, CommandRequest, CommandSender,
};
pub use command::{Ack, Command, CommandError, ColorPatch};
pub use engine::{AnimationEngine, BLEND_STEPS};
pub use mainloop::{CommandOutcome, DeviceStatus, MainLoop, PollResult, TICK_PERIOD};
pub use params::{AnimationMode, AnimationParameters};
pub use settings::{DeviceSettings, SettingsStore, StoreError};

pub use color::{Hsv, JitterRanges, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract addressable-light driver trait
///
/// Implement this trait to support different hardware platforms.
/// The animation engine is generic over this trait and never touches
/// hardware registers directly.
pub trait OutputDevice {
    /// Set every element to the same color
    fn set_all(&mut self, color: Rgb);

    /// Set a single element by index
    fn set_element(&mut self, index: usize, color: Rgb);

    /// Latch the staged colors to the device
    ///
    /// The engine calls this exactly once per tick, after all element
    /// colors have been staged. This is the device's atomic update
    /// boundary.
    fn commit(&mut self);
}
