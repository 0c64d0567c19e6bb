//! Command parsing and application.
//!
//! Converts raw control-channel bytes into a validated [`Command`] and
//! applies it to the shared [`AnimationParameters`]. This module performs
//! no I/O, which keeps it testable without a network stack.
//!
//! Payload shape: `{"mode": "static"|"flame", "color": {"r": 0-255,
//! "g": 0-255, "b": 0-255}}`, every field optional. Absent fields leave
//! the corresponding parameter unchanged.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use serde::Deserialize;

use crate::params::{AnimationMode, AnimationParameters};

/// Positive acknowledgement for an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;

impl Ack {
    /// Reply text the control channel sends back.
    pub const fn as_str(self) -> &'static str {
        "OK"
    }
}

/// Command rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The payload is not a well-formed message. The shared parameters
    /// are left completely untouched.
    InvalidFormat,
}

impl CommandError {
    /// Negative acknowledgement text for the control channel.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidFormat => "Invalid JSON",
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel color overwrite; absent channels keep their prior value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPatch {
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
}

/// A validated, ephemeral request to change mode and/or base color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Command {
    pub mode: Option<AnimationMode>,
    pub color: Option<ColorPatch>,
}

#[derive(Deserialize)]
struct CommandDoc<'a> {
    #[serde(borrow)]
    mode: Option<&'a str>,
    color: Option<ColorDoc>,
}

#[derive(Deserialize)]
struct ColorDoc {
    r: Option<u8>,
    g: Option<u8>,
    b: Option<u8>,
}

impl Command {
    /// Parse raw message bytes into a command.
    ///
    /// An unrecognized mode name is treated as absent rather than as an
    /// error; tolerant decoding is the deliberate policy here, strict
    /// validation is not.
    pub fn parse(bytes: &[u8]) -> Result<Self, CommandError> {
        let (doc, _) = serde_json_core::from_slice::<CommandDoc<'_>>(bytes)
            .map_err(|_| CommandError::InvalidFormat)?;

        Ok(Self {
            mode: doc.mode.and_then(AnimationMode::parse_from_str),
            color: doc.color.map(|c| ColorPatch {
                r: c.r,
                g: c.g,
                b: c.b,
            }),
        })
    }

    /// Apply every present field to the shared parameters as one update.
    pub fn apply(&self, params: &mut AnimationParameters) {
        if let Some(mode) = self.mode {
            params.mode = mode;
        }
        if let Some(patch) = self.color {
            if let Some(r) = patch.r {
                params.base_color.r = r;
            }
            if let Some(g) = patch.g {
                params.base_color.g = g;
            }
            if let Some(b) = patch.b {
                params.base_color.b = b;
            }
        }
    }
}

/// Parse and apply a raw command payload.
///
/// On a parse failure the parameters are left untouched and the negative
/// acknowledgement is returned for the control channel to transmit.
pub fn process(bytes: &[u8], params: &mut AnimationParameters) -> Result<Ack, CommandError> {
    let command = match Command::parse(bytes) {
        Ok(command) => command,
        Err(err) => {
            #[cfg(feature = "esp32-log")]
            println!("[command] rejected: {}", err.as_str());
            return Err(err);
        }
    };

    command.apply(params);

    #[cfg(feature = "esp32-log")]
    println!(
        "[command] mode={} color=({}, {}, {})",
        params.mode.as_str(),
        params.base_color.r,
        params.base_color.g,
        params.base_color.b,
    );

    Ok(Ack)
}
