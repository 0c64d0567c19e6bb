//! Device identity settings and the persistence contract.
//!
//! The store is consulted at startup and after identity-affecting
//! configuration changes only, never on the tick/command hot path. A
//! missing or corrupt backing store must not fail the boot: loading
//! falls back to defaults field by field.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum length of the device name.
pub const MAX_NAME_LEN: usize = 32;

/// Capacity of an encoded settings document.
pub const SETTINGS_DOC_CAP: usize = 64;

const DEFAULT_NAME: &str = "firelamp";

/// Persistence failures surfaced to the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store is not available for writing
    Unavailable,
    /// The settings document could not be encoded
    Codec,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "settings store unavailable"),
            StoreError::Codec => write!(f, "settings document could not be encoded"),
        }
    }
}

/// Human-readable device identity, advertised on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    pub name: String<MAX_NAME_LEN>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        let mut name = String::new();
        // DEFAULT_NAME is shorter than MAX_NAME_LEN
        let _ = name.push_str(DEFAULT_NAME);
        Self { name }
    }
}

#[derive(Serialize)]
struct SettingsDoc<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct SettingsDocRef<'a> {
    #[serde(borrow)]
    name: Option<&'a str>,
}

impl DeviceSettings {
    /// Encode to the on-flash JSON document (`{"name": …}`).
    pub fn to_json(&self) -> Result<Vec<u8, SETTINGS_DOC_CAP>, StoreError> {
        let doc = SettingsDoc {
            name: self.name.as_str(),
        };
        let mut buf = [0u8; SETTINGS_DOC_CAP];
        let len = serde_json_core::to_slice(&doc, &mut buf).map_err(|_| StoreError::Codec)?;
        Vec::from_slice(&buf[..len]).map_err(|_| StoreError::Codec)
    }

    /// Decode a settings document, falling back to defaults.
    ///
    /// Corrupt bytes, a missing field, an empty name or one longer than
    /// [`MAX_NAME_LEN`] all yield the default for that field.
    pub fn from_json(bytes: &[u8]) -> Self {
        let mut settings = Self::default();

        match serde_json_core::from_slice::<SettingsDocRef<'_>>(bytes) {
            Ok((doc, _)) => {
                if let Some(name) = doc.name {
                    if !name.is_empty() {
                        let mut parsed = String::new();
                        if parsed.push_str(name).is_ok() {
                            settings.name = parsed;
                        }
                    }
                }
            }
            Err(_) => {
                #[cfg(feature = "esp32-log")]
                println!("[settings] document unreadable, using defaults");
            }
        }

        settings
    }
}

/// Load/save contract for the settings collaborator.
pub trait SettingsStore {
    /// Load the persisted settings, or defaults when absent or corrupt.
    fn load(&mut self) -> DeviceSettings;

    /// Persist the settings.
    fn save(&mut self, settings: &DeviceSettings) -> Result<(), StoreError>;
}
