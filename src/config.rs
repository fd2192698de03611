//! Runtime configuration for the track monitor.
//!
//! Read once at boot through [`ConfigPort`]; changes take effect on the
//! next boot.  Classification thresholds are fixed (see [`crate::classify`])
//! and not part of this struct.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::event_log::CursorMode;

/// Upper bound on readings per averaging cycle.
pub const MAX_SAMPLE_COUNT: u16 = 100;

/// Core monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Acquisition ---
    /// Readings per averaging cycle (also the averaging divisor).
    pub sample_count: u16,
    /// Delay after each reading (milliseconds).
    pub sample_interval_ms: u32,

    // --- Presentation ---
    /// Dwell per display page (milliseconds).
    pub display_dwell_ms: u32,
    /// Mirror status lines and alerts to the serial log.
    pub serial_enabled: bool,

    // --- Clock ---
    /// Offset applied to UTC for record timestamps (hours).
    pub utc_offset_hours: i8,

    // --- Event log ---
    /// How the log write cursor starts after boot.
    pub cursor_mode: CursorMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_count: 10,
            sample_interval_ms: 200,
            display_dwell_ms: 2000,
            serial_enabled: true,
            utc_offset_hours: -3,
            cursor_mode: CursorMode::Fresh,
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SAMPLE_COUNT).contains(&self.sample_count) {
            return Err(ConfigError::ValidationFailed("sample_count must be 1–100"));
        }
        if self.sample_interval_ms > 10_000 {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be 0–10000",
            ));
        }
        if self.display_dwell_ms > 60_000 {
            return Err(ConfigError::ValidationFailed(
                "display_dwell_ms must be 0–60000",
            ));
        }
        if !(-14..=14).contains(&self.utc_offset_hours) {
            return Err(ConfigError::ValidationFailed(
                "utc_offset_hours must be -14–14",
            ));
        }
        Ok(())
    }

    /// UTC offset in seconds.
    pub fn utc_offset_secs(&self) -> i32 {
        i32::from(self.utc_offset_hours) * 3600
    }
}

/// Boot-time config: the stored one, or defaults.  On first boot the
/// defaults are written back so the blob exists for later editing; a
/// stored config that cannot be read is left in place.
pub fn load_or_init(port: &impl ConfigPort) -> MonitorConfig {
    match port.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            let cfg = MonitorConfig::default();
            match port.save(&cfg) {
                Ok(()) => info!("CONFIG | first boot, defaults stored"),
                Err(e) => warn!("CONFIG | could not store defaults: {}", e),
            }
            cfg
        }
        Err(e) => {
            warn!("CONFIG | load failed ({}), using defaults", e);
            MonitorConfig::default()
        }
    }
}
