//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, clock, indicators, event sinks, storage)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Blocking delays go through [`embedded_hal::delay::DelayNs`].

use crate::config::MonitorConfig;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one raw reading per channel per call.
pub trait SensorPort {
    /// Raw 10-bit LDR divider count.
    fn read_light_raw(&mut self) -> u16;

    /// Ambient temperature in °C, `None` when the read failed.
    fn read_ambient_temperature(&mut self) -> Option<f32>;

    /// Ambient relative humidity in %, `None` when the read failed.
    fn read_humidity(&mut self) -> Option<f32>;

    /// Raw 10-bit thermistor divider count.
    fn read_track_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for record timestamps.
pub trait ClockPort {
    /// Seconds since the Unix epoch, already shifted to local time.
    fn now(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LEDs)
// ───────────────────────────────────────────────────────────────

/// Which status LED is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Green: enough light on the track.
    Green,
    /// Red: track is too dark.
    Red,
}

pub trait IndicatorPort {
    /// Light exactly one indicator, turning the other off.
    fn set_indicator(&mut self, indicator: Indicator);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// character display, ...).  Fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan an event out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// EEPROM port (driven adapter: domain ↔ byte-addressable storage)
// ───────────────────────────────────────────────────────────────

/// Byte-addressable persistent storage.  Unwritten bytes read `0xFF`.
pub trait EepromPort {
    /// Total addressable bytes.
    fn capacity(&self) -> usize;

    /// Fill `buf` from `address`.
    fn read(&self, address: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` at `address`, persisting before returning.
    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], never clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] if nothing has been stored yet.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage (NVS on the device).
///
/// Keys are namespaced to prevent collisions between subsystems.  Writes
/// MUST be atomic; no partial writes on power loss.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] and [`EepromPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Access past the end of the medium.
    OutOfBounds { address: usize, len: usize },
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::OutOfBounds { address, len } => {
                write!(f, "access of {} bytes at {:#06x} out of bounds", len, address)
            }
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for StorageError {}
