//! Mock adapters for integration tests.
//!
//! Sensors replay scripted raw values, the clock is settable, the EEPROM
//! is a plain byte vector, and the sink records every emitted event so
//! tests can assert on the full history without touching real hardware.

use embedded_hal::delay::DelayNs;
use trackwatch::app::events::AppEvent;
use trackwatch::app::ports::{
    ClockPort, EepromPort, EventSink, Indicator, IndicatorPort, SensorPort, StorageError,
};
use trackwatch::record::ERASED_BYTE;

// ── MockSensors ───────────────────────────────────────────────

/// Steady readings with an optional per-read failure pattern for the
/// ambient channels.  The read index advances on every delay, matching
/// the averager's read-then-wait rhythm.
pub struct MockSensors {
    pub light_raw: u16,
    pub ambient: f32,
    pub humidity: f32,
    pub track_raw: u16,
    /// Read indices (counted across cycles) whose ambient read fails.
    pub ambient_failures: Vec<usize>,
    pub index: usize,
    pub delays_ms: Vec<u32>,
    pub indicators: Vec<Indicator>,
}

#[allow(dead_code)]
impl MockSensors {
    pub fn new(light_raw: u16, ambient: f32, humidity: f32, track_raw: u16) -> Self {
        Self {
            light_raw,
            ambient,
            humidity,
            track_raw,
            ambient_failures: Vec::new(),
            index: 0,
            delays_ms: Vec::new(),
            indicators: Vec::new(),
        }
    }

    /// Every channel inside its band: ~25 500 lux, 20 °C, 50 %, ~25 °C.
    pub fn ideal() -> Self {
        Self::new(12, 20.0, 50.0, 512)
    }

    /// Bright and comfortable, except the track is too dark.
    pub fn dim() -> Self {
        Self::new(600, 20.0, 50.0, 512)
    }

    pub fn last_indicator(&self) -> Option<Indicator> {
        self.indicators.last().copied()
    }
}

impl SensorPort for MockSensors {
    fn read_light_raw(&mut self) -> u16 {
        self.light_raw
    }

    fn read_ambient_temperature(&mut self) -> Option<f32> {
        if self.ambient_failures.contains(&self.index) {
            None
        } else {
            Some(self.ambient)
        }
    }

    fn read_humidity(&mut self) -> Option<f32> {
        Some(self.humidity)
    }

    fn read_track_raw(&mut self) -> u16 {
        self.track_raw
    }
}

impl IndicatorPort for MockSensors {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicators.push(indicator);
    }
}

impl DelayNs for MockSensors {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.index += 1;
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock(pub std::cell::Cell<u32>);

#[allow(dead_code)]
impl MockClock {
    pub fn at(secs: u32) -> Self {
        Self(std::cell::Cell::new(secs))
    }

    pub fn advance(&self, secs: u32) {
        self.0.set(self.0.get() + secs);
    }
}

impl ClockPort for MockClock {
    fn now(&self) -> u32 {
        self.0.get()
    }
}

// ── MemEeprom ─────────────────────────────────────────────────

pub struct MemEeprom {
    pub bytes: Vec<u8>,
    pub writes: usize,
}

#[allow(dead_code)]
impl MemEeprom {
    pub fn erased(len: usize) -> Self {
        Self {
            bytes: vec![ERASED_BYTE; len],
            writes: 0,
        }
    }
}

impl EepromPort for MemEeprom {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let end = address + buf.len();
        if end > self.bytes.len() {
            return Err(StorageError::OutOfBounds {
                address,
                len: buf.len(),
            });
        }
        buf.copy_from_slice(&self.bytes[address..end]);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = address + data.len();
        if end > self.bytes.len() {
            return Err(StorageError::OutOfBounds {
                address,
                len: data.len(),
            });
        }
        self.bytes[address..end].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
