//! Fixed-width binary log record.
//!
//! Layout (16 bytes, little-endian):
//!
//! ```text
//!  0       4     6         8          10         12        16
//!  ├───────┼─────┼─────────┼──────────┼──────────┼─────────┤
//!  │ ts u32│ lux │ amb×100 │ hum×100  │ trk×100  │ reserved│
//!  └───────┴─────┴─────────┴──────────┴──────────┴─────────┘
//! ```
//!
//! Scaled fields are truncated toward zero, not rounded, so stored values
//! read back at most 0.01 closer to zero than the measurement.  A slot
//! whose timestamp is all ones is unwritten.

use crate::sensors::SensorSample;

/// Size of one record slot in bytes.
pub const RECORD_SIZE: usize = 16;

/// Value of a byte on erased storage.
pub const ERASED_BYTE: u8 = 0xFF;

/// Timestamp pattern marking an empty slot.
pub const EMPTY_TIMESTAMP: u32 = u32::MAX;

const SCALE: f32 = 100.0;

/// One persisted out-of-range event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    /// Seconds since epoch, local time.
    pub timestamp: u32,
    pub lux: i16,
    pub ambient_temp_centi: i16,
    pub humidity_centi: i16,
    pub track_temp_centi: i16,
}

impl LogRecord {
    /// Scale a sample into a record.  Values beyond the `i16` range
    /// saturate; NaN stores as zero.
    pub fn encode(timestamp: u32, sample: &SensorSample) -> Self {
        Self {
            timestamp,
            lux: sample.lux as i16,
            ambient_temp_centi: centi(sample.ambient_temp_c),
            humidity_centi: centi(sample.humidity_pct),
            track_temp_centi: centi(sample.track_temp_c),
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [ERASED_BYTE; RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[4..6].copy_from_slice(&self.lux.to_le_bytes());
        buf[6..8].copy_from_slice(&self.ambient_temp_centi.to_le_bytes());
        buf[8..10].copy_from_slice(&self.humidity_centi.to_le_bytes());
        buf[10..12].copy_from_slice(&self.track_temp_centi.to_le_bytes());
        buf
    }

    /// Parse a slot.  `None` means the slot is empty.
    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Option<Self> {
        let timestamp = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if timestamp == EMPTY_TIMESTAMP {
            return None;
        }
        Some(Self {
            timestamp,
            lux: i16::from_le_bytes([bytes[4], bytes[5]]),
            ambient_temp_centi: i16::from_le_bytes([bytes[6], bytes[7]]),
            humidity_centi: i16::from_le_bytes([bytes[8], bytes[9]]),
            track_temp_centi: i16::from_le_bytes([bytes[10], bytes[11]]),
        })
    }

    pub fn lux(&self) -> f32 {
        f32::from(self.lux)
    }

    pub fn ambient_temp_c(&self) -> f32 {
        f32::from(self.ambient_temp_centi) / SCALE
    }

    pub fn humidity_pct(&self) -> f32 {
        f32::from(self.humidity_centi) / SCALE
    }

    pub fn track_temp_c(&self) -> f32 {
        f32::from(self.track_temp_centi) / SCALE
    }

    /// The stored values as a sample (lux as a whole number).
    pub fn sample(&self) -> SensorSample {
        SensorSample::new(
            self.lux(),
            self.ambient_temp_c(),
            self.humidity_pct(),
            self.track_temp_c(),
        )
    }
}

fn centi(value: f32) -> i16 {
    (value * SCALE) as i16
}
