//! Circular out-of-range event log on byte-addressable storage.
//!
//! The log occupies `[0, LOG_REGION_BYTES)` as [`MAX_RECORDS`] fixed
//! [`RECORD_SIZE`]-byte slots.  A write cursor walks the slots and wraps to
//! zero, silently overwriting the oldest entry once the region is full.
//!
//! The cursor lives only in RAM.  [`CursorMode::Fresh`] restarts it at zero
//! on every boot, so a reboot overwrites from the front regardless of where
//! the previous session stopped.  [`CursorMode::Recover`] instead resumes
//! after the slot holding the newest timestamp.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{EepromPort, StorageError};
use crate::record::{LogRecord, RECORD_SIZE};

/// Number of record slots.
pub const MAX_RECORDS: usize = 100;

/// Bytes reserved for the log, starting at address 0.
pub const LOG_REGION_BYTES: usize = MAX_RECORDS * RECORD_SIZE;

/// How the write cursor is initialised at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    /// Start at address 0.
    #[default]
    Fresh,
    /// Resume after the newest stored record.
    ///
    /// Relies on timestamps growing across boots.  An unsynced clock can
    /// store several records with the same (clamped) timestamp; the later
    /// slot wins such ties, which stays correct until the log wraps.
    Recover,
}

/// Write cursor over the log region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularLog {
    write_address: usize,
}

impl CircularLog {
    /// Cursor at address 0.
    pub const fn fresh() -> Self {
        Self { write_address: 0 }
    }

    /// Cursor on the slot after the newest timestamp, or 0 on an empty log.
    pub fn recover(storage: &(impl EepromPort + ?Sized)) -> Self {
        let newest = Slots::new(storage)
            .filter_map(|(address, record)| record.map(|r| (address, r.timestamp)))
            .fold(None, |best: Option<(usize, u32)>, (address, ts)| match best {
                Some((_, best_ts)) if best_ts > ts => best,
                _ => Some((address, ts)),
            });

        let write_address = match newest {
            Some((address, ts)) => {
                let next = (address + RECORD_SIZE) % LOG_REGION_BYTES;
                info!("EVLOG | recovered cursor {:#06x} (newest ts={})", next, ts);
                next
            }
            None => {
                info!("EVLOG | log empty, cursor at 0");
                0
            }
        };
        Self { write_address }
    }

    pub fn open(mode: CursorMode, storage: &(impl EepromPort + ?Sized)) -> Self {
        match mode {
            CursorMode::Fresh => Self::fresh(),
            CursorMode::Recover => Self::recover(storage),
        }
    }

    /// Address the next record will be written to.
    pub fn write_address(&self) -> usize {
        self.write_address
    }

    /// Write `record` at the cursor and advance, wrapping at the end of the
    /// region.  Returns the address written.  On error the cursor stays put.
    pub fn append(
        &mut self,
        storage: &mut (impl EepromPort + ?Sized),
        record: &LogRecord,
    ) -> Result<usize, StorageError> {
        let address = self.write_address;
        storage.write(address, &record.to_bytes())?;

        self.write_address += RECORD_SIZE;
        if self.write_address >= LOG_REGION_BYTES {
            self.write_address = 0;
        }
        Ok(address)
    }

    /// Every stored record in slot order (not chronological).
    pub fn scan<'a, S: EepromPort + ?Sized>(&self, storage: &'a S) -> LogScan<'a, S> {
        LogScan {
            slots: Slots::new(storage),
        }
    }
}

impl Default for CircularLog {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Lazy iterator over the non-empty slots of the log.
pub struct LogScan<'a, S: ?Sized> {
    slots: Slots<'a, S>,
}

impl<S: EepromPort + ?Sized> Iterator for LogScan<'_, S> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        self.slots.by_ref().find_map(|(_, record)| record)
    }
}

/// Every slot with its address; `None` for empty slots.
struct Slots<'a, S: ?Sized> {
    storage: &'a S,
    address: usize,
}

impl<'a, S: ?Sized> Slots<'a, S> {
    fn new(storage: &'a S) -> Self {
        Self {
            storage,
            address: 0,
        }
    }
}

impl<S: EepromPort + ?Sized> Iterator for Slots<'_, S> {
    type Item = (usize, Option<LogRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.address >= LOG_REGION_BYTES {
            return None;
        }
        let address = self.address;
        let mut buf = [0u8; RECORD_SIZE];
        if let Err(e) = self.storage.read(address, &mut buf) {
            warn!("EVLOG | read at {:#06x} failed: {}, stopping scan", address, e);
            self.address = LOG_REGION_BYTES;
            return None;
        }
        self.address += RECORD_SIZE;
        Some((address, LogRecord::decode(&buf)))
    }
}
