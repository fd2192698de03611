//! Fuzz target: circular log over an arbitrary medium
//!
//! Treats the fuzz input as the EEPROM contents and verifies:
//! - `recover` never panics and always lands on a slot boundary
//! - `scan` yields at most `MAX_RECORDS` records, none of them empty
//! - Appending after recovery writes exactly at the recovered cursor
//!
//! cargo fuzz run fuzz_log_scan

#![no_main]

use libfuzzer_sys::fuzz_target;
use trackwatch::app::ports::{EepromPort, StorageError};
use trackwatch::event_log::{CircularLog, LOG_REGION_BYTES, MAX_RECORDS};
use trackwatch::record::{ERASED_BYTE, LogRecord, RECORD_SIZE};
use trackwatch::sensors::SensorSample;

// ── In-memory EepromPort for fuzz testing ─────────────────────

struct Mem(Vec<u8>);

impl EepromPort for Mem {
    fn capacity(&self) -> usize {
        self.0.len()
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let src = self
            .0
            .get(address..address + buf.len())
            .ok_or(StorageError::OutOfBounds { address, len: buf.len() })?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError> {
        let dst = self
            .0
            .get_mut(address..address + data.len())
            .ok_or(StorageError::OutOfBounds { address, len: data.len() })?;
        dst.copy_from_slice(data);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut image = vec![ERASED_BYTE; LOG_REGION_BYTES];
    let n = data.len().min(LOG_REGION_BYTES);
    image[..n].copy_from_slice(&data[..n]);
    let mut mem = Mem(image);

    let mut log = CircularLog::recover(&mem);
    let cursor = log.write_address();
    assert!(cursor < LOG_REGION_BYTES);
    assert_eq!(cursor % RECORD_SIZE, 0);

    let count = log.scan(&mem).count();
    assert!(count <= MAX_RECORDS);

    let record = LogRecord::encode(7, &SensorSample::new(1.0, 2.0, 3.0, 4.0));
    let written = log.append(&mut mem, &record).expect("in-bounds write");
    assert_eq!(written, cursor);

    let mut slot = [0u8; RECORD_SIZE];
    mem.read(written, &mut slot).expect("in-bounds read");
    assert_eq!(LogRecord::decode(&slot), Some(record));
});
