//! Fuzz target: log record codec
//!
//! Feeds arbitrary 16-byte slots to `LogRecord::decode` and verifies:
//! - No panics on any input
//! - An all-ones timestamp always decodes as empty
//! - Any decoded record re-encodes to the same first 12 bytes
//!
//! cargo fuzz run fuzz_record_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use trackwatch::record::{EMPTY_TIMESTAMP, LogRecord, RECORD_SIZE};

fuzz_target!(|data: &[u8]| {
    let Some(slot) = data.get(..RECORD_SIZE) else {
        return;
    };
    let mut bytes = [0u8; RECORD_SIZE];
    bytes.copy_from_slice(slot);

    match LogRecord::decode(&bytes) {
        None => assert_eq!(
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            EMPTY_TIMESTAMP
        ),
        Some(record) => {
            assert_ne!(record.timestamp, EMPTY_TIMESTAMP);
            assert_eq!(record.to_bytes()[..12], bytes[..12]);
        }
    }
});
