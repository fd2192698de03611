//! EEPROM emulation on top of key/blob storage.
//!
//! The ESP32 has no byte-addressable EEPROM, so the log region is kept as a
//! RAM image mirrored into a single NVS blob.  The image is loaded once at
//! boot (missing blob = erased medium) and every write is committed before
//! it returns, so a record survives power loss as soon as
//! [`EepromPort::write`] succeeds.

use log::{info, warn};

use crate::app::ports::{EepromPort, StorageError, StoragePort};
use crate::event_log::LOG_REGION_BYTES;
use crate::record::ERASED_BYTE;

const EEPROM_NAMESPACE: &str = "eventlog";
const EEPROM_KEY: &str = "image";

pub struct EepromAdapter<S: StoragePort> {
    storage: S,
    image: Vec<u8>,
}

impl<S: StoragePort> EepromAdapter<S> {
    /// Emulated medium of [`LOG_REGION_BYTES`].
    pub fn open(storage: S) -> Result<Self, StorageError> {
        Self::with_capacity(storage, LOG_REGION_BYTES)
    }

    pub fn with_capacity(storage: S, capacity: usize) -> Result<Self, StorageError> {
        let mut image = vec![ERASED_BYTE; capacity];
        match storage.read(EEPROM_NAMESPACE, EEPROM_KEY, &mut image) {
            Ok(len) if len == capacity => info!("EEPROM | image loaded ({} bytes)", len),
            Ok(len) => {
                // Size changed between firmware versions; keep the common prefix.
                warn!("EEPROM | stored image is {} bytes, expected {}", len, capacity);
                image[len..].fill(ERASED_BYTE);
            }
            Err(StorageError::NotFound) => info!("EEPROM | no image, starting erased"),
            Err(e) => return Err(e),
        }
        Ok(Self { storage, image })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Overwrite the whole medium with `0xFF` and persist it.
    pub fn erase(&mut self) -> Result<(), StorageError> {
        self.image.fill(ERASED_BYTE);
        self.storage.write(EEPROM_NAMESPACE, EEPROM_KEY, &self.image)
    }

    fn check_bounds(
        &self,
        address: usize,
        len: usize,
    ) -> Result<core::ops::Range<usize>, StorageError> {
        match address.checked_add(len) {
            Some(end) if end <= self.image.len() => Ok(address..end),
            _ => Err(StorageError::OutOfBounds { address, len }),
        }
    }
}

impl<S: StoragePort> EepromPort for EepromAdapter<S> {
    fn capacity(&self) -> usize {
        self.image.len()
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = self.check_bounds(address, buf.len())?;
        buf.copy_from_slice(&self.image[range]);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = self.check_bounds(address, data.len())?;
        let previous = self.image[range.clone()].to_vec();
        self.image[range.clone()].copy_from_slice(data);

        if let Err(e) = self.storage.write(EEPROM_NAMESPACE, EEPROM_KEY, &self.image) {
            self.image[range].copy_from_slice(&previous);
            return Err(e);
        }
        Ok(())
    }
}
