//! ESP32 time adapter.
//!
//! Provides wall-clock timestamps for the event log and monotonic uptime
//! for driver pacing.
//!
//! - **`target_os = "espidf"`**: uptime wraps `esp_timer_get_time()`;
//!   wall-clock time comes from the system RTC through `std::time`.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.

use std::time::{SystemTime, UNIX_EPOCH};

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::ClockPort;
use crate::record::EMPTY_TIMESTAMP;

/// Time adapter for the ESP32-S3 platform.
pub struct Esp32TimeAdapter {
    utc_offset_secs: i64,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Esp32TimeAdapter {
    pub fn new(utc_offset_secs: i32) -> Self {
        Self {
            utc_offset_secs: i64::from(utc_offset_secs),
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot (monotonic, wraps at `u32::MAX`).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u32 {
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000) as u32
    }

    /// Milliseconds since boot (monotonic, wraps at `u32::MAX`).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    /// Local-time seconds for a UTC Unix time.  Never returns the
    /// empty-slot timestamp.
    ///
    /// Without an RTC or SNTP sync the system clock restarts near the
    /// epoch, and a negative offset pushes local time below zero for the
    /// first hours after boot.  Such values clamp to 0 with a warning.
    pub fn local_secs(&self, utc_secs: i64) -> u32 {
        let local = utc_secs + self.utc_offset_secs;
        in_record_range(local).unwrap_or_else(|| {
            warn!("CLOCK | local time {} outside record range, clamped", local);
            local.clamp(0, i64::from(EMPTY_TIMESTAMP - 1)) as u32
        })
    }
}

/// `Some` when `local` fits a record timestamp as is.
fn in_record_range(local: i64) -> Option<u32> {
    u32::try_from(local).ok().filter(|t| *t != EMPTY_TIMESTAMP)
}

impl ClockPort for Esp32TimeAdapter {
    fn now(&self) -> u32 {
        let utc = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(_) => {
                warn!("CLOCK | system time before epoch");
                0
            }
        };
        self.local_secs(utc)
    }
}

/// Blocking delay backed by the std sleep (FreeRTOS `vTaskDelay` on ESP-IDF).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
