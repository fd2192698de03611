//! DHT22 single-wire bus driver.
//!
//! The sensor needs at least two seconds between conversions, so a reading
//! is cached and served again to any caller inside that window.  Temperature
//! and humidity therefore come from the same frame within one sample.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain data line with busy-wait timing.
//! On host/test: replays the frame set with [`sim_set_frame`].

use log::warn;

use crate::sensors::ambient::{decode_frame, AmbientReading};

/// Minimum spacing between bus transactions.
pub const MIN_INTERVAL_MS: u32 = 2000;

pub struct Dht22 {
    gpio: i32,
    cached: Option<AmbientReading>,
    last_read_ms: u32,
}

impl Dht22 {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            cached: None,
            last_read_ms: 0,
        }
    }

    /// Latest reading, fetching a new frame once the cache has aged out.
    /// Failed reads are not cached.
    pub fn read(&mut self, now_ms: u32) -> Option<AmbientReading> {
        if let Some(r) = self.cached {
            if now_ms.wrapping_sub(self.last_read_ms) < MIN_INTERVAL_MS {
                return Some(r);
            }
        }

        let reading = match capture_frame(self.gpio) {
            Some(frame) => decode_frame(frame).or_else(|| {
                warn!("DHT22 | checksum mismatch {:02x?}", frame);
                None
            }),
            None => {
                warn!("DHT22 | no response on GPIO {}", self.gpio);
                None
            }
        };

        self.cached = reading;
        self.last_read_ms = now_ms;
        reading
    }
}

// ── Bus capture ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn capture_frame(gpio: i32) -> Option<[u8; 5]> {
    use esp_idf_svc::sys::{esp_rom_delay_us, gpio_set_level};

    // Start signal: hold the line low for >1 ms, then release.
    // SAFETY: the pin was configured open-drain in hw_init; main loop only.
    unsafe {
        gpio_set_level(gpio, 0);
        esp_rom_delay_us(1_200);
        gpio_set_level(gpio, 1);
    }

    // Response: ~80 µs low, ~80 µs high, then the first bit preamble.
    wait_for_level(gpio, false, 100)?;
    wait_for_level(gpio, true, 100)?;
    wait_for_level(gpio, false, 100)?;

    let mut frame = [0u8; 5];
    for bit in 0..40 {
        // 50 µs low preamble, then 26–28 µs high for a 0 or 70 µs for a 1.
        wait_for_level(gpio, true, 80)?;
        let high_us = wait_for_level(gpio, false, 100)?;
        if high_us > 40 {
            frame[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
    Some(frame)
}

/// Busy-wait until the line reads `level`.  Returns the microseconds waited.
#[cfg(target_os = "espidf")]
fn wait_for_level(gpio: i32, level: bool, timeout_us: u32) -> Option<u32> {
    use esp_idf_svc::sys::{esp_timer_get_time, gpio_get_level};

    // SAFETY: timer and register reads only.
    let start = unsafe { esp_timer_get_time() };
    loop {
        let elapsed = (unsafe { esp_timer_get_time() } - start) as u32;
        if (unsafe { gpio_get_level(gpio) } != 0) == level {
            return Some(elapsed);
        }
        if elapsed > timeout_us {
            return None;
        }
    }
}

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

/// Frame bytes packed big-endian into the low 40 bits; all ones means
/// the sensor does not answer.
#[cfg(not(target_os = "espidf"))]
static SIM_FRAME: AtomicU64 = AtomicU64::new(0x01_F4_00_DC_D1); // 50.0 %RH, 22.0 °C

#[cfg(not(target_os = "espidf"))]
const SIM_NO_RESPONSE: u64 = u64::MAX;

/// Set the frame the simulated sensor answers with (`None` = silent bus).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_frame(frame: Option<[u8; 5]>) {
    let packed = frame.map_or(SIM_NO_RESPONSE, |f| {
        f.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    });
    SIM_FRAME.store(packed, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
fn capture_frame(_gpio: i32) -> Option<[u8; 5]> {
    let packed = SIM_FRAME.load(Ordering::Relaxed);
    if packed == SIM_NO_RESPONSE {
        return None;
    }
    let b = packed.to_be_bytes();
    Some([b[3], b[4], b[5], b[6], b[7]])
}
