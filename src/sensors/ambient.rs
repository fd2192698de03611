//! DHT22 (AM2302) ambient temperature / humidity frame decoding.
//!
//! The sensor answers a start pulse with a 40-bit frame:
//!
//! ```text
//!  byte 0-1  humidity × 10        (big-endian)
//!  byte 2-3  temperature × 10     (bit 15 = sign)
//!  byte 4    checksum = low byte of the sum of bytes 0-3
//! ```
//!
//! Bus timing lives in [`crate::drivers::dht22`]; this module only turns a
//! captured frame into engineering units.

/// One decoded ambient reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Decode a raw frame.  Returns `None` on checksum mismatch.
pub fn decode_frame(frame: [u8; 5]) -> Option<AmbientReading> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return None;
    }

    let humidity = u16::from_be_bytes([frame[0], frame[1]]);
    let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let mut temperature_c = f32::from(magnitude) / 10.0;
    if frame[2] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    Some(AmbientReading {
        temperature_c,
        humidity_pct: f32::from(humidity) / 10.0,
    })
}

/// Build a frame from engineering values (simulation and tests).
pub fn encode_frame(temperature_c: f32, humidity_pct: f32) -> [u8; 5] {
    let h = (humidity_pct * 10.0) as u16;
    let t = (temperature_c.abs() * 10.0) as u16 & 0x7FFF;
    let [h_hi, h_lo] = h.to_be_bytes();
    let [mut t_hi, t_lo] = t.to_be_bytes();
    if temperature_c < 0.0 {
        t_hi |= 0x80;
    }
    let sum = h_hi
        .wrapping_add(h_lo)
        .wrapping_add(t_hi)
        .wrapping_add(t_lo);
    [h_hi, h_lo, t_hi, t_lo, sum]
}
