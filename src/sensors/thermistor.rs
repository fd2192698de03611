//! NTC thermistor track-surface probe (B = 3950, 25 °C reference).
//!
//! Simplified Beta (Steinhart-Hart) equation applied directly to the
//! 10-bit divider count.  Degenerate counts (0 or full scale) come out at
//! absolute zero; the averager sums them like any other sample.

use super::light::ADC_FULL_SCALE;

const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const KELVIN_OFFSET: f32 = 273.15;

/// Convert one raw thermistor count to degrees Celsius.
pub fn raw_to_celsius(raw: u16) -> f32 {
    let raw = f32::from(raw.min(ADC_FULL_SCALE));
    let ratio = f32::from(ADC_FULL_SCALE) / raw - 1.0;
    let kelvin = 1.0 / ((1.0 / ratio).ln() / BETA + 1.0 / T25_K);
    kelvin - KELVIN_OFFSET
}
