//! LDR illuminance estimate.
//!
//! The LDR sits in a voltage divider with a fixed 10 kΩ resistor and is read
//! as a 10-bit value.  The raw count is inverted onto the divider scale,
//! turned into the LDR resistance, and mapped to lux with a power-law fit.
//! The fit constants are an empirical calibration for the fitted part; they
//! carry no physical derivation.

/// Full-scale count of the 10-bit conversion.
pub const ADC_FULL_SCALE: u16 = 1023;

/// Reference voltage of the calibration fit.  It belongs with the fit
/// constants below and is independent of the board's ADC rail.
const SUPPLY_V: f32 = 5.0;
const FIXED_R_OHMS: f32 = 10_000.0;
const LUX_EXPONENT: f32 = 1.25;
const LUX_SCALE: f32 = 100.0;

// Inversion window of the remap step (the usable range of the divider).
const REMAP_LOW: i32 = 8;
const REMAP_HIGH: i32 = 1015;

/// Integer linear re-scale with truncating division.
pub fn remap(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Convert one raw LDR count to lux.
///
/// Returns `None` when the divider voltage or the derived resistance is
/// exactly zero; those samples are left out of the luminosity average.
#[allow(clippy::float_cmp)]
pub fn raw_to_lux(raw: u16) -> Option<f32> {
    let raw = i32::from(raw.min(ADC_FULL_SCALE));
    let mapped = remap(raw, REMAP_LOW, REMAP_HIGH, REMAP_HIGH, REMAP_LOW);
    let v_out = mapped as f32 * (SUPPLY_V / f32::from(ADC_FULL_SCALE));
    if v_out == 0.0 {
        return None;
    }

    let r_ldr = FIXED_R_OHMS * (SUPPLY_V / v_out - 1.0);
    if r_ldr == 0.0 {
        return None;
    }

    Some((FIXED_R_OHMS / r_ldr).powf(LUX_EXPONENT) * LUX_SCALE)
}
