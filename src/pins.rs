//! GPIO / peripheral pin assignments for the TrackWatch sensor board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors: analog (ADC1)
// ---------------------------------------------------------------------------

/// LDR voltage divider with a 10 kΩ fixed resistor, on GPIO 1.  The lux
/// fit in `sensors::light` carries its own reference voltage.
pub const ADC1_CH_LDR: u32 = 0;
/// NTC thermistor on the track surface probe (B = 3950, 10 kΩ @ 25 °C),
/// on GPIO 2.
pub const ADC1_CH_THERMISTOR: u32 = 1;

// ---------------------------------------------------------------------------
// Sensors: digital
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const DHT22_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

pub const LED_RED_GPIO: i32 = 8;
pub const LED_GREEN_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button: a press requests a log dump on the serial console.
pub const BUTTON_GPIO: i32 = 16;
