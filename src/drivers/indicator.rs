//! Red / green status LED pair.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives two plain GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;
use crate::pins;

pub struct IndicatorLeds {
    lit: Option<Indicator>,
}

impl IndicatorLeds {
    pub fn new() -> Self {
        Self { lit: None }
    }

    /// Light one LED and turn the other off.
    pub fn set(&mut self, indicator: Indicator) {
        hw_init::gpio_write(pins::LED_RED_GPIO, indicator == Indicator::Red);
        hw_init::gpio_write(pins::LED_GREEN_GPIO, indicator == Indicator::Green);
        self.lit = Some(indicator);
    }

    pub fn off(&mut self) {
        hw_init::gpio_write(pins::LED_RED_GPIO, false);
        hw_init::gpio_write(pins::LED_GREEN_GPIO, false);
        self.lit = None;
    }

    /// Currently lit LED, `None` when both are off.
    pub fn lit(&self) -> Option<Indicator> {
        self.lit
    }
}

impl Default for IndicatorLeds {
    fn default() -> Self {
        Self::new()
    }
}
