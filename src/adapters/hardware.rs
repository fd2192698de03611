//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the DHT22 driver, the indicator LEDs and a delay source, exposing
//! them through [`SensorPort`], [`IndicatorPort`] and [`DelayNs`].  This is
//! the only module in the system that touches the sensor hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use embedded_hal::delay::DelayNs;

use crate::adapters::time::{Esp32TimeAdapter, StdDelay};
use crate::app::ports::{Indicator, IndicatorPort, SensorPort};
use crate::drivers::dht22::Dht22;
use crate::drivers::hw_init;
use crate::drivers::indicator::IndicatorLeds;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<D: DelayNs = StdDelay> {
    dht: Dht22,
    leds: IndicatorLeds,
    uptime: Esp32TimeAdapter,
    delay: D,
}

impl HardwareAdapter<StdDelay> {
    pub fn new() -> Self {
        Self::with_delay(StdDelay)
    }
}

impl Default for HardwareAdapter<StdDelay> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DelayNs> HardwareAdapter<D> {
    pub fn with_delay(delay: D) -> Self {
        Self {
            dht: Dht22::new(pins::DHT22_GPIO),
            leds: IndicatorLeds::new(),
            uptime: Esp32TimeAdapter::default(),
            delay,
        }
    }

    pub fn lit_indicator(&self) -> Option<Indicator> {
        self.leds.lit()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<D: DelayNs> SensorPort for HardwareAdapter<D> {
    fn read_light_raw(&mut self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_LDR)
    }

    fn read_ambient_temperature(&mut self) -> Option<f32> {
        self.dht
            .read(self.uptime.uptime_ms())
            .map(|r| r.temperature_c)
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.dht
            .read(self.uptime.uptime_ms())
            .map(|r| r.humidity_pct)
    }

    fn read_track_raw(&mut self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_THERMISTOR)
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<D: DelayNs> IndicatorPort for HardwareAdapter<D> {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.leds.set(indicator);
    }
}

// ── Delay ─────────────────────────────────────────────────────

impl<D: DelayNs> DelayNs for HardwareAdapter<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
