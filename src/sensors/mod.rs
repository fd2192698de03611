//! Sensor subsystem: raw-value conversions and the averaging front end.
//!
//! The [`SensorAverager`] pulls `sample_count` raw readings through the
//! [`SensorPort`], converts them, and produces one [`SensorSample`] per
//! cycle.  Invalid samples are dropped from the running sums but the
//! divisor stays fixed at `sample_count`, so a cycle with dropped samples
//! reports a proportionally lower mean.

pub mod ambient;
pub mod light;
pub mod thermistor;

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, SensorPort};
use crate::classify::Channel;
use crate::config::MonitorConfig;

/// Averaged readings for one acquisition cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSample {
    /// Illuminance estimate (lux).
    pub lux: f32,
    /// Ambient air temperature (°C).
    pub ambient_temp_c: f32,
    /// Ambient relative humidity (%RH).
    pub humidity_pct: f32,
    /// Track surface temperature (°C).
    pub track_temp_c: f32,
}

impl SensorSample {
    pub fn new(lux: f32, ambient_temp_c: f32, humidity_pct: f32, track_temp_c: f32) -> Self {
        Self {
            lux,
            ambient_temp_c,
            humidity_pct,
            track_temp_c,
        }
    }

    /// Value of a single channel.
    pub fn value(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Luminosity => self.lux,
            Channel::AmbientTemperature => self.ambient_temp_c,
            Channel::Humidity => self.humidity_pct,
            Channel::TrackTemperature => self.track_temp_c,
        }
    }
}

/// Multi-sample acquisition with per-channel validity filtering.
#[derive(Debug, Clone, Copy)]
pub struct SensorAverager {
    sample_count: u16,
    sample_interval_ms: u32,
}

impl SensorAverager {
    pub fn new(sample_count: u16, sample_interval_ms: u32) -> Self {
        Self {
            sample_count,
            sample_interval_ms,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.sample_count, config.sample_interval_ms)
    }

    pub fn sample_count(&self) -> u16 {
        self.sample_count
    }

    /// Take `sample_count` readings and return the per-channel means.
    ///
    /// Blocks for `sample_count × sample_interval_ms` in total; the delay
    /// follows every reading, including the last one.
    pub fn acquire(
        &self,
        hw: &mut (impl SensorPort + DelayNs),
        sink: &mut impl EventSink,
    ) -> SensorSample {
        let mut sums = SensorSample::default();

        for _ in 0..self.sample_count {
            if let Some(lux) = light::raw_to_lux(hw.read_light_raw()) {
                sums.lux += lux;
            }

            match hw.read_ambient_temperature() {
                Some(t) => sums.ambient_temp_c += t,
                None => {
                    warn!("SENSOR | ambient temperature read failed");
                    sink.emit(&AppEvent::ReadFailed(Channel::AmbientTemperature));
                }
            }

            match hw.read_humidity() {
                Some(h) => sums.humidity_pct += h,
                None => {
                    warn!("SENSOR | humidity read failed");
                    sink.emit(&AppEvent::ReadFailed(Channel::Humidity));
                }
            }

            sums.track_temp_c += thermistor::raw_to_celsius(hw.read_track_raw());

            hw.delay_ms(self.sample_interval_ms);
        }

        // Zero iterations leave every sum at 0.0; dividing by 1 keeps it there.
        let n = f32::from(self.sample_count.max(1));
        SensorSample {
            lux: sums.lux / n,
            ambient_temp_c: sums.ambient_temp_c / n,
            humidity_pct: sums.humidity_pct / n,
            track_temp_c: sums.track_temp_c / n,
        }
    }
}
