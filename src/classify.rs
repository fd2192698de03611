//! Threshold classification of averaged readings.
//!
//! Every channel has a fixed acceptable band.  Values inside the band
//! (bounds included) are [`Level::Ideal`]; anything below or above is
//! [`Level::Low`] / [`Level::High`].  A reading is out of range as soon as
//! one channel leaves its band.
//!
//! | Channel            | Ideal band      |
//! |--------------------|-----------------|
//! | Luminosity         | 20 000–50 000 lx|
//! | Ambient temperature| 15–25 °C        |
//! | Humidity           | 40–60 %RH       |
//! | Track temperature  | 20–30 °C        |

use core::fmt;

use crate::sensors::SensorSample;

/// Qualitative state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    Ideal,
    High,
}

/// The four monitored channels, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Luminosity,
    AmbientTemperature,
    Humidity,
    TrackTemperature,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Luminosity,
        Channel::AmbientTemperature,
        Channel::Humidity,
        Channel::TrackTemperature,
    ];

    /// Acceptable band for this channel.
    pub const fn range(self) -> Range {
        match self {
            Channel::Luminosity => LUX_RANGE,
            Channel::AmbientTemperature => AMBIENT_TEMP_RANGE,
            Channel::Humidity => HUMIDITY_RANGE,
            Channel::TrackTemperature => TRACK_TEMP_RANGE,
        }
    }

    /// Human-readable channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Luminosity => "Luminosity",
            Channel::AmbientTemperature => "Ambient temperature",
            Channel::Humidity => "Humidity",
            Channel::TrackTemperature => "Track temperature",
        }
    }

    /// Unit suffix used in status lines.
    pub const fn unit(self) -> &'static str {
        match self {
            Channel::Luminosity => " lux",
            Channel::AmbientTemperature | Channel::TrackTemperature => "\u{00b0}C",
            Channel::Humidity => "%",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed acceptable band `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f32,
    pub high: f32,
}

impl Range {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn level(&self, value: f32) -> Level {
        if value < self.low {
            Level::Low
        } else if value > self.high {
            Level::High
        } else {
            Level::Ideal
        }
    }
}

pub const LUX_RANGE: Range = Range::new(20_000.0, 50_000.0);
pub const AMBIENT_TEMP_RANGE: Range = Range::new(15.0, 25.0);
pub const HUMIDITY_RANGE: Range = Range::new(40.0, 60.0);
pub const TRACK_TEMP_RANGE: Range = Range::new(20.0, 30.0);

/// A sample together with its per-channel classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedReading {
    pub sample: SensorSample,
    pub lux: Level,
    pub ambient_temp: Level,
    pub humidity: Level,
    pub track_temp: Level,
    /// True iff at least one channel is not [`Level::Ideal`].
    pub out_of_range: bool,
}

impl ClassifiedReading {
    pub fn level(&self, channel: Channel) -> Level {
        match channel {
            Channel::Luminosity => self.lux,
            Channel::AmbientTemperature => self.ambient_temp,
            Channel::Humidity => self.humidity,
            Channel::TrackTemperature => self.track_temp,
        }
    }

    /// `(channel, value, level)` for every channel in reporting order.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, f32, Level)> + '_ {
        Channel::ALL
            .into_iter()
            .map(|c| (c, self.sample.value(c), self.level(c)))
    }
}

/// Classify an averaged sample against the fixed bands.
pub fn classify(sample: &SensorSample) -> ClassifiedReading {
    let lux = LUX_RANGE.level(sample.lux);
    let ambient_temp = AMBIENT_TEMP_RANGE.level(sample.ambient_temp_c);
    let humidity = HUMIDITY_RANGE.level(sample.humidity_pct);
    let track_temp = TRACK_TEMP_RANGE.level(sample.track_temp_c);

    let out_of_range = [lux, ambient_temp, humidity, track_temp]
        .iter()
        .any(|l| *l != Level::Ideal);

    ClassifiedReading {
        sample: *sample,
        lux,
        ambient_temp,
        humidity,
        track_temp,
        out_of_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal() -> SensorSample {
        SensorSample::new(30_000.0, 20.0, 50.0, 25.0)
    }

    #[test]
    fn ideal_sample_is_in_range() {
        let r = classify(&ideal());
        assert!(!r.out_of_range);
        assert!(r.channels().all(|(_, _, l)| l == Level::Ideal));
    }

    #[test]
    fn boundaries_are_ideal() {
        for (lux, amb, hum, track) in [
            (20_000.0, 15.0, 40.0, 20.0),
            (50_000.0, 25.0, 60.0, 30.0),
        ] {
            let r = classify(&SensorSample::new(lux, amb, hum, track));
            assert!(!r.out_of_range, "{lux} {amb} {hum} {track}");
        }
    }

    #[test]
    fn each_channel_can_trip_the_flag() {
        let cases = [
            (SensorSample { lux: 19_999.0, ..ideal() }, Channel::Luminosity, Level::Low),
            (SensorSample { lux: 50_001.0, ..ideal() }, Channel::Luminosity, Level::High),
            (SensorSample { ambient_temp_c: 14.9, ..ideal() }, Channel::AmbientTemperature, Level::Low),
            (SensorSample { ambient_temp_c: 25.1, ..ideal() }, Channel::AmbientTemperature, Level::High),
            (SensorSample { humidity_pct: 39.9, ..ideal() }, Channel::Humidity, Level::Low),
            (SensorSample { humidity_pct: 60.1, ..ideal() }, Channel::Humidity, Level::High),
            (SensorSample { track_temp_c: 19.9, ..ideal() }, Channel::TrackTemperature, Level::Low),
            (SensorSample { track_temp_c: 30.1, ..ideal() }, Channel::TrackTemperature, Level::High),
        ];

        for (sample, channel, expected) in cases {
            let r = classify(&sample);
            assert!(r.out_of_range, "{channel:?}");
            assert_eq!(r.level(channel), expected);
            let others_ideal = Channel::ALL
                .iter()
                .filter(|c| **c != channel)
                .all(|c| r.level(*c) == Level::Ideal);
            assert!(others_ideal);
        }
    }

    #[test]
    fn dim_track_scenario_is_out_of_range() {
        let r = classify(&SensorSample::new(15_000.0, 22.0, 50.0, 25.0));
        assert!(r.out_of_range);
        assert_eq!(r.lux, Level::Low);
        assert_eq!(r.ambient_temp, Level::Ideal);
        assert_eq!(r.humidity, Level::Ideal);
        assert_eq!(r.track_temp, Level::Ideal);
    }
}
