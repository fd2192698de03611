//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: print to serial, render on the
//! character display, etc.

use crate::classify::{Channel, Level};
use crate::sensors::SensorSample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// Averaged value and classification of one channel.
    ChannelStatus {
        channel: Channel,
        value: f32,
        level: Level,
    },

    /// A channel read failed and was left out of the average.
    ReadFailed(Channel),

    /// At least one channel left its band.
    Alert(AlertData),

    /// An out-of-range record was persisted at `address`.
    RecordStored { address: usize },

    /// One page of the rotating display.
    Display(DisplayPage),
}

/// Snapshot carried by [`AppEvent::Alert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertData {
    /// Local-time seconds since epoch.
    pub timestamp: u32,
    pub sample: SensorSample,
}

/// Number of display pages per cycle.
pub const DISPLAY_PAGES: u8 = 4;

/// One labelled value for the character display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPage {
    /// Position in the rotation, 0-based.
    pub index: u8,
    pub label: &'static str,
    pub value: f32,
    pub unit: &'static str,
}

impl DisplayPage {
    /// The four pages for a sample, in display order.
    pub fn for_sample(sample: &SensorSample) -> [DisplayPage; DISPLAY_PAGES as usize] {
        [
            DisplayPage {
                index: 0,
                label: "Lux:",
                value: sample.lux,
                unit: "",
            },
            DisplayPage {
                index: 1,
                label: "Ambient temp:",
                value: sample.ambient_temp_c,
                unit: "C",
            },
            DisplayPage {
                index: 2,
                label: "Humidity:",
                value: sample.humidity_pct,
                unit: "%",
            },
            DisplayPage {
                index: 3,
                label: "Track temp:",
                value: sample.track_temp_c,
                unit: "C",
            },
        ]
    }

    /// The last page stays up until the next cycle.
    pub fn is_last(&self) -> bool {
        self.index + 1 == DISPLAY_PAGES
    }
}
