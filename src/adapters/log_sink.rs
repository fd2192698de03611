//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing per-channel status lines and framed
//! alerts to the ESP-IDF logger (UART / USB-CDC in production).  Display
//! pages are left to the character display adapter.

use chrono::DateTime;
use log::{debug, info};

use crate::app::events::{AlertData, AppEvent};
use crate::app::ports::EventSink;
use crate::classify::{Channel, Level};

const ALERT_BANNER: &str =
    "======================================== ALERT =======================================";
const ALERT_FOOTER: &str =
    "======================================================================================";

/// Adapter that logs [`AppEvent`]s to the serial console.
pub struct LogEventSink {
    serial_enabled: bool,
}

impl LogEventSink {
    /// With `serial_enabled` off only lifecycle events are logged.
    pub fn new(serial_enabled: bool) -> Self {
        Self { serial_enabled }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | monitoring"),
            AppEvent::ChannelStatus {
                channel,
                value,
                level,
            } if self.serial_enabled => {
                info!("STATUS | {}", status_line(*channel, *value, *level));
            }
            AppEvent::Alert(alert) if self.serial_enabled => {
                for line in alert_lines(alert) {
                    info!("ALERT | {}", line);
                }
            }
            AppEvent::RecordStored { address } => debug!("EVLOG | stored at {:#06x}", address),
            // Read failures are already logged where they happen.
            _ => {}
        }
    }
}

/// Qualitative label for a channel state.
pub fn level_label(channel: Channel, level: Level) -> &'static str {
    match (channel, level) {
        (_, Level::Ideal) => "Ideal",
        (Channel::TrackTemperature, Level::Low) => "Very Low",
        (Channel::TrackTemperature, Level::High) => "Very High",
        (_, Level::Low) => "Low",
        (_, Level::High) => "High",
    }
}

/// `Luminosity: 15000.00 lux	 Luminosity Low`
pub fn status_line(channel: Channel, value: f32, level: Level) -> String {
    format!(
        "{}: {:.2}{}\t {} {}",
        channel.name(),
        value,
        channel.unit(),
        channel.name(),
        level_label(channel, level)
    )
}

/// `d/m/Y HH:MM:SS` for a local-time timestamp.
pub fn format_timestamp(timestamp: u32) -> String {
    match DateTime::from_timestamp(i64::from(timestamp), 0) {
        Some(dt) => dt.format("%-d/%-m/%Y %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// The framed alert block, one entry per output line.
pub fn alert_lines(alert: &AlertData) -> [String; 3] {
    let s = &alert.sample;
    [
        ALERT_BANNER.to_string(),
        format!(
            "{} - Lux: {:.2} Ambient temp: {:.2} Humidity: {:.2} Track temp: {:.2}",
            format_timestamp(alert.timestamp),
            s.lux,
            s.ambient_temp_c,
            s.humidity_pct,
            s.track_temp_c
        ),
        ALERT_FOOTER.to_string(),
    ]
}
