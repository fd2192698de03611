//! Monitor service, the hexagonal core.
//!
//! [`MonitorService`] owns the averager settings and the event-log cursor.
//! Both are fixed for the lifetime of a boot.
//! All I/O flows through port traits injected at call sites, making the
//! entire cycle testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     MonitorService      │
//! IndicatorPort ◀─│ average · classify · log│ ◀─▶ EepromPort
//!                 └────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::classify::{classify, ClassifiedReading, Level};
use crate::config::MonitorConfig;
use crate::event_log::CircularLog;
use crate::record::LogRecord;
use crate::sensors::{SensorAverager, SensorSample};

use super::commands::AppCommand;
use super::dump::dump_log;
use super::events::{AlertData, AppEvent, DisplayPage};
use super::ports::{ClockPort, EepromPort, EventSink, Indicator, IndicatorPort, SensorPort};

/// Outcome of one monitoring cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub reading: ClassifiedReading,
    /// Address of the persisted record, if one was written.
    pub stored_at: Option<usize>,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor service orchestrates all domain logic.
pub struct MonitorService {
    averager: SensorAverager,
    log: CircularLog,
    cycle_count: u64,
    records_written: u64,
}

impl MonitorService {
    /// Construct the service around an already-opened log cursor.
    pub fn new(config: &MonitorConfig, log: CircularLog) -> Self {
        Self {
            averager: SensorAverager::from_config(config),
            log,
            cycle_count: 0,
            records_written: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "MonitorService started (samples={}, cursor={:#06x})",
            self.averager.sample_count(),
            self.log.write_address()
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: acquire → classify → indicate → persist → display.
    ///
    /// The `hw` parameter satisfies [`SensorPort`], [`IndicatorPort`] and
    /// [`DelayNs`] at once, avoiding a double mutable borrow of the board.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort + DelayNs),
        clock: &impl ClockPort,
        storage: &mut impl EepromPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        let sample = self.averager.acquire(hw, sink);
        self.process_sample(sample, hw, clock, storage, sink)
    }

    /// Everything after acquisition, for an already-averaged sample.
    pub fn process_sample(
        &mut self,
        sample: SensorSample,
        hw: &mut impl IndicatorPort,
        clock: &impl ClockPort,
        storage: &mut impl EepromPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let reading = classify(&sample);

        // 1. Per-channel status
        for (channel, value, level) in reading.channels() {
            sink.emit(&AppEvent::ChannelStatus {
                channel,
                value,
                level,
            });
        }

        // 2. Indicator LEDs follow luminosity only
        hw.set_indicator(if reading.lux == Level::Low {
            Indicator::Red
        } else {
            Indicator::Green
        });

        // 3. Persist and alert when any channel is out of band
        let mut stored_at = None;
        if reading.out_of_range {
            let timestamp = clock.now();
            let record = LogRecord::encode(timestamp, &sample);
            match self.log.append(storage, &record) {
                Ok(address) => {
                    self.records_written += 1;
                    debug!("EVLOG | record ts={} at {:#06x}", timestamp, address);
                    sink.emit(&AppEvent::RecordStored { address });
                    stored_at = Some(address);
                }
                Err(e) => warn!("EVLOG | append failed: {}", e),
            }
            sink.emit(&AppEvent::Alert(AlertData { timestamp, sample }));
        }

        // 4. Display rotation
        for page in DisplayPage::for_sample(&sample) {
            sink.emit(&AppEvent::Display(page));
        }

        CycleReport { reading, stored_at }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.  Dump output goes to `out`.
    pub fn handle_command(
        &self,
        cmd: AppCommand,
        storage: &impl EepromPort,
        out: &mut impl core::fmt::Write,
    ) -> crate::error::Result<()> {
        match cmd {
            AppCommand::DumpLog => {
                let count = dump_log(&self.log, storage, out)?;
                info!("EVLOG | dumped {} records", count);
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn log(&self) -> &CircularLog {
        &self.log
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Records persisted since boot.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}
