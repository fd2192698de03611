//! TrackWatch firmware entry point
//!
//! Hexagonal architecture with a sequential monitoring loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LogEventSink    NvsAdapter   Esp32Time    │
//! │  (Sensor+Indicator)  CharacterDisplay (Config)    (Clock)      │
//! │                      (EventSink)     EepromAdapter (Eeprom)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  average · classify · circular event log               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Button ISR ──▶ event queue ──▶ log dump                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{info, warn};

use trackwatch::adapters::display::CharacterDisplay;
use trackwatch::adapters::eeprom::EepromAdapter;
use trackwatch::adapters::hardware::HardwareAdapter;
use trackwatch::adapters::log_sink::LogEventSink;
use trackwatch::adapters::nvs::NvsAdapter;
use trackwatch::adapters::time::{Esp32TimeAdapter, StdDelay};
use trackwatch::app::commands::AppCommand;
use trackwatch::app::service::MonitorService;
use trackwatch::config::load_or_init;
use trackwatch::drivers::hw_init;
use trackwatch::error::Error;
use trackwatch::event_log::CircularLog;
use trackwatch::events::{drain_events, Event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TrackWatch v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()
        .map_err(Error::from)
        .context("peripheral init")?;
    if let Err(e) = hw_init::init_isr_service() {
        warn!("ISR service init failed: {}, dump button disabled", e);
    }

    // ── 3. Config from NVS (defaults stored on first boot) ────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            NvsAdapter::default()
        }
    };
    let config = load_or_init(&nvs);
    info!("Config: {:?}", config);

    // ── 4. Event log on emulated EEPROM ───────────────────────
    let mut eeprom = EepromAdapter::open(nvs).context("event log image")?;
    let log = CircularLog::open(config.cursor_mode, &eeprom);

    // ── 5. Adapters + service ─────────────────────────────────
    let clock = Esp32TimeAdapter::new(config.utc_offset_secs());
    let mut hw = HardwareAdapter::new();
    let mut sink = (
        LogEventSink::new(config.serial_enabled),
        CharacterDisplay::new(config.display_dwell_ms, StdDelay),
    );

    let mut service = MonitorService::new(&config, log);
    service.start(&mut sink);

    // ── 6. Monitoring loop ────────────────────────────────────
    loop {
        drain_events(|event| match event {
            Event::DumpRequested => {
                let mut out = String::new();
                match service.handle_command(AppCommand::DumpLog, &eeprom, &mut out) {
                    Ok(()) => print!("{out}"),
                    Err(e) => warn!("Log dump failed: {}", e),
                }
            }
        });

        let report = service.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
        if report.reading.out_of_range && report.stored_at.is_none() {
            warn!("Out-of-range reading was not persisted");
        }
    }
}
