//! Full host stack: simulated peripherals behind the real adapters.
//!
//! The ADC, DHT22 and event-queue simulations are process-wide statics,
//! so everything that touches them lives in a single test.

use embedded_hal::delay::DelayNs;
use trackwatch::adapters::display::CharacterDisplay;
use trackwatch::adapters::eeprom::EepromAdapter;
use trackwatch::adapters::hardware::HardwareAdapter;
use trackwatch::adapters::log_sink::LogEventSink;
use trackwatch::adapters::nvs::NvsAdapter;
use trackwatch::adapters::time::Esp32TimeAdapter;
use trackwatch::app::commands::AppCommand;
use trackwatch::app::ports::{EventSink, Indicator};
use trackwatch::app::service::MonitorService;
use trackwatch::classify::Level;
use trackwatch::config::MonitorConfig;
use trackwatch::drivers::{button, dht22, hw_init};
use trackwatch::event_log::{CircularLog, CursorMode};
use trackwatch::events::{pop_event, Event};
use trackwatch::pins;
use trackwatch::sensors::ambient::encode_frame;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn simulated_board_logs_and_dumps() {
    hw_init::sim_set_adc(pins::ADC1_CH_LDR, 600);
    hw_init::sim_set_adc(pins::ADC1_CH_THERMISTOR, 512);
    dht22::sim_set_frame(Some(encode_frame(20.0, 50.0)));

    let config = MonitorConfig {
        sample_count: 2,
        sample_interval_ms: 0,
        ..Default::default()
    };
    let mut eeprom = EepromAdapter::open(NvsAdapter::new().unwrap()).unwrap();
    let log = CircularLog::open(config.cursor_mode, &eeprom);
    let clock = Esp32TimeAdapter::new(config.utc_offset_secs());
    let mut hw = HardwareAdapter::with_delay(NoDelay);
    let mut sink = (
        LogEventSink::new(config.serial_enabled),
        CharacterDisplay::new(config.display_dwell_ms, NoDelay),
    );

    let mut svc = MonitorService::new(&config, log);
    svc.start(&mut sink);
    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    assert_eq!(report.reading.lux, Level::Low);
    assert_eq!(report.reading.ambient_temp, Level::Ideal);
    assert_eq!(report.stored_at, Some(0));
    assert_eq!(hw.lit_indicator(), Some(Indicator::Red));
    assert_eq!(sink.1.rows(), ("Track temp:", "25.0C"));

    // The button queues a dump; the main loop would drain it.
    assert!(button::button_isr_handler(1_000));
    assert!(!button::button_isr_handler(1_010), "bounce");
    assert_eq!(pop_event(), Some(Event::DumpRequested));
    assert_eq!(pop_event(), None);

    let mut out = String::new();
    svc.handle_command(AppCommand::DumpLog, &eeprom, &mut out)
        .unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().nth(1).unwrap().contains("\t20.00\t50.00\t"));

    // A reboot in recover mode picks up after the stored record.
    let reopened = EepromAdapter::open(eeprom.into_storage()).unwrap();
    assert_eq!(
        CircularLog::open(CursorMode::Recover, &reopened).write_address(),
        16
    );

    // A silent sensor bus leaves ambient out of the average.
    dht22::sim_set_frame(None);
    let mut hw = HardwareAdapter::with_delay(NoDelay);
    let mut svc = MonitorService::new(
        &MonitorConfig {
            sample_count: 2,
            sample_interval_ms: 0,
            ..Default::default()
        },
        CircularLog::fresh(),
    );
    let mut eeprom = reopened;
    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut Discard);
    assert!(report.reading.sample.ambient_temp_c.abs() < f32::EPSILON);
    assert_eq!(report.reading.ambient_temp, Level::Low);
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &trackwatch::app::events::AppEvent) {}
}
