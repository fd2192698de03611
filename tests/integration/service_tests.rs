//! MonitorService end to end: acquire → classify → indicate → persist → display.

use trackwatch::app::events::AppEvent;
use trackwatch::app::ports::{EepromPort, Indicator};
use trackwatch::app::service::MonitorService;
use trackwatch::classify::{Channel, Level};
use trackwatch::config::MonitorConfig;
use trackwatch::event_log::{CircularLog, CursorMode, LOG_REGION_BYTES, MAX_RECORDS};
use trackwatch::record::{LogRecord, RECORD_SIZE};
use trackwatch::sensors::SensorSample;

use crate::mock_hw::{MemEeprom, MockClock, MockSensors, RecordingSink};

fn service() -> MonitorService {
    MonitorService::new(&MonitorConfig::default(), CircularLog::fresh())
}

fn fast_service() -> MonitorService {
    let config = MonitorConfig {
        sample_count: 1,
        sample_interval_ms: 0,
        ..Default::default()
    };
    MonitorService::new(&config, CircularLog::fresh())
}

fn record_at(eeprom: &MemEeprom, address: usize) -> Option<LogRecord> {
    let mut buf = [0u8; RECORD_SIZE];
    eeprom.read(address, &mut buf).unwrap();
    LogRecord::decode(&buf)
}

#[test]
fn ideal_cycle_writes_nothing() {
    let mut svc = service();
    let mut hw = MockSensors::ideal();
    let clock = MockClock::at(1_700_000_000);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    assert!(!report.reading.out_of_range, "{:?}", report.reading);
    assert_eq!(report.stored_at, None);
    assert_eq!(eeprom.writes, 0);
    assert_eq!(hw.last_indicator(), Some(Indicator::Green));
    assert_eq!(hw.delays_ms, vec![200; 10]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Alert(_))), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Display(_))), 4);
}

#[test]
fn dim_track_is_logged_and_alerted() {
    let mut svc = service();
    let mut hw = MockSensors::dim();
    let clock = MockClock::at(1_700_000_000);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    assert!(report.reading.out_of_range);
    assert_eq!(report.reading.lux, Level::Low);
    assert_eq!(report.stored_at, Some(0));
    assert_eq!(hw.last_indicator(), Some(Indicator::Red));

    let stored = record_at(&eeprom, 0).unwrap();
    assert_eq!(stored.timestamp, 1_700_000_000);
    assert_eq!(stored.ambient_temp_centi, 2_000);
    assert_eq!(stored.humidity_centi, 5_000);
    assert_eq!(svc.records_written(), 1);
    assert_eq!(svc.log().write_address(), RECORD_SIZE);
}

#[test]
fn scenario_sample_stores_exactly_one_scaled_record() {
    let mut svc = service();
    let mut hw = MockSensors::ideal();
    let clock = MockClock::at(1_234);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    let sample = SensorSample::new(15_000.0, 22.0, 50.0, 25.0);
    let report = svc.process_sample(sample, &mut hw, &clock, &mut eeprom, &mut sink);

    assert_eq!(report.stored_at, Some(0));
    assert_eq!(eeprom.writes, 1);
    assert_eq!(
        record_at(&eeprom, 0),
        Some(LogRecord {
            timestamp: 1_234,
            lux: 15_000,
            ambient_temp_centi: 2_200,
            humidity_centi: 5_000,
            track_temp_centi: 2_500,
        })
    );
    assert_eq!(record_at(&eeprom, RECORD_SIZE), None);
}

#[test]
fn events_follow_cycle_order() {
    let mut svc = service();
    let mut hw = MockSensors::ideal();
    let clock = MockClock::at(50);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    let sample = SensorSample::new(15_000.0, 22.0, 50.0, 25.0);
    svc.process_sample(sample, &mut hw, &clock, &mut eeprom, &mut sink);

    let kinds: Vec<&str> = sink
        .events
        .iter()
        .map(|e| match e {
            AppEvent::ChannelStatus { .. } => "status",
            AppEvent::RecordStored { .. } => "stored",
            AppEvent::Alert(_) => "alert",
            AppEvent::Display(_) => "display",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "status", "status", "status", "status", "stored", "alert", "display", "display",
            "display", "display"
        ]
    );
    assert_eq!(
        sink.events[0],
        AppEvent::ChannelStatus {
            channel: Channel::Luminosity,
            value: 15_000.0,
            level: Level::Low,
        }
    );
}

#[test]
fn failed_ambient_reads_count_toward_denominator() {
    let mut svc = service();
    let mut hw = MockSensors::ideal();
    hw.ambient_failures = vec![1, 4, 7];
    let clock = MockClock::at(1);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    // 7 × 20 °C / 10
    assert!((report.reading.sample.ambient_temp_c - 14.0).abs() < 1e-4);
    assert_eq!(report.reading.ambient_temp, Level::Low);
    assert_eq!(
        sink.count(|e| *e == AppEvent::ReadFailed(Channel::AmbientTemperature)),
        3
    );
    assert!(report.stored_at.is_some());
}

#[test]
fn log_wraps_and_keeps_newest_hundred() {
    let mut svc = fast_service();
    let mut hw = MockSensors::dim();
    let clock = MockClock::at(1);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    for _ in 0..MAX_RECORDS + 3 {
        svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
        clock.advance(1);
    }

    assert_eq!(svc.cycle_count(), 103);
    assert_eq!(svc.log().write_address(), 3 * RECORD_SIZE);
    let mut stamps: Vec<u32> = svc.log().scan(&eeprom).map(|r| r.timestamp).collect();
    assert_eq!(stamps.len(), MAX_RECORDS);
    assert_eq!(&stamps[..3], &[101, 102, 103]);
    stamps.sort_unstable();
    assert_eq!(stamps, (4..=103).collect::<Vec<u32>>());
}

#[test]
fn storage_failure_does_not_abort_cycle() {
    let mut svc = fast_service();
    let mut hw = MockSensors::dim();
    let clock = MockClock::at(1);
    let mut eeprom = MemEeprom::erased(8);
    let mut sink = RecordingSink::new();

    let report = svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    assert_eq!(report.stored_at, None);
    assert_eq!(svc.log().write_address(), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Alert(_))), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Display(_))), 4);
}

#[test]
fn recover_mode_resumes_after_reboot() {
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let clock = MockClock::at(10);
    let mut sink = RecordingSink::new();
    let mut hw = MockSensors::dim();

    let mut first_boot = fast_service();
    for _ in 0..5 {
        first_boot.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
        clock.advance(1);
    }

    let config = MonitorConfig {
        sample_count: 1,
        sample_interval_ms: 0,
        cursor_mode: CursorMode::Recover,
        ..Default::default()
    };
    let log = CircularLog::open(config.cursor_mode, &eeprom);
    let mut second_boot = MonitorService::new(&config, log);
    let report = second_boot.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
    assert_eq!(report.stored_at, Some(5 * RECORD_SIZE));

    // Fresh mode overwrites from the front instead.
    let mut third_boot = fast_service();
    let report = third_boot.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
    assert_eq!(report.stored_at, Some(0));
}
