//! Log dump output format.

use trackwatch::app::commands::AppCommand;
use trackwatch::app::dump::{dump_log, DUMP_HEADER};
use trackwatch::app::ports::EepromPort;
use trackwatch::app::service::MonitorService;
use trackwatch::config::MonitorConfig;
use trackwatch::event_log::{CircularLog, LOG_REGION_BYTES};
use trackwatch::record::{LogRecord, RECORD_SIZE};
use trackwatch::sensors::SensorSample;

use crate::mock_hw::{MemEeprom, MockClock, MockSensors, RecordingSink};

#[test]
fn empty_log_prints_header_only() {
    let eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut out = String::new();
    let count = dump_log(&CircularLog::fresh(), &eeprom, &mut out).unwrap();
    assert_eq!(count, 0);
    assert_eq!(out, format!("{DUMP_HEADER}\n"));
}

#[test]
fn records_are_tab_separated_with_two_decimals() {
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut log = CircularLog::fresh();
    log.append(
        &mut eeprom,
        &LogRecord::encode(1_700_000_000, &SensorSample::new(15_000.7, 22.0, 50.0, 25.0)),
    )
    .unwrap();
    log.append(
        &mut eeprom,
        &LogRecord::encode(1_700_000_060, &SensorSample::new(64.6, -3.5, 48.25, 31.019)),
    )
    .unwrap();

    let mut out = String::new();
    assert_eq!(dump_log(&log, &eeprom, &mut out).unwrap(), 2);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Timestamp\tLux\tTemperature\tHumidity\tTrack Temp");
    assert_eq!(lines[1], "1700000000\t15000\t22.00\t50.00\t25.00");
    assert_eq!(lines[2], "1700000060\t64\t-3.50\t48.25\t31.01");
}

#[test]
fn dump_skips_empty_slots() {
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let record = LogRecord::encode(42, &SensorSample::new(1.0, 2.0, 3.0, 4.0));
    eeprom.write(7 * RECORD_SIZE, &record.to_bytes()).unwrap();

    let mut out = String::new();
    dump_log(&CircularLog::fresh(), &eeprom, &mut out).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().nth(1).unwrap().starts_with("42\t1\t"));
}

#[test]
fn dump_command_goes_through_service() {
    let config = MonitorConfig {
        sample_count: 1,
        sample_interval_ms: 0,
        ..Default::default()
    };
    let mut svc = MonitorService::new(&config, CircularLog::fresh());
    let mut hw = MockSensors::dim();
    let clock = MockClock::at(900);
    let mut eeprom = MemEeprom::erased(LOG_REGION_BYTES);
    let mut sink = RecordingSink::new();

    svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);
    clock.advance(5);
    svc.run_cycle(&mut hw, &clock, &mut eeprom, &mut sink);

    let mut out = String::new();
    svc.handle_command(AppCommand::DumpLog, &eeprom, &mut out)
        .unwrap();
    let stamps: Vec<&str> = out
        .lines()
        .skip(1)
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(stamps, vec!["900", "905"]);
}
