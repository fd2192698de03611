//! Tab-separated export of the event log.

use core::fmt::Write;

use crate::app::ports::EepromPort;
use crate::event_log::CircularLog;

/// Column header written before the records.
pub const DUMP_HEADER: &str = "Timestamp\tLux\tTemperature\tHumidity\tTrack Temp";

/// Write the header and one line per stored record, in slot order.
/// Returns the number of records written.
pub fn dump_log<S, W>(
    log: &CircularLog,
    storage: &S,
    out: &mut W,
) -> Result<usize, core::fmt::Error>
where
    S: EepromPort + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "{DUMP_HEADER}")?;
    let mut count = 0;
    for record in log.scan(storage) {
        writeln!(
            out,
            "{}\t{}\t{:.2}\t{:.2}\t{:.2}",
            record.timestamp,
            record.lux,
            record.ambient_temp_c(),
            record.humidity_pct(),
            record.track_temp_c(),
        )?;
        count += 1;
    }
    Ok(count)
}
