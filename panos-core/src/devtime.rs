//! Device-local time handling.
//!
//! PAN-OS reports expiration timestamps as local wall-clock time with no
//! zone information. The device's own clock (which does carry an IANA zone
//! name) is resolved once per batch and passed explicitly to every parse.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{PanosError, Result};

/// Layout of zone-less expiration timestamps, e.g. `2024/01/15 13:45:00`.
pub const EXPIRY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Layout of the system-info `time` field, e.g. `Mon Jan 15 13:45:00 2024`.
pub const SYSTEM_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Parse a device-local expiration timestamp in the given zone.
///
/// Returns `None` on any parse failure: a batch listing must not abort
/// because one entry has a malformed timestamp. DST-ambiguous local times
/// resolve to the earliest matching instant.
pub fn parse_expiry(raw: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), EXPIRY_FORMAT).ok()?;
    tz.from_local_datetime(&naive).earliest()
}

/// Reconstruct the device clock from the system-info `time` and `timezone`
/// fields.
pub fn parse_system_clock(time: &str, timezone: &str) -> Result<DateTime<Tz>> {
    let tz: Tz = timezone
        .trim()
        .parse()
        .map_err(|_| PanosError::Protocol(format!("unrecognized device time zone {timezone:?}")))?;
    let naive = NaiveDateTime::parse_from_str(time.trim(), SYSTEM_TIME_FORMAT)
        .map_err(|e| PanosError::Protocol(format!("cannot parse device time {time:?}: {e}")))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| PanosError::Protocol(format!("device time {time:?} does not exist in {tz}")))
}
