//! Local-time conversion for provider request parameters.
//!
//! Routing providers take the anchor instant as a local ISO datetime, so
//! an epoch timestamp has to be rendered in the anchor event's timezone.
//! The timezone-name-to-offset mapping is isolated behind [`OffsetLookup`]
//! so everything above it can be tested with a fixed offset instead of a
//! live timezone database.
//!
//! The offset is always evaluated at the converted instant, not at "now":
//! a trip planned across a DST boundary must use the offset in force when
//! the trip happens.

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Maps an IANA timezone name to its UTC offset at a given instant.
pub trait OffsetLookup {
    /// UTC offset in seconds east of Greenwich for `timezone` at
    /// `instant_ms` (epoch milliseconds).
    fn utc_offset_seconds(&self, timezone: &str, instant_ms: i64) -> Result<i32>;
}

/// [`OffsetLookup`] backed by the compiled-in IANA database (`chrono-tz`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TzDatabase;

impl OffsetLookup for TzDatabase {
    fn utc_offset_seconds(&self, timezone: &str, instant_ms: i64) -> Result<i32> {
        let tz: Tz = timezone.parse().map_err(|_| Error::UnknownTimezone {
            name: timezone.to_string(),
        })?;
        let utc = instant_from_ms(instant_ms)?;
        Ok(utc.with_timezone(&tz).offset().fix().local_minus_utc())
    }
}

/// Render an epoch-millisecond instant as a local RFC 3339 datetime with
/// offset suffix, for example `2023-11-14T23:13:20+01:00`.
pub fn local_iso_time(
    instant_ms: i64,
    timezone: &str,
    offsets: &dyn OffsetLookup,
) -> Result<String> {
    let seconds = offsets.utc_offset_seconds(timezone, instant_ms)?;
    let offset = FixedOffset::east_opt(seconds).ok_or(Error::InvalidUtcOffset { seconds })?;
    let local = instant_from_ms(instant_ms)?.with_timezone(&offset);
    Ok(local.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

fn instant_from_ms(instant_ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(instant_ms)
        .single()
        .ok_or(Error::TimestampOutOfRange { instant_ms })
}
