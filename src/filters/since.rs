use chrono::{Local, NaiveDate, TimeZone, Utc};
use tracing::warn;

use crate::store::timestamps::utc_to_store_timestamp;

/// Accepted format for date lower bounds
pub const SINCE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` lower bound, rejecting semantically invalid dates
pub fn parse_since(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), SINCE_FORMAT).ok()
}

/// Store-native timestamp of local midnight at the start of `value`
///
/// An unparsable date is logged and yields `None`, which callers treat as "no bound".
pub fn since_to_store_timestamp(value: &str) -> Option<i64> {
    let Some(date) = parse_since(value) else {
        warn!(since = value, "ignoring date filter that is not YYYY-MM-DD");
        return None;
    };

    let midnight = date.and_hms_opt(0, 0, 0)?;
    // A DST gap can swallow local midnight; the earliest valid instant is still a lower bound
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(midnight + chrono::Duration::hours(1))).earliest())?;

    utc_to_store_timestamp(local.with_timezone(&Utc))
}
