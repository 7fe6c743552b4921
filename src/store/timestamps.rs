//! Conversion between store-native timestamps and calendar time
//!
//! The store counts nanoseconds since 2001-01-01T00:00:00Z. Calendar times handed to
//! callers are in the local timezone at conversion time.

use chrono::{DateTime, Local, Utc};
use serde::Serializer;

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z
pub const APPLE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Display format for message dates in text and JSON output
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn store_timestamp_to_utc(store_timestamp: i64) -> Option<DateTime<Utc>> {
    let secs = store_timestamp.div_euclid(NANOS_PER_SEC) + APPLE_EPOCH_OFFSET_SECS;
    let nanos = store_timestamp.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::from_timestamp(secs, nanos)
}

pub fn store_timestamp_to_local(store_timestamp: i64) -> Option<DateTime<Local>> {
    store_timestamp_to_utc(store_timestamp).map(|utc| utc.with_timezone(&Local))
}

/// Inverse of [`store_timestamp_to_utc`]; `None` if the instant does not fit in an i64
pub fn utc_to_store_timestamp(instant: DateTime<Utc>) -> Option<i64> {
    (instant.timestamp() - APPLE_EPOCH_OFFSET_SECS)
        .checked_mul(NANOS_PER_SEC)?
        .checked_add(i64::from(instant.timestamp_subsec_nanos()))
}

pub fn serialize_local_timestamp<S>(date: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
}
