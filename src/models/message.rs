use chrono::{DateTime, Local};
use serde::Serialize;

/// One row fetched from the message store, before text recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessageRecord {
    pub text: Option<String>,
    pub attributed_body: Option<Vec<u8>>,
    pub is_from_me: bool,
    /// Nanoseconds since 2001-01-01T00:00:00Z
    pub store_timestamp: i64,
    pub contact: Option<String>,
}

/// A message with recovered, non-blank text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMessage {
    pub text: String,
    pub is_from_me: bool,
    #[serde(serialize_with = "crate::store::timestamps::serialize_local_timestamp")]
    pub date: DateTime<Local>,
    #[serde(skip)]
    pub store_timestamp: i64,
    pub contact: String,
}
