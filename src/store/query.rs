use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Row, ToSql};
use tracing::{debug, trace};

use super::access::{ensure_access, open_read_only};
use super::timestamps::store_timestamp_to_local;
use crate::error::HistoryError;
use crate::filters::{matches_keyword, since_to_store_timestamp};
use crate::models::{QueryFilter, RawMessageRecord, ResolvedMessage};
use crate::parsers::extract_text;

/// Rows requested per wanted message, covering rows dropped for having no text
pub const DEFAULT_OVER_FETCH_FACTOR: usize = 2;

const INITIAL_CAPACITY_CAP: usize = 256;

const HISTORY_SELECT: &str = "SELECT m.text, m.attributedBody, m.is_from_me, m.date, h.id
     FROM message m
     LEFT JOIN handle h ON m.handle_id = h.ROWID
     WHERE h.id = ?";
const SINCE_PREDICATE: &str = " AND m.date >= ?";
const ORDER_AND_LIMIT: &str = " ORDER BY m.date DESC, m.ROWID DESC LIMIT ?";

/// Tuning knobs for the history query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub over_fetch_factor: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { over_fetch_factor: DEFAULT_OVER_FETCH_FACTOR }
    }
}

impl QueryOptions {
    pub fn with_over_fetch_factor(over_fetch_factor: usize) -> Self {
        Self { over_fetch_factor: over_fetch_factor.max(1) }
    }

    /// SQL `LIMIT` for a caller limit
    pub fn fetch_limit(&self, limit: usize) -> i64 {
        let rows = limit.max(1).saturating_mul(self.over_fetch_factor.max(1));
        i64::try_from(rows).unwrap_or(i64::MAX)
    }
}

fn history_sql(with_since: bool) -> String {
    let mut sql = String::from(HISTORY_SELECT);
    if with_since {
        sql.push_str(SINCE_PREDICATE);
    }
    sql.push_str(ORDER_AND_LIMIT);
    sql
}

/// Where a row's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowText {
    /// The plain column holds non-blank text
    PlainText(String),
    /// The plain column is empty; the payload has to be decoded
    NeedsExtraction,
}

impl RowText {
    fn classify(record: &RawMessageRecord) -> Self {
        match record.text.as_deref() {
            Some(text) if !text.trim().is_empty() => Self::PlainText(text.to_string()),
            _ => Self::NeedsExtraction,
        }
    }
}

/// Recover a row's text: the plain column first, then the attributed payload
///
/// Returns `None` when neither yields non-blank text; such rows are dropped.
pub fn resolve_row_text(record: &RawMessageRecord) -> Option<String> {
    match RowText::classify(record) {
        RowText::PlainText(text) => Some(text),
        RowText::NeedsExtraction => record.attributed_body.as_deref().and_then(extract_text),
    }
}

fn resolve_record(record: RawMessageRecord, address: &str) -> Option<ResolvedMessage> {
    let Some(text) = resolve_row_text(&record) else {
        trace!(store_timestamp = record.store_timestamp, "dropping row without recoverable text");
        return None;
    };
    let date = store_timestamp_to_local(record.store_timestamp)?;

    Some(ResolvedMessage {
        text,
        is_from_me: record.is_from_me,
        date,
        store_timestamp: record.store_timestamp,
        contact: record.contact.unwrap_or_else(|| address.to_string()),
    })
}

/// Text columns are read lossily so one badly encoded row cannot fail the query
fn lossy_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => None,
    }
}

fn raw_bytes(value: ValueRef<'_>) -> Option<Vec<u8>> {
    match value {
        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Some(bytes.to_vec()),
        _ => None,
    }
}

fn integer(value: ValueRef<'_>) -> i64 {
    match value {
        ValueRef::Integer(n) => n,
        ValueRef::Real(r) => r as i64,
        _ => 0,
    }
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<RawMessageRecord> {
    Ok(RawMessageRecord {
        text: lossy_text(row.get_ref(0)?),
        attributed_body: raw_bytes(row.get_ref(1)?),
        is_from_me: integer(row.get_ref(2)?) != 0,
        store_timestamp: integer(row.get_ref(3)?),
        contact: lossy_text(row.get_ref(4)?),
    })
}

/// Query a conversation's history with the default [`QueryOptions`]
///
/// See [`query_history_with`].
pub fn query_history(
    store_path: &Path,
    filter: &QueryFilter,
) -> Result<Vec<ResolvedMessage>, HistoryError> {
    query_history_with(store_path, filter, &QueryOptions::default())
}

/// Fetch the most recent messages exchanged with `filter.address`
///
/// Pipeline:
/// 1. Fail fast with [`HistoryError::AccessDenied`] if the store is unreadable
/// 2. Select rows for the peer, newest first, bounded below by `filter.since` when it
///    parses, over-fetching `limit * over_fetch_factor` rows
/// 3. Recover each row's text (plain column, then attributed payload) and drop rows with none
/// 4. Keep rows containing `filter.keyword` (case-insensitive)
/// 5. Stop at `filter.limit`
///
/// Fewer than `limit` messages may come back when the over-fetch window runs out; no
/// second round-trip is made. The connection is read-only and closed on return.
///
/// # Errors
///
/// - [`HistoryError::AccessDenied`] before any query when the store is missing or unreadable
/// - [`HistoryError::QueryExecution`] for SQLite faults while querying
pub fn query_history_with(
    store_path: &Path,
    filter: &QueryFilter,
    options: &QueryOptions,
) -> Result<Vec<ResolvedMessage>, HistoryError> {
    ensure_access(store_path)?;
    let conn = open_read_only(store_path)?;

    let since = filter.since.as_deref().and_then(since_to_store_timestamp);
    let fetch_limit = options.fetch_limit(filter.limit);

    let mut params: Vec<&dyn ToSql> = vec![&filter.address];
    if let Some(since) = since.as_ref() {
        params.push(since);
    }
    params.push(&fetch_limit);

    let mut stmt = conn.prepare(&history_sql(since.is_some()))?;
    let rows = stmt.query_map(params.as_slice(), read_record)?;

    let mut messages = Vec::with_capacity(filter.limit.min(INITIAL_CAPACITY_CAP));
    let mut fetched = 0usize;
    let mut dropped = 0usize;

    for record in rows {
        fetched += 1;
        let Some(message) = resolve_record(record?, &filter.address) else {
            dropped += 1;
            continue;
        };

        if !matches_keyword(&message.text, filter.keyword.as_deref()) {
            continue;
        }

        messages.push(message);
        if messages.len() >= filter.limit {
            break;
        }
    }

    debug!(
        address = %filter.address,
        fetched,
        dropped,
        returned = messages.len(),
        "message history query finished"
    );

    Ok(messages)
}
