//! Read-only access to the Messages SQLite store
//!
//! # Error Handling Strategy
//!
//! - **Access**: [`ensure_access`] runs before any query and turns a missing or unreadable
//!   store into [`HistoryError::AccessDenied`](crate::HistoryError::AccessDenied), carrying
//!   remediation steps for the user.
//!
//! - **Per-row problems**: blank text, undecodable payloads and odd column encodings never
//!   fail a query. The row is dropped (or read lossily) and the query continues.
//!
//! - **Date bounds**: an unparsable `since` value is logged and ignored.
//!
//! - **Execution faults**: SQLite errors while preparing or stepping the query propagate as
//!   [`HistoryError::QueryExecution`](crate::HistoryError::QueryExecution).
//!
//! Each call opens its own read-only connection and closes it on every exit path; nothing
//! is cached between calls.

pub mod access;
pub mod query;
pub mod timestamps;

pub use access::{check_access, ensure_access};
pub use query::{
    DEFAULT_OVER_FETCH_FACTOR, QueryOptions, query_history, query_history_with, resolve_row_text,
};
pub use timestamps::{APPLE_EPOCH_OFFSET_SECS, store_timestamp_to_local};
