//! Message History Explorer - Read iMessage conversation history for a contact
//!
//! This library reads the local Messages store (`~/Library/Messages/chat.db`) read-only and
//! turns it into a clean, ordered list of messages. It supports:
//!
//! - Recovering text from archived attributed-body payloads when the plain text column is empty
//! - Resolving contact names and nicknames to addresses via a YAML contact directory
//! - Filtering by recency, keyword and start date
//! - Detecting missing Full Disk Access and reporting remediation steps
//!
//! # Example
//!
//! ```no_run
//! use message_history_explorer::{QueryFilter, query_history};
//! use std::path::PathBuf;
//!
//! let store = PathBuf::from("/Users/alice/Library/Messages/chat.db");
//! let filter = QueryFilter::new("+61400000000", 10).with_keyword("dinner");
//! for message in query_history(&store, &filter)? {
//!     println!("{}", message.text);
//! }
//! # Ok::<(), message_history_explorer::HistoryError>(())
//! ```

pub mod cli;
pub mod contacts;
pub mod error;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use contacts::{Resolution, load_directory, resolve_contact};
pub use error::HistoryError;
pub use models::{Directory, QueryFilter, ResolvedMessage};
pub use parsers::{extract_text, scan_readable_segments};
pub use store::{check_access, ensure_access, query_history, query_history_with};
pub use utils::paths::format_path_with_tilde;
