//! Data models for message history extraction.
//!
//! - [`ConversationAddress`] - Canonical phone-or-email identifier for a peer
//! - [`Directory`] / [`DirectoryEntry`] - Contact directory consumed by the resolver
//! - [`RawMessageRecord`] - One row as fetched from the message store
//! - [`ResolvedMessage`] - A row with recovered text, ready for the caller
//! - [`QueryFilter`] - Caller constraints on a history query
//!
//! Directory models derive serde `Deserialize` for YAML loading; [`ResolvedMessage`]
//! derives `Serialize` for JSON output.

pub mod address;
pub mod directory;
pub mod filter;
pub mod message;

pub use address::ConversationAddress;
pub use directory::{Directory, DirectoryEntry, PlatformAddresses};
pub use filter::QueryFilter;
pub use message::{RawMessageRecord, ResolvedMessage};
