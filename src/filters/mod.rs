//! Post-retrieval keyword matching and date lower bounds.
//!
//! The keyword filter runs after text recovery because the text may only exist inside the
//! binary payload. The date bound is pushed into the store query as a native timestamp.

pub mod keyword;
pub mod since;

pub use keyword::matches_keyword;
pub use since::{parse_since, since_to_store_timestamp};
