//! Text recovery from the binary `attributedBody` payload of a message row
//!
//! # Error Handling Strategy
//!
//! Everything in this module is **infallible by construction**: each strategy returns
//! `Option<String>` (or an [`Extraction`]) and treats malformed input as "not found".
//!
//! - **Proximity match**: looks for the `NSString` class marker followed closely by a
//!   readable run. Cheap and right for the common typed-stream layout.
//!
//! - **Archive decode**: only runs when the buffer starts with a known container
//!   signature. Any decode failure collapses to `None`, indistinguishable from a
//!   missing signature.
//!
//! - **Readable-segment scan**: last resort. Picks the longest readable run that is not
//!   a serialization class name.
//!
//! A row whose payload yields nothing from all three strategies is simply dropped by the
//! query engine; payload problems never abort a query.

pub mod archive;
pub mod attributed_body;
pub mod scanner;

pub use archive::decode_archive;
pub use attributed_body::{Extraction, extract_text};
pub use scanner::scan_readable_segments;

/// Lower-cased class and key names of the archive formats.
///
/// A readable run containing any of these is serialization structure, not message text.
pub const METADATA_TOKENS: &[&[u8]] = &[
    b"nsstring",
    b"nsmutablestring",
    b"nsattributed",
    b"streamtyped",
    b"nsdictionary",
    b"nsobject",
    b"nsnumber",
    b"nsvalue",
    b"__kim",
];

/// Returns true if the bytes contain any metadata token (case-insensitive)
pub fn is_metadata(bytes: &[u8]) -> bool {
    let lowered = bytes.to_ascii_lowercase();
    METADATA_TOKENS
        .iter()
        .any(|token| lowered.windows(token.len()).any(|window| window == *token))
}
