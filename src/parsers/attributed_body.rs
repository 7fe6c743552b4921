use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::trace;

use super::{decode_archive, is_metadata, scan_readable_segments};

/// `NSString` followed within a short window by a readable run
///
/// A typed-stream `+` tag and its length prefix (one byte below 0x80, or 0x81/0x82 then a
/// u16/u32) are consumed before the capture, so a printable length byte never leaks into
/// the text. The run is printable ASCII, tab/newline/carriage return, or complete UTF-8
/// sequences.
static STRING_MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?-u)NSString.{1,20}?",
        r"(?:\+(?:\x81[\x00-\xFF]{2}|\x82[\x00-\xFF]{4}|[\x00-\x7F]))?",
        r"((?:[\t\n\r\x20-\x7E]|[\xC2-\xDF][\x80-\xBF]|[\xE0-\xEF][\x80-\xBF]{2}|[\xF0-\xF4][\x80-\xBF]{3}){2,})",
    ))
    .expect("valid regex")
});

/// Outcome of one text-recovery strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound,
}

impl Extraction {
    /// Wrap a strategy's raw candidate; blank text counts as not found
    pub fn from_candidate(candidate: Option<String>) -> Self {
        match candidate {
            Some(text) if !text.trim().is_empty() => Self::Found(text.trim().to_string()),
            _ => Self::NotFound,
        }
    }

    /// Run the next strategy only if this one found nothing
    pub fn or_else<F>(self, next: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Found(_) => self,
            Self::NotFound => next(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound => None,
        }
    }
}

/// The first readable run sitting just after an `NSString` marker that is not itself
/// a class name
fn proximity_match(bytes: &[u8]) -> Option<String> {
    STRING_MARKER_PATTERN
        .captures_iter(bytes)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_bytes())
        .find(|run| !is_metadata(run))
        .map(|run| String::from_utf8_lossy(run).into_owned())
}

/// Recover message text from an `attributedBody` payload
///
/// Strategies run in order (proximity match, archive decode, readable-segment scan) and
/// the first non-blank result wins. Returns `None` for empty input or when every
/// strategy comes up empty.
pub fn extract_text(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    let extraction = Extraction::from_candidate(proximity_match(bytes))
        .or_else(|| {
            trace!("proximity match failed, trying archive decode");
            Extraction::from_candidate(decode_archive(bytes))
        })
        .or_else(|| {
            trace!("archive decode failed, scanning readable segments");
            Extraction::from_candidate(scan_readable_segments(bytes))
        });

    extraction.into_option()
}
