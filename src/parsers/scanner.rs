use super::is_metadata;

/// Shortest run of readable bytes considered a text candidate
const MIN_SEGMENT_LEN: usize = 4;

/// Printable ASCII plus the lead-byte range of multi-byte UTF-8 sequences
fn is_readable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | 0xC0..=0xFF)
}

/// Split a buffer into maximal runs of readable bytes at least `MIN_SEGMENT_LEN` long
fn readable_segments(bytes: &[u8]) -> impl DoubleEndedIterator<Item = &[u8]> {
    bytes
        .split(|b| !is_readable(*b))
        .filter(|segment| segment.len() >= MIN_SEGMENT_LEN)
}

/// Pick the most likely human-authored text out of an arbitrary byte buffer
///
/// Collects maximal readable runs, drops those naming serialization classes, and returns
/// the longest survivor (earliest wins a tie) decoded lossily and trimmed.
/// Returns `None` for empty input or when nothing survives.
///
/// # Examples
///
/// ```
/// use message_history_explorer::parsers::scan_readable_segments;
///
/// let payload = b"\x04\x0bstreamtyped\x81\x00NSString\x01\x94Meeting at noon\x86";
/// assert_eq!(scan_readable_segments(payload).as_deref(), Some("Meeting at noon"));
/// ```
pub fn scan_readable_segments(bytes: &[u8]) -> Option<String> {
    let longest = readable_segments(bytes)
        .filter(|segment| !is_metadata(segment))
        .rev()
        .max_by_key(|segment| segment.len())?;

    let text = String::from_utf8_lossy(longest).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
