use std::io::Cursor;

use plist::Value;

const KEYED_ARCHIVE_SIGNATURE: &[u8] = b"bplist";
const TYPED_STREAM_SIGNATURE: &[u8] = b"\x04\x0bstreamtyped";

/// Class name preceding the message string in a typed stream
const STRING_CLASS: &[u8] = b"NSString";
/// Type tag introducing a length-prefixed C string in a typed stream
const STRING_TAG: u8 = b'+';
/// How far past the class name the string tag may appear
const STRING_TAG_WINDOW: usize = 16;

/// Object-table entries that name classes rather than carry content
const SENTINELS: &[&str] = &["$null", "NSString", "NSMutableString"];

/// Container formats the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Binary property list produced by a keyed archiver
    KeyedArchive,
    /// Legacy typed stream, what Messages writes to `attributedBody`
    TypedStream,
}

impl ArchiveFormat {
    /// Identify the container by its leading signature bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(KEYED_ARCHIVE_SIGNATURE) {
            Some(Self::KeyedArchive)
        } else if bytes.starts_with(TYPED_STREAM_SIGNATURE) {
            Some(Self::TypedStream)
        } else {
            None
        }
    }
}

/// Format-aware text decode for buffers carrying a recognized container signature
///
/// Returns `None` both when no signature is present and when decoding fails; callers
/// cannot and should not tell the two apart.
pub fn decode_archive(bytes: &[u8]) -> Option<String> {
    match ArchiveFormat::detect(bytes)? {
        ArchiveFormat::KeyedArchive => decode_keyed_archive(bytes),
        ArchiveFormat::TypedStream => decode_typed_stream(bytes),
    }
}

fn is_content(text: &str) -> bool {
    text.chars().count() > 1 && !SENTINELS.contains(&text)
}

/// First content string in the `$objects` table of a keyed archive
fn decode_keyed_archive(bytes: &[u8]) -> Option<String> {
    let root = Value::from_reader(Cursor::new(bytes)).ok()?;
    let objects = root.as_dictionary()?.get("$objects")?.as_array()?;

    objects
        .iter()
        .filter_map(Value::as_string)
        .find(|text| is_content(text))
        .map(str::to_string)
}

/// The length-prefixed string following the first `NSString` class record
fn decode_typed_stream(bytes: &[u8]) -> Option<String> {
    let class_at = find(bytes, STRING_CLASS)?;
    let after_class = &bytes[class_at + STRING_CLASS.len()..];

    let window = &after_class[..after_class.len().min(STRING_TAG_WINDOW)];
    let tag_at = window.iter().position(|b| *b == STRING_TAG)?;

    let (len, rest) = read_length(&after_class[tag_at + 1..])?;
    let raw = rest.get(..len)?;
    let text = std::str::from_utf8(raw).ok()?;

    is_content(text).then(|| text.to_string())
}

/// Typed-stream integer: one literal byte below 0x80, or a 0x81/0x82 marker
/// followed by a little-endian u16/u32
fn read_length(bytes: &[u8]) -> Option<(usize, &[u8])> {
    match *bytes.first()? {
        0x81 => {
            let raw: [u8; 2] = bytes.get(1..3)?.try_into().ok()?;
            Some((u16::from_le_bytes(raw) as usize, &bytes[3..]))
        }
        0x82 => {
            let raw: [u8; 4] = bytes.get(1..5)?.try_into().ok()?;
            Some((u32::from_le_bytes(raw) as usize, &bytes[5..]))
        }
        n if n < 0x80 => Some((n as usize, &bytes[1..])),
        _ => None,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
