//! Terminal output sanitization for message text
//!
//! # Security: Terminal Injection Prevention
//!
//! Message text comes from other people. Printed raw, escape sequences inside it could
//! clear the screen, move the cursor, retitle the window or restyle the terminal. All text
//! printed by the thread view goes through [`to_display_line`].

/// Line-break marker used when a message is flattened onto one line
pub const LINE_BREAK_MARKER: &str = " ↵ ";

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes ANSI escape sequences and control characters
///
/// Handles CSI sequences (`ESC [ ... letter`) and OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`). Tab, newline and carriage return are kept.
///
/// # Examples
///
/// ```
/// use message_history_explorer::utils::terminal::strip_control_sequences;
///
/// assert_eq!(strip_control_sequences("\x1b[31mRed text\x1b[0m"), "Red text");
/// ```
pub fn strip_control_sequences(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == BEL {
                            break;
                        }
                        if next_ch == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitized single-line rendering of a message for the thread view
pub fn to_display_line(text: &str) -> String {
    strip_control_sequences(text)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', LINE_BREAK_MARKER)
}
