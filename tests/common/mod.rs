//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z
const APPLE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Nanoseconds since 2001-01-01 UTC for a Unix timestamp in seconds
pub fn store_timestamp(unix_secs: i64) -> i64 {
    (unix_secs - APPLE_EPOCH_OFFSET_SECS) * 1_000_000_000
}

/// 2025-12-26T10:00:00Z plus `minutes`
pub fn minutes_after_base(minutes: i64) -> i64 {
    store_timestamp(1_766_743_200 + minutes * 60)
}

/// A typed-stream attributed body carrying `text`, as Messages writes it
pub fn typed_stream_payload(text: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x04\x0bstreamtyped\x81\xe8\x03\x84\x01@\x84\x84\x84");
    buf.extend_from_slice(b"\x12NSAttributedString\x00\x84\x84\x08NSObject\x00\x85\x92");
    buf.extend_from_slice(b"\x84\x84\x84\x08NSString\x01\x94\x84\x01+");
    if text.len() < 0x80 {
        buf.push(text.len() as u8);
    } else {
        let len = u16::try_from(text.len()).expect("helper writes at most u16 lengths");
        buf.push(0x81);
        buf.extend_from_slice(&len.to_le_bytes());
    }
    buf.extend_from_slice(text.as_bytes());
    buf.extend_from_slice(b"\x86\x84\x02iI\x01\x0c\x92");
    buf
}

/// One row of the `message` table
#[derive(Clone)]
pub struct MessageRow {
    pub handle: String,
    pub text: Option<String>,
    pub attributed_body: Option<Vec<u8>>,
    pub is_from_me: bool,
    pub date: i64,
}

impl MessageRow {
    pub fn text(handle: &str, text: &str, date: i64) -> Self {
        Self {
            handle: handle.to_string(),
            text: Some(text.to_string()),
            attributed_body: None,
            is_from_me: false,
            date,
        }
    }

    pub fn attributed(handle: &str, payload: Vec<u8>, date: i64) -> Self {
        Self {
            handle: handle.to_string(),
            text: None,
            attributed_body: Some(payload),
            is_from_me: false,
            date,
        }
    }

    pub fn empty(handle: &str, date: i64) -> Self {
        Self { handle: handle.to_string(), text: None, attributed_body: None, is_from_me: false, date }
    }

    pub fn from_me(mut self) -> Self {
        self.is_from_me = true;
        self
    }
}

/// Builder for a minimal Messages store in a temp directory
pub struct ChatDbBuilder {
    temp_dir: TempDir,
    rows: Vec<MessageRow>,
}

impl ChatDbBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, rows: Vec::new() }
    }

    pub fn with_message(mut self, row: MessageRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_messages(mut self, rows: impl IntoIterator<Item = MessageRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Write the store and return the temp dir with its path
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("chat.db");
        let conn = Connection::open(&path).expect("Failed to create chat.db");
        conn.execute_batch(
            "CREATE TABLE handle (ROWID INTEGER PRIMARY KEY AUTOINCREMENT, id TEXT NOT NULL);
             CREATE TABLE message (
                 ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
                 text TEXT,
                 attributedBody BLOB,
                 is_from_me INTEGER DEFAULT 0,
                 date INTEGER,
                 handle_id INTEGER DEFAULT 0
             );",
        )
        .expect("Failed to create schema");

        for row in &self.rows {
            let handle_id = handle_rowid(&conn, &row.handle);
            conn.execute(
                "INSERT INTO message (text, attributedBody, is_from_me, date, handle_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.text, row.attributed_body, row.is_from_me as i64, row.date, handle_id],
            )
            .expect("Failed to insert message");
        }

        drop(conn);
        (self.temp_dir, path)
    }
}

fn handle_rowid(conn: &Connection, id: &str) -> i64 {
    let existing = conn
        .query_row("SELECT ROWID FROM handle WHERE id = ?1", [id], |row| row.get(0))
        .ok();
    match existing {
        Some(rowid) => rowid,
        None => {
            conn.execute("INSERT INTO handle (id) VALUES (?1)", [id]).expect("Failed to insert handle");
            conn.last_insert_rowid()
        }
    }
}

/// The three-message conversation used across tests, oldest first:
/// "hello" from the peer, "see you then" from the peer, then "call me" from me with the
/// text only in the attributed body.
pub fn sample_conversation(handle: &str) -> Vec<MessageRow> {
    vec![
        MessageRow::text(handle, "hello", minutes_after_base(0)),
        MessageRow::text(handle, "see you then", minutes_after_base(5)),
        MessageRow::attributed(handle, typed_stream_payload("call me"), minutes_after_base(10))
            .from_me(),
    ]
}

/// Write a contacts.yaml into `dir`
pub fn write_contacts_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("contacts.yaml");
    fs::write(&path, content).expect("Failed to write contacts.yaml");
    path
}

pub const SAMPLE_CONTACTS: &str = r#"
contacts:
  - name: James Doe
    nicknames: [James, JD]
    platforms:
      imessage:
        phone: "+61400000000"
        email: james@example.com
  - name: Alex
    platforms:
      imessage:
        email: alex@example.com
"#;
