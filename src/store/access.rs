use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::HistoryError;

/// Trivial read against the primary record table
const ACCESS_PROBE: &str = "SELECT 1 FROM message LIMIT 1";

/// Open the store strictly read-only; the store is never written
pub(crate) fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn probe(path: &Path) -> rusqlite::Result<()> {
    let conn = open_read_only(path)?;
    let mut stmt = conn.prepare(ACCESS_PROBE)?;
    let mut rows = stmt.query([])?;
    rows.next()?;
    Ok(())
}

/// Verify the store can be read before any query is built
///
/// Fails with [`HistoryError::AccessDenied`] when the file is missing or the read probe
/// raises (permission denied, not a database, no `message` table). The probe connection
/// is closed before returning.
pub fn ensure_access(path: &Path) -> Result<(), HistoryError> {
    if !path.exists() {
        return Err(HistoryError::AccessDenied {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }

    probe(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "message store probe failed");
        HistoryError::AccessDenied { path: path.to_path_buf(), reason: e.to_string() }
    })
}

/// Whether the store at `path` is readable
pub fn check_access(path: &Path) -> bool {
    ensure_access(path).is_ok()
}
