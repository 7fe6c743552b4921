use std::path::PathBuf;

use thiserror::Error;

/// Steps shown to the user when the message store cannot be read
pub const ACCESS_REMEDIATION: &str = "Grant Full Disk Access to your terminal app:
  1. Open System Settings
  2. Go to Privacy & Security > Full Disk Access
  3. Click + and add your terminal (Terminal, iTerm, Warp, etc.)
  4. Restart your terminal";

/// Fatal conditions of a history query
///
/// Per-row problems (undecodable payloads, blank text) and unparsable date filters are
/// not errors; they degrade to dropped rows or a dropped bound.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access message store at {}: {reason}", path.display())]
    AccessDenied { path: PathBuf, reason: String },
    #[error("message query failed: {0}")]
    QueryExecution(#[from] rusqlite::Error),
}

impl HistoryError {
    /// What the user can do about it, for errors they can fix
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::AccessDenied { .. } => Some(ACCESS_REMEDIATION),
            Self::QueryExecution(_) => None,
        }
    }
}
