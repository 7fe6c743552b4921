use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Plugin installation root; the contact directory lives under it when set
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

const APP_DIR: &str = "message-history-explorer";
const CONTACTS_FILENAME: &str = "contacts.yaml";

/// Location of the Messages store under a home directory
pub fn chat_db_path_for_home(home: &Path) -> PathBuf {
    home.join("Library").join("Messages").join("chat.db")
}

/// Get the Messages store path (~/Library/Messages/chat.db)
pub fn get_chat_db_path() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(chat_db_path_for_home(Path::new(&home)))
}

/// Location of the contact directory inside a plugin root
pub fn contacts_path_for_plugin_root(root: &Path) -> PathBuf {
    root.join("skills").join("messaging").join("references").join(CONTACTS_FILENAME)
}

/// Default contact directory path
///
/// `$CLAUDE_PLUGIN_ROOT/skills/messaging/references/contacts.yaml` when the plugin root is
/// set, otherwise `contacts.yaml` in this tool's platform config directory.
pub fn default_contacts_path() -> Option<PathBuf> {
    if let Ok(root) = env::var(PLUGIN_ROOT_ENV)
        && !root.trim().is_empty()
    {
        return Some(contacts_path_for_plugin_root(Path::new(&root)));
    }

    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONTACTS_FILENAME))
}
