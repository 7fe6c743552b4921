use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::Directory;
use crate::utils::validate_file_size;

/// Load the contact directory from a YAML file
///
/// Read fresh on every call so edits between invocations are always picked up. A missing
/// or empty file yields an empty directory, in which case every identifier resolves to
/// itself.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is larger than 10MB, or is not
/// valid directory YAML.
pub fn load_directory(path: &Path) -> Result<Directory> {
    if !path.exists() {
        debug!(path = %path.display(), "contacts file not found, using empty directory");
        return Ok(Directory::default());
    }

    let mut file = File::open(path)
        .with_context(|| format!("Failed to open contacts file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read contacts file: {}", path.display()))?;

    let has_content = contents.lines().map(str::trim).any(|l| !l.is_empty() && !l.starts_with('#'));
    if !has_content {
        return Ok(Directory::default());
    }

    let directory = serde_yaml::from_str::<Option<Directory>>(&contents)
        .with_context(|| format!("Failed to parse contacts file: {}", path.display()))?
        .unwrap_or_default();

    debug!(path = %path.display(), contacts = directory.len(), "loaded contact directory");
    Ok(directory)
}
