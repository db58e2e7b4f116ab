use super::files::atomic_write;
use crate::domain::Task;
use std::path::Path;
use thiserror::Error;

/// Why a storage-slot read or write failed. Callers treat reads as
/// fall-back-to-empty and writes as best-effort; the variants exist so
/// those decisions are made in one place, not swallowed here.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access storage slot: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage slot held malformed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read the task list from the slot. A missing file is an empty list;
/// unreadable or malformed content is an error for the caller to map.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Lenient read: any failure degrades to an empty list
pub fn load_or_default(path: &Path) -> Vec<Task> {
    load_tasks(path).unwrap_or_default()
}

/// Overwrite the slot with the whole task list
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(tasks)?;
    atomic_write(path, &json)?;
    Ok(())
}
