use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the toki directory - checks for a local .toki first, then falls
/// back to the global ~/.toki
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_toki(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".toki"))
}

/// Find a local .toki directory by walking up the directory tree
fn find_local_toki(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let toki_dir = current.join(".toki");
        if toki_dir.exists() && toki_dir.is_dir() {
            return Some(toki_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the toki directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .toki directory in the current directory
pub fn init_local_toki() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let toki_dir = current_dir.join(".toki");

    if toki_dir.exists() {
        anyhow::bail!("toki directory already exists: {}", toki_dir.display());
    }

    fs::create_dir_all(&toki_dir)
        .with_context(|| format!("Failed to create directory: {}", toki_dir.display()))?;

    Ok(toki_dir)
}

/// Path to the single storage slot holding the task list
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tasks.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "file path has no parent directory")
    })?;

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".toki"));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        let content = "Hello, world!";
        atomic_write(&test_file, content).unwrap();

        assert_eq!(fs::read_to_string(&test_file).unwrap(), content);
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        assert_eq!(fs::read_to_string(&test_file).unwrap(), "second");
    }
}
