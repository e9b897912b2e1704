// File: ./src/storage.rs
// Low-level file helpers backing the JSON document store
use crate::model::Task;
use directories::ProjectDirs;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = "tasks.json";

pub struct LocalStorage;

impl LocalStorage {
    /// Default document file in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "taskboard", "taskboard")?;
        Some(proj.data_dir().join(STORE_FILE_NAME))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = sidecar(path, ".tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on `<path>.lock`
    /// (`tasks.json` -> `tasks.json.lock`).
    /// The lock is released when the guard file is dropped.
    pub fn with_lock<T, E, F>(path: &Path, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<io::Error>,
    {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let lock_path = sidecar(path, ".lock");
        let lock_file: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path)?;
        lock_file.lock_exclusive()?;
        let result = f();
        lock_file.unlock()?;
        result
    }

    /// A missing file is an empty collection. A corrupt one is an error.
    pub fn load(path: &Path) -> Result<Vec<Task>, crate::store::StoreError> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)?;
        if json.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(path: &Path, tasks: &[Task]) -> Result<(), crate::store::StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        Self::atomic_write(path, json)?;
        Ok(())
    }
}

/// `<path><suffix>`. Never collides with `path` itself, whatever its extension.
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
