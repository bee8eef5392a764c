//! Locked JSON file helpers shared by the record and user stores
//!
//! Every data file `foo.json` has a sidecar `foo.json.lock` that is never
//! renamed or removed. Readers hold it shared, read-modify-write cycles hold
//! it exclusive from load to rename. New content is staged in a uniquely
//! named temp file next to the target and renamed into place.

use crate::types::{Result, SpendtrackError};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Open (creating if needed) the sidecar lock file for `path`
fn open_lock(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(path))
        .map_err(|e| SpendtrackError::Store(format!("Failed to open lock file: {}", e)))
}

/// Decode the file at `path`; caller must hold the sidecar lock
fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let mut content = String::new();
    match File::open(path) {
        Ok(file) => {
            std::io::BufReader::new(file).read_to_string(&mut content)?;
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    serde_json::from_str(&content).map(Some).map_err(|e| {
        SpendtrackError::Store(format!("Corrupted store file {}: {}", path.display(), e))
    })
}

/// Stage `value` in a fresh temp file beside `path`, then rename over it
fn store<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let content = serde_json::to_vec_pretty(value)
        .map_err(|e| SpendtrackError::Store(format!("Serialization failed: {}", e)))?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| SpendtrackError::Store(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(&content)
        .map_err(|e| SpendtrackError::Store(format!("Failed to write temp file: {}", e)))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| SpendtrackError::Store(format!("Failed to sync temp file: {}", e)))?;
    temp.persist(path)
        .map_err(|e| SpendtrackError::Store(format!("Failed to rename temp file: {}", e.error)))?;
    Ok(())
}

/// Read and decode a JSON file under a shared lock.
///
/// A missing file is `Ok(None)`; unreadable or corrupt content is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let lock = open_lock(path)?;
    lock.lock_shared()
        .map_err(|e| SpendtrackError::Store(format!("Failed to acquire read lock: {}", e)))?;
    let result = load(path);
    let _ = lock.unlock();
    result
}

/// Load, modify and save a JSON file while holding its exclusive lock.
///
/// `update` receives the current value (`None` if the file does not exist)
/// and returns the value to save plus a result for the caller. If `update`
/// fails nothing is written.
pub fn update_json<T, R, F>(path: &Path, update: F) -> Result<R>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(Option<T>) -> Result<(T, R)>,
{
    let lock = open_lock(path)?;
    lock.lock_exclusive()
        .map_err(|e| SpendtrackError::Store(format!("Failed to acquire write lock: {}", e)))?;

    let result = load(path)
        .and_then(update)
        .and_then(|(value, out)| store(path, &value).map(|_| out));

    let _ = lock.unlock();
    result
}
