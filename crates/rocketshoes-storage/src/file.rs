//! # File Storage
//!
//! One file per key inside a data directory, the on-disk counterpart of the
//! browser's local storage.
//!
//! ## Layout
//! ```text
//! <data dir>/
//! ├── %40RocketShoes%3Acart.json      ◄── key "@RocketShoes:cart"
//! └── %40RocketShoes%3Acart.json.tmp  ◄── only while a write is in flight
//! ```
//!
//! Keys are percent-encoded so any key maps to exactly one safe file name.
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write leaves the previous cart intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::PersistenceLayer;
use crate::error::{StorageError, StorageResult};

/// Directory-backed key-value storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir.display().to_string(), e))?;
        debug!(?dir, "File storage opened");
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

impl PersistenceLayer for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let path = self.path_for(key);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;
        Ok(())
    }
}

/// Percent-encodes everything outside `[A-Za-z0-9_.-]`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("@RocketShoes:cart"), "%40RocketShoes%3Acart");
        assert_eq!(encode_key("plain_key-1.0"), "plain_key-1.0");
        assert_eq!(encode_key("../escape"), "..%2Fescape");
    }

    #[test]
    fn test_read_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.read("@RocketShoes:cart").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        storage.write("@RocketShoes:cart", "[]").unwrap();
        storage.write("@RocketShoes:cart", "[{\"productId\":1,\"amount\":1}]").unwrap();

        assert_eq!(
            storage.read("@RocketShoes:cart").unwrap().as_deref(),
            Some("[{\"productId\":1,\"amount\":1}]")
        );
        assert!(storage.path_for("@RocketShoes:cart").exists());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::open(dir.path())
            .unwrap()
            .write("cart", "[]")
            .unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.read("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert!(storage.dir().is_dir());
    }
}
