//! Filesystem access under the serving directory.
//!
//! Files written by POST are the only persisted state; there is no index or
//! metadata. Nothing here is locked, so two concurrent writes to the same name
//! race at the filesystem layer and the last one to finish wins.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no such file: {0}")]
    NotFound(String),

    #[error("file name escapes the serving directory: {0}")]
    InvalidName(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle on the serving directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `name` under the root. Only normal components are accepted.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(name);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if name.is_empty() || !is_plain {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Size of the file in bytes, or `NotFound` if it does not exist.
    pub async fn stat(&self, name: &str) -> Result<u64, StorageError> {
        let path = self.resolve(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    pub async fn read_all(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::read(&path)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }

    /// Creates or truncates the file and writes `bytes` to it.
    pub async fn write_all(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }
}
