//! Filesystem-backed durable storage.
//!
//! Every key is stored as `<base_dir>/<key>.json`. Keys are fixed names chosen
//! by the stores, never user input.

use crate::core::errors::ClientError;
use crate::infrastructure::storage::DurableStorage;
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: impl AsRef<Path>) -> Self {
        FileStorage {
            base: base.as_ref().to_path_buf(),
        }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }
}

#[async_trait]
impl DurableStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        match tokio::fs::read_to_string(self.item_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::LocalState(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        tokio::fs::create_dir_all(&self.base)
            .await
            .map_err(|e| ClientError::LocalState(format!("Failed to create {}: {}", self.base.display(), e)))?;
        let path = self.item_path(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| ClientError::LocalState(format!("Failed to write {}: {}", key, e)))?;
        debug!("Stored {} at {}", key, path.display());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        match tokio::fs::remove_file(self.item_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::LocalState(format!("Failed to remove {}: {}", key, e))),
        }
    }
}
