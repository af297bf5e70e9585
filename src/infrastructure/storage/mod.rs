use crate::core::errors::ClientError;
use async_trait::async_trait;

/// String key-value storage that survives restarts.
#[async_trait]
pub trait DurableStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ClientError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError>;
    /// Removing a missing key succeeds.
    async fn remove_item(&self, key: &str) -> Result<(), ClientError>;
}

pub mod file;
pub mod in_memory;
