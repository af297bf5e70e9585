use crate::core::errors::ClientError;
use crate::infrastructure::storage::DurableStorage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local storage. Clones share the same map, so a clone handed to a
/// fresh store behaves like storage that outlived a reload.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl DurableStorage for InMemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.items.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}
