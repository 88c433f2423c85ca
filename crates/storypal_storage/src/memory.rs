//! In-memory key-value backend.

use crate::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use storypal_error::StorypalResult;
use tokio::sync::RwLock;

/// Volatile backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Whether nothing has been written.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn read(&self, key: &str) -> StorypalResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StorypalResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
