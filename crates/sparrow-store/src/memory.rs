//! In-process store implementation.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::{KeyValueStore, StoreError, VERSION_FIELD};

/// An in-memory [`KeyValueStore`].
///
/// The whole map sits behind one async mutex, which makes every
/// operation atomic — the same guarantee a conditional-write store
/// provides per key. Used by every test in the workspace and as the
/// reference semantics for a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items. Test helper.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn put_new(&self, key: &str, item: Value) -> Result<Value, StoreError> {
        let mut items = self.items.lock().await;
        if items.contains_key(key) {
            return Err(StoreError::AlreadyExists(key.to_string()));
        }
        let stored = with_version(key, item, 1)?;
        items.insert(key.to_string(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, key: &str) -> Result<Value, StoreError> {
        self.items
            .lock()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn update(
        &self,
        key: &str,
        expected_version: u64,
        item: Value,
    ) -> Result<Value, StoreError> {
        let mut items = self.items.lock().await;
        let current = items
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let found = current
            .get(VERSION_FIELD)
            .and_then(Value::as_u64)
            .ok_or_else(|| StoreError::MissingVersion(key.to_string()))?;
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                key: key.to_string(),
                expected: expected_version,
                found,
            });
        }

        let stored = with_version(key, item, expected_version + 1)?;
        items.insert(key.to_string(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

/// Stamps the store-owned version onto an item, rejecting non-objects.
fn with_version(key: &str, mut item: Value, version: u64) -> Result<Value, StoreError> {
    let obj = item
        .as_object_mut()
        .ok_or_else(|| StoreError::NotAnObject(key.to_string()))?;
    obj.insert(VERSION_FIELD.to_string(), version.into());
    Ok(item)
}
