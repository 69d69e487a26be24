//! The compare-and-swap store capability.

use serde_json::Value;

use crate::StoreError;

/// Name of the version field inside every stored item.
pub const VERSION_FIELD: &str = "version";

/// A key-value store with conditional writes.
///
/// This is the only mechanism by which shared documents are mutated:
/// wall-cursor advances, hand updates, claim appends, and roster changes
/// all go through [`update`](Self::update)'s compare-and-swap. Direct
/// unguarded writes would break the version invariant (every accepted
/// mutation increments `version` by exactly 1).
///
/// Any store with a conditional-write primitive and read-after-write
/// consistency per key can implement this — the in-process
/// [`MemoryStore`](crate::MemoryStore) is the reference; a DynamoDB
/// binding would map [`StoreError::VersionConflict`] from the provider's
/// conditional-check failure.
pub trait KeyValueStore: Send + Sync {
    /// Creates a new item under `key`. The store forces the item's
    /// `version` to 1 and returns the stored item.
    ///
    /// # Errors
    /// [`StoreError::AlreadyExists`] if the key is taken,
    /// [`StoreError::NotAnObject`] if the item cannot carry a version.
    async fn put_new(&self, key: &str, item: Value) -> Result<Value, StoreError>;

    /// Reads the item under `key`.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if no item exists.
    async fn get(&self, key: &str) -> Result<Value, StoreError>;

    /// Conditional write: succeeds only if the stored item's `version`
    /// still equals `expected_version`. The accepted item is written
    /// with `version = expected_version + 1` and returned.
    ///
    /// The store performs no retry on conflict — retry policy belongs
    /// to the caller, which must re-read first.
    ///
    /// # Errors
    /// [`StoreError::VersionConflict`] on a stale `expected_version`,
    /// [`StoreError::NotFound`] if the key vanished.
    async fn update(
        &self,
        key: &str,
        expected_version: u64,
        item: Value,
    ) -> Result<Value, StoreError>;

    /// Deletes the item under `key`.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if no item exists.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
