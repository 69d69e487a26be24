//! Typed documents over the raw store.
//!
//! A [`Document`] is any serde type that knows its collection, its id,
//! and where its version lives. [`StoreExt`] adds typed CRUD on top of
//! any [`KeyValueStore`] so handlers never touch raw JSON.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{KeyValueStore, StoreError};

/// A typed, versioned document.
///
/// The version is part of the document itself (it is persisted and
/// wire-visible), but it is *owned by the store*: callers never set it,
/// they carry forward the value they read and let the store bump it on
/// an accepted write.
pub trait Document: Serialize + DeserializeOwned + Send {
    /// Key prefix for this document type, e.g. `"game_state"`.
    const COLLECTION: &'static str;

    /// The document's unique id within its collection.
    fn id(&self) -> &str;

    /// The version this document was read at.
    fn version(&self) -> u64;

    /// Storage key for an id in this collection.
    fn key_for(id: &str) -> String {
        format!("{}:{}", Self::COLLECTION, id)
    }

    /// This document's storage key.
    fn key(&self) -> String {
        Self::key_for(self.id())
    }
}

/// Typed CRUD over any [`KeyValueStore`].
///
/// Blanket-implemented, so a handler generic over `S: KeyValueStore`
/// gets these for free.
pub trait StoreExt: KeyValueStore {
    /// Creates a document and returns it as stored (version 1).
    async fn insert<T: Document>(&self, doc: &T) -> Result<T, StoreError> {
        let value = serde_json::to_value(doc)?;
        let stored = self.put_new(&doc.key(), value).await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Fetches a document by id.
    async fn fetch<T: Document>(&self, id: &str) -> Result<T, StoreError> {
        let value = self.get(&T::key_for(id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Commits a mutation through the compare-and-swap protocol.
    ///
    /// The expected version is the one recorded in `doc` — i.e. the
    /// version the caller fetched before mutating. On acceptance the
    /// store has incremented it; the returned document carries the new
    /// version. On [`StoreError::VersionConflict`] the caller re-fetches
    /// and decides whether the mutation still applies.
    async fn commit<T: Document>(&self, doc: &T) -> Result<T, StoreError> {
        let value = serde_json::to_value(doc)?;
        let stored = self.update(&doc.key(), doc.version(), value).await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Deletes a document by id.
    async fn remove<T: Document>(&self, id: &str) -> Result<(), StoreError> {
        self.delete(&T::key_for(id)).await
    }
}

impl<S: KeyValueStore> StoreExt for S {}
