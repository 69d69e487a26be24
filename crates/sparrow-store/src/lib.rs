//! Optimistic-concurrency document store for the Sparrow backend.
//!
//! Game state is mutated by independently-invoked, stateless request
//! handlers racing against each other — one invocation per player
//! action, no shared memory between them. There is no lock manager and
//! no leader: the only correctness primitive is a conditional
//! (compare-and-swap) write on a per-document version counter. Two
//! writers that both read version `V` both attempt to write `V + 1`;
//! exactly one write is accepted, the other gets
//! [`StoreError::VersionConflict`] and must re-read before retrying.
//!
//! # Key types
//!
//! - [`KeyValueStore`] — the CAS capability any conditional-write store
//!   can implement
//! - [`Document`] — typed documents with an embedded version field
//! - [`StoreExt`] — typed insert/fetch/commit/remove over any store
//! - [`MemoryStore`] — in-process reference implementation

#![allow(async_fn_in_trait)]

mod document;
mod error;
mod memory;
mod store;

pub use document::{Document, StoreExt};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, VERSION_FIELD};
