//! Storage seam - record trait, staged writes, and the pluggable store.
//!
//! Entities are stored as serialized record bytes keyed by collection name
//! and a store-assigned numeric id. Mutations are staged by a session and
//! handed to the store as one atomic batch.

mod in_memory;
mod record_store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be persisted as records.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "comments", "users").
    /// Maps to a table in SQL, a collection in a document store, a key
    /// prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the store-assigned identifier, or 0 when not yet assigned.
    fn id(&self) -> u64;

    /// Reflects a store-assigned identifier back onto the record.
    fn set_id(&mut self, id: u64);
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A storage lock was poisoned by a panicking writer.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Record bytes could not be (de)serialized.
    #[error("record serialization failed: {0}")]
    Serialization(String),
    /// An insert targeted an id that already exists.
    #[error("duplicate id {id} in {collection}")]
    DuplicateId { collection: String, id: u64 },
    /// An update or delete targeted an id that does not exist.
    #[error("record not found: {collection}:{id}")]
    NotFound { collection: String, id: u64 },
}

pub use in_memory::InMemoryStore;
pub use record_store::{RecordStore, StagedWrite, WriteOp};
