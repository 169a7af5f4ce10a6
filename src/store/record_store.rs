//! RecordStore - the persistence contract consumed by sessions.

use super::StoreError;

/// A single staged mutation, type-erased to record bytes.
#[derive(Debug, Clone)]
pub struct StagedWrite {
    pub collection: &'static str,
    pub op: WriteOp,
}

/// The mutation kind carried by a [`StagedWrite`].
#[derive(Debug, Clone)]
pub enum WriteOp {
    Insert { id: u64, bytes: Vec<u8> },
    Update { id: u64, bytes: Vec<u8> },
    Delete { id: u64 },
}

impl WriteOp {
    /// The record id this operation targets.
    pub fn id(&self) -> u64 {
        match self {
            WriteOp::Insert { id, .. } | WriteOp::Update { id, .. } | WriteOp::Delete { id } => {
                *id
            }
        }
    }
}

/// Abstract record storage.
///
/// Object-safe so a session can hold an `Arc<dyn RecordStore>`; backends
/// range from the in-memory store shipped here to a real database adapter.
pub trait RecordStore: Send + Sync {
    /// Fetch one record's bytes by collection and id. Returns None if absent.
    fn fetch(&self, collection: &str, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Scan a whole collection in ascending id order.
    fn scan(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError>;

    /// Reserve the next identifier in a collection's sequence.
    fn reserve_id(&self, collection: &str) -> Result<u64, StoreError>;

    /// Apply a batch of staged writes atomically: either every write in the
    /// batch is applied, or the batch is rejected and nothing changes.
    fn apply(&self, batch: Vec<StagedWrite>) -> Result<(), StoreError>;
}
