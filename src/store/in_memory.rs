//! InMemoryStore - BTreeMap-backed record store for testing and development.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use super::{RecordStore, StagedWrite, StoreError, WriteOp};

#[derive(Default)]
struct Inner {
    /// collection name -> id-ordered record bytes
    collections: HashMap<String, BTreeMap<u64, Vec<u8>>>,
    /// collection name -> last id handed out
    sequences: HashMap<String, u64>,
    /// successful non-empty batch applications
    commits: usize,
}

/// In-memory record store.
///
/// Cloning shares the underlying storage via Arc, so a test can keep a
/// handle for inspection while handing another to the data access layer.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successfully applied non-empty batches. Lets tests assert
    /// that an operation committed exactly once (or not at all).
    pub fn commit_count(&self) -> usize {
        self.inner.read().map(|inner| inner.commits).unwrap_or(0)
    }

    /// Number of records currently held in a collection.
    pub fn record_count(&self, collection: &str) -> usize {
        self.inner
            .read()
            .map(|inner| inner.collections.get(collection).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }
}

impl RecordStore for InMemoryStore {
    fn fetch(&self, collection: &str, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("fetch"))?;

        Ok(inner
            .collections
            .get(collection)
            .and_then(|records| records.get(&id))
            .cloned())
    }

    fn scan(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("scan"))?;

        Ok(inner
            .collections
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn reserve_id(&self, collection: &str) -> Result<u64, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("reserve_id"))?;

        let next = inner
            .sequences
            .get(collection)
            .copied()
            .unwrap_or(0)
            + 1;
        inner.sequences.insert(collection.to_string(), next);
        Ok(next)
    }

    fn apply(&self, batch: Vec<StagedWrite>) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("apply"))?;

        // Validate the whole batch before touching storage. The overlay
        // tracks presence changes earlier writes in the same batch produce.
        let mut overlay: HashMap<(&str, u64), bool> = HashMap::new();
        for write in &batch {
            let key = (write.collection, write.op.id());
            let present = overlay.get(&key).copied().unwrap_or_else(|| {
                inner
                    .collections
                    .get(write.collection)
                    .is_some_and(|records| records.contains_key(&key.1))
            });

            match write.op {
                WriteOp::Insert { id, .. } if present => {
                    return Err(StoreError::DuplicateId {
                        collection: write.collection.to_string(),
                        id,
                    });
                }
                WriteOp::Update { id, .. } | WriteOp::Delete { id } if !present => {
                    return Err(StoreError::NotFound {
                        collection: write.collection.to_string(),
                        id,
                    });
                }
                _ => {}
            }

            overlay.insert(key, !matches!(write.op, WriteOp::Delete { .. }));
        }

        for write in batch {
            let records = inner
                .collections
                .entry(write.collection.to_string())
                .or_default();
            match write.op {
                WriteOp::Insert { id, bytes } | WriteOp::Update { id, bytes } => {
                    records.insert(id, bytes);
                }
                WriteOp::Delete { id } => {
                    records.remove(&id);
                }
            }
        }

        inner.commits += 1;
        Ok(())
    }
}
