//! Session - the staging buffer shared by a unit of work's repositories.

use std::sync::{Arc, Mutex};

use crate::store::{RecordStore, StagedWrite, StoreError};

/// One transactional session: a handle to the store plus the writes staged
/// against it. Owned by a [`UnitOfWork`](super::UnitOfWork); repositories
/// share it and never outlive their unit of work in practice.
pub(crate) struct Session {
    store: Arc<dyn RecordStore>,
    staged: Mutex<Vec<StagedWrite>>,
}

impl Session {
    pub(crate) fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            staged: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Stage a write for the next commit.
    pub(crate) fn stage(&self, write: StagedWrite) -> Result<(), StoreError> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| StoreError::LockPoisoned("stage"))?;
        staged.push(write);
        Ok(())
    }

    /// Take everything staged since the last drain.
    pub(crate) fn drain(&self) -> Result<Vec<StagedWrite>, StoreError> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| StoreError::LockPoisoned("drain"))?;
        Ok(std::mem::take(&mut *staged))
    }

    /// Discard everything staged since the last drain.
    pub(crate) fn discard(&self) -> Result<(), StoreError> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| StoreError::LockPoisoned("discard"))?;
        staged.clear();
        Ok(())
    }
}
