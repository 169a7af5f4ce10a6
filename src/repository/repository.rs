//! Repository - typed reads and staged writes for one entity collection.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::query::QuerySpec;
use crate::store::{Record, StagedWrite, StoreError, WriteOp};

use super::Session;

/// Typed access to one entity collection through a shared session.
///
/// Reads return detached snapshots; mutating a snapshot has no effect on
/// the store until it is routed back through [`update`](Repository::update)
/// and the owning unit of work commits. Staged writes are invisible to
/// every reader (this repository included) until that commit.
pub struct Repository<T: Record> {
    session: Arc<Session>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Record> Repository<T> {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    fn decode(bytes: &[u8]) -> Result<T, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn encode(entity: &T) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(entity).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Get one entity by id. Returns None if absent.
    pub fn get_by_id(&self, id: u64) -> Result<Option<T>, StoreError> {
        match self.session.store().fetch(T::COLLECTION, id)? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Materialize the whole collection in ascending id order.
    pub fn all(&self) -> Result<Vec<T>, StoreError> {
        self.session
            .store()
            .scan(T::COLLECTION)?
            .iter()
            .map(|bytes| Self::decode(bytes))
            .collect()
    }

    /// Materialize every entity matching a single ad-hoc predicate.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        let mut entities = self.all()?;
        entities.retain(|entity| predicate(entity));
        Ok(entities)
    }

    /// First entity matching the predicate, in id order.
    pub fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>, StoreError> {
        Ok(self.all()?.into_iter().find(|entity| predicate(entity)))
    }

    /// Whether any entity matches the predicate.
    pub fn exists(&self, predicate: impl Fn(&T) -> bool) -> Result<bool, StoreError> {
        Ok(self.all()?.iter().any(|entity| predicate(entity)))
    }

    /// Count of entities matching the predicate.
    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> Result<usize, StoreError> {
        Ok(self.all()?.iter().filter(|entity| predicate(entity)).count())
    }

    /// Execute a query specification: AND of all filters, then sort
    /// (primary criterion plus tie-breaks in the order added), then skip,
    /// then take - strictly in that order. Eager-load hints are part of
    /// the consumed contract; records materialize whole here, so a lazier
    /// backend is where they earn their keep.
    pub fn query(&self, spec: QuerySpec<T>) -> Result<Vec<T>, StoreError> {
        let mut entities = self.all()?;
        entities.retain(|entity| spec.matches(entity));

        let mut criteria = spec.sort_criteria().iter();
        let entities = match criteria.next() {
            Some(primary) => {
                let mut ordered = primary.apply_ordering(entities);
                for criterion in criteria {
                    ordered = ordered.then(criterion);
                }
                ordered.into_vec()
            }
            None => entities,
        };

        let page = entities.into_iter().skip(spec.skip());
        Ok(match spec.take() {
            0 => page.collect(),
            take => page.take(take).collect(),
        })
    }

    /// Stage an insert. An entity carrying no id (0) gets the next id from
    /// the store's sequence, reflected back before staging.
    pub fn insert(&self, entity: &mut T) -> Result<(), StoreError> {
        if entity.id() == 0 {
            let id = self.session.store().reserve_id(T::COLLECTION)?;
            entity.set_id(id);
        }
        let bytes = Self::encode(entity)?;
        self.session.stage(StagedWrite {
            collection: T::COLLECTION,
            op: WriteOp::Insert {
                id: entity.id(),
                bytes,
            },
        })
    }

    /// Stage an update, attaching the entity whether or not it was read
    /// through this repository.
    pub fn update(&self, entity: &T) -> Result<(), StoreError> {
        let bytes = Self::encode(entity)?;
        self.session.stage(StagedWrite {
            collection: T::COLLECTION,
            op: WriteOp::Update {
                id: entity.id(),
                bytes,
            },
        })
    }

    /// Stage a removal.
    pub fn delete(&self, entity: &T) -> Result<(), StoreError> {
        self.session.stage(StagedWrite {
            collection: T::COLLECTION,
            op: WriteOp::Delete { id: entity.id() },
        })
    }

    /// Resolve an id and stage its removal. Fails with
    /// [`StoreError::NotFound`] when the id is absent.
    pub fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        match self.get_by_id(id)? {
            Some(entity) => self.delete(&entity),
            None => Err(StoreError::NotFound {
                collection: T::COLLECTION.to_string(),
                id,
            }),
        }
    }
}
