//! UnitOfWork - one session, memoized repositories, one atomic commit.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::domain::{Article, Comment, User, Visitor};
use crate::store::{Record, RecordStore, StoreError};

use super::{Repository, Session};

/// Aggregates one repository per entity type over a single session.
///
/// Created per logical operation. Repositories are lazily constructed and
/// memoized on first access. `commit` applies everything staged since the
/// last commit atomically; dropping the unit of work discards whatever was
/// never committed. One instance belongs to one logical operation - it is
/// not meant to be shared across concurrent operations.
pub struct UnitOfWork {
    session: Arc<Session>,
    comments: OnceLock<Repository<Comment>>,
    users: OnceLock<Repository<User>>,
    articles: OnceLock<Repository<Article>>,
    visitors: OnceLock<Repository<Visitor>>,
}

impl UnitOfWork {
    /// Open a unit of work over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            session: Arc::new(Session::new(store)),
            comments: OnceLock::new(),
            users: OnceLock::new(),
            articles: OnceLock::new(),
            visitors: OnceLock::new(),
        }
    }

    pub fn comments(&self) -> &Repository<Comment> {
        self.comments
            .get_or_init(|| Repository::new(Arc::clone(&self.session)))
    }

    pub fn users(&self) -> &Repository<User> {
        self.users
            .get_or_init(|| Repository::new(Arc::clone(&self.session)))
    }

    pub fn articles(&self) -> &Repository<Article> {
        self.articles
            .get_or_init(|| Repository::new(Arc::clone(&self.session)))
    }

    pub fn visitors(&self) -> &Repository<Visitor> {
        self.visitors
            .get_or_init(|| Repository::new(Arc::clone(&self.session)))
    }

    /// A non-memoized repository for any other record type sharing this
    /// session. Useful for callers that bring their own entities to the
    /// query layer.
    pub fn repository_for<T: Record>(&self) -> Repository<T> {
        Repository::new(Arc::clone(&self.session))
    }

    /// Persist everything staged since the last commit as one atomic
    /// batch. A commit with nothing staged does not touch the store.
    /// May be called repeatedly over the life of the unit of work.
    pub fn commit(&self) -> Result<(), StoreError> {
        let batch = self.session.drain()?;
        if batch.is_empty() {
            return Ok(());
        }
        let writes = batch.len();
        self.session.store().apply(batch)?;
        debug!(writes, "unit of work committed");
        Ok(())
    }

    /// Discard everything staged since the last commit.
    pub fn rollback(&self) -> Result<(), StoreError> {
        self.session.discard()
    }
}
