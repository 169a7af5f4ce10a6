//! Data access - repositories and the unit of work.
//!
//! A [`UnitOfWork`] owns one session over a shared [`RecordStore`] and
//! hands out one memoized [`Repository`] per entity type. Repositories
//! stage mutations on the session; `UnitOfWork::commit` applies everything
//! staged since the last commit as one atomic batch.
//!
//! [`RecordStore`]: crate::store::RecordStore

mod repository;
mod session;
mod unit_of_work;

pub(crate) use session::Session;

pub use repository::Repository;
pub use unit_of_work::UnitOfWork;
