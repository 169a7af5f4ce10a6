mod clock;
mod comments;
mod domain;
mod query;
mod repository;
mod store;

pub use clock::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
pub use comments::{
    BasicTextValidator, CommentService, DomainError, ModerationPolicy, TextRejected,
    TextValidator, ThreadNode,
};
pub use domain::{Article, Comment, CommentEdit, User, Visitor, Vote};
pub use query::{Direction, Include, OrderedSequence, Predicate, QuerySpec, SortCriterion};
pub use repository::{Repository, UnitOfWork};
pub use store::{InMemoryStore, Record, RecordStore, StagedWrite, StoreError, WriteOp};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
