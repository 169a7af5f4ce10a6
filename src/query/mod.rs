//! Query specification - composable filters, ordered sorting with
//! tie-breaks, eager-load hints, and pagination.
//!
//! A [`QuerySpec`] is built empty, filled incrementally, and consumed
//! exactly once by a repository read. [`SortCriterion`] values chain into
//! primary + tie-break ordering over an [`OrderedSequence`].
//!
//! ## Example
//!
//! ```ignore
//! let mut spec = QuerySpec::new();
//! spec.add_filter(Predicate::new(|c: &Comment| !c.deleted));
//! spec.add_sort_criterion(SortCriterion::descending(|c: &Comment| c.created_at));
//! spec.add_sort_criterion(SortCriterion::ascending(|c: &Comment| c.id));
//! spec.set_take(20);
//! let page = uow.comments().query(spec)?;
//! ```

mod predicate;
mod sort;
mod spec;

pub use predicate::Predicate;
pub use sort::{Direction, OrderedSequence, SortCriterion};
pub use spec::{Include, QuerySpec};
