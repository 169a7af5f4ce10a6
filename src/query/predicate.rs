//! Predicate - a shared, first-class filter over an entity type.

use std::fmt;
use std::sync::Arc;

/// A filter predicate over `T`.
///
/// Predicates are cheap to clone (the closure is shared) and compare by
/// closure identity: clones of one predicate are the same filter, two
/// separately constructed predicates are distinct even when their logic
/// matches. Query specifications use that identity to drop duplicates.
pub struct Predicate<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    /// Wrap a closure as a predicate.
    pub fn new(test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Arc::new(test),
        }
    }

    /// Evaluate the predicate against one entity.
    pub fn test(&self, entity: &T) -> bool {
        (self.test)(entity)
    }

    /// Whether `other` is a clone of this predicate.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.test, &other.test)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
