//! SortCriterion and OrderedSequence - chainable primary + tie-break sorts.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Sort direction for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// An ordering rule over `T`: a typed key extractor plus a direction.
///
/// Applied first via [`SortCriterion::apply_ordering`], then chained as a
/// tie-break via [`OrderedSequence::then`]. All sorts are stable, so
/// entities that compare equal under every applied criterion keep their
/// input order across repeated calls. Criteria compare by identity the
/// same way predicates do: clones are duplicates, fresh constructions
/// are not.
pub struct SortCriterion<T> {
    compare_keys: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
    direction: Direction,
}

impl<T> SortCriterion<T> {
    /// Build a criterion from a key extractor and a direction.
    pub fn new<K, F>(key: F, direction: Direction) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            compare_keys: Arc::new(move |a, b| key(a).cmp(&key(b))),
            direction,
        }
    }

    /// Ascending criterion over the extracted key's natural order.
    pub fn ascending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::new(key, Direction::Ascending)
    }

    /// Descending criterion, reversing the key's natural order.
    pub fn descending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::new(key, Direction::Descending)
    }

    /// The criterion's direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare two entities under this criterion, direction applied.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let natural = (self.compare_keys)(a, b);
        match self.direction {
            Direction::Ascending => natural,
            Direction::Descending => natural.reverse(),
        }
    }

    /// Apply this criterion as the primary ordering of an unordered sequence.
    pub fn apply_ordering(&self, mut items: Vec<T>) -> OrderedSequence<T> {
        items.sort_by(|a, b| self.compare(a, b));
        OrderedSequence {
            items,
            criteria: vec![self.clone()],
        }
    }

    /// Whether `other` is a clone of this criterion with the same direction.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.compare_keys, &other.compare_keys)
            && self.direction == other.direction
    }
}

impl<T> Clone for SortCriterion<T> {
    fn clone(&self) -> Self {
        Self {
            compare_keys: Arc::clone(&self.compare_keys),
            direction: self.direction,
        }
    }
}

impl<T> fmt::Debug for SortCriterion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortCriterion")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// A sequence already ordered by one or more criteria.
///
/// Further criteria chained with [`OrderedSequence::then`] refine ties
/// under the criteria applied so far without disturbing their order.
pub struct OrderedSequence<T> {
    items: Vec<T>,
    criteria: Vec<SortCriterion<T>>,
}

impl<T> OrderedSequence<T> {
    /// Chain a tie-break criterion onto the existing ordering.
    pub fn then(self, criterion: &SortCriterion<T>) -> Self {
        let Self {
            mut items,
            mut criteria,
        } = self;
        criteria.push(criterion.clone());
        items.sort_by(|a, b| {
            criteria
                .iter()
                .map(|c| c.compare(a, b))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Self { items, criteria }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the sequence, yielding the ordered items.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
