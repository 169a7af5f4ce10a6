//! QuerySpec - filters, sort criteria, eager-load hints, and pagination.

use std::fmt;
use std::marker::PhantomData;

use super::{Predicate, SortCriterion};

/// An eager-load hint naming a related property to fetch alongside the
/// primary entity. Duplicates compare by name.
pub struct Include<T> {
    name: String,
    _entity: PhantomData<fn(&T)>,
}

impl<T> Include<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _entity: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Include<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> PartialEq for Include<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Include<T> {}

impl<T> fmt::Debug for Include<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Include").field(&self.name).finish()
    }
}

/// A specification of one repository read: which entities (filters, ANDed),
/// in what order (criteria, primary then tie-breaks), with which related
/// data (includes), and which page (skip/take, take 0 = unbounded).
///
/// Built empty, filled via the `add_*`/`set_*` operations, and consumed by
/// value by `Repository::query`. Adding an element already present (a clone
/// of a stored predicate/criterion, an include with a stored name) is
/// silently ignored.
pub struct QuerySpec<T> {
    filters: Vec<Predicate<T>>,
    sort_criteria: Vec<SortCriterion<T>>,
    includes: Vec<Include<T>>,
    skip: usize,
    take: usize,
}

impl<T> Default for QuerySpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QuerySpec<T> {
    /// Create an empty specification: no filters, no ordering, no includes,
    /// skip 0, take unbounded.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_criteria: Vec::new(),
            includes: Vec::new(),
            skip: 0,
            take: 0,
        }
    }

    /// Add a filter predicate. All filters are ANDed at evaluation.
    pub fn add_filter(&mut self, predicate: Predicate<T>) {
        if !self.filters.iter().any(|f| f.same_as(&predicate)) {
            self.filters.push(predicate);
        }
    }

    /// Add a sort criterion; the first added is primary, later ones break ties.
    pub fn add_sort_criterion(&mut self, criterion: SortCriterion<T>) {
        if !self.sort_criteria.iter().any(|c| c.same_as(&criterion)) {
            self.sort_criteria.push(criterion);
        }
    }

    /// Add an eager-load hint.
    pub fn include_property(&mut self, include: Include<T>) {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
    }

    /// Set how many matching entities to skip before the page starts.
    pub fn set_skip(&mut self, skip: usize) {
        self.skip = skip;
    }

    /// Set the page size. 0 means unbounded.
    pub fn set_take(&mut self, take: usize) {
        self.take = take;
    }

    pub fn filters(&self) -> &[Predicate<T>] {
        &self.filters
    }

    pub fn sort_criteria(&self) -> &[SortCriterion<T>] {
        &self.sort_criteria
    }

    pub fn includes(&self) -> &[Include<T>] {
        &self.includes
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn take(&self) -> usize {
        self.take
    }

    /// Whether an entity passes every filter.
    pub fn matches(&self, entity: &T) -> bool {
        self.filters.iter().all(|f| f.test(entity))
    }
}

impl<T> fmt::Debug for QuerySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpec")
            .field("filters", &self.filters.len())
            .field("sort_criteria", &self.sort_criteria.len())
            .field("includes", &self.includes)
            .field("skip", &self.skip)
            .field("take", &self.take)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_unbounded() {
        let spec: QuerySpec<i32> = QuerySpec::new();
        assert!(spec.filters().is_empty());
        assert!(spec.sort_criteria().is_empty());
        assert!(spec.includes().is_empty());
        assert_eq!(spec.skip(), 0);
        assert_eq!(spec.take(), 0);
    }

    #[test]
    fn duplicate_filter_stored_once() {
        let mut spec: QuerySpec<i32> = QuerySpec::new();
        let positive = Predicate::new(|n: &i32| *n > 0);

        spec.add_filter(positive.clone());
        spec.add_filter(positive.clone());
        assert_eq!(spec.filters().len(), 1);

        // Same logic, different closure: a distinct filter.
        spec.add_filter(Predicate::new(|n: &i32| *n > 0));
        assert_eq!(spec.filters().len(), 2);
    }

    #[test]
    fn duplicate_sort_criterion_ignored() {
        let mut spec: QuerySpec<i32> = QuerySpec::new();
        let natural = SortCriterion::ascending(|n: &i32| *n);

        spec.add_sort_criterion(natural.clone());
        spec.add_sort_criterion(natural);
        assert_eq!(spec.sort_criteria().len(), 1);
    }

    #[test]
    fn duplicate_include_ignored_by_name() {
        let mut spec: QuerySpec<i32> = QuerySpec::new();
        spec.include_property(Include::new("votes"));
        spec.include_property(Include::new("votes"));
        spec.include_property(Include::new("replies"));
        assert_eq!(spec.includes().len(), 2);
    }

    #[test]
    fn matches_ands_all_filters() {
        let mut spec: QuerySpec<i32> = QuerySpec::new();
        spec.add_filter(Predicate::new(|n: &i32| *n > 0));
        spec.add_filter(Predicate::new(|n: &i32| n % 2 == 0));

        assert!(spec.matches(&4));
        assert!(!spec.matches(&3));
        assert!(!spec.matches(&-2));
    }
}
