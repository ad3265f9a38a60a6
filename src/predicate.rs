//! Compiled predicate and comparator values.
//!
//! Both wrap an `Arc`'d closure that only captures immutable literals and
//! registry accessors, so they are cheap to clone and safe to call from many
//! threads at once.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A compiled filter: `record -> bool`.
pub struct Predicate<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Predicate {
            test: Arc::new(test),
        }
    }

    /// Returns `true` if the record passes the filter.
    pub fn matches(&self, record: &T) -> bool {
        (self.test)(record)
    }
}

impl<T: 'static> Predicate<T> {
    /// A predicate that accepts every record (the compiled form of an empty query).
    pub fn always() -> Self {
        Predicate::new(|_| true)
    }

    pub fn and(self, other: Predicate<T>) -> Self {
        Predicate::new(move |record| self.matches(record) && other.matches(record))
    }

    pub fn or(self, other: Predicate<T>) -> Self {
        Predicate::new(move |record| self.matches(record) || other.matches(record))
    }

    pub fn negate(self) -> Self {
        Predicate::new(move |record| !self.matches(record))
    }

    /// Keeps the records of `records` that pass, in their original order.
    pub fn filter<'r>(&self, records: impl IntoIterator<Item = &'r T>) -> Vec<&'r T>
    where
        T: 'r,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A compiled multi-key ordering: `(record, record) -> Ordering`.
pub struct Comparator<T> {
    compare: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T> Comparator<T> {
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Comparator {
            compare: Arc::new(compare),
        }
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    /// Sorts in place. `slice::sort_by` is stable, so records equal under
    /// every key keep their relative order.
    pub fn sort(&self, records: &mut [T]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// Stable sort over borrowed records.
    pub fn sort_refs(&self, records: &mut [&T]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

impl<T: 'static> Comparator<T> {
    /// Breaks ties of `self` with `next`.
    pub fn then(self, next: Comparator<T>) -> Self {
        Comparator::new(move |a, b| self.compare(a, b).then_with(|| next.compare(a, b)))
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Comparator {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}
