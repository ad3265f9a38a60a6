//! Offset/limit paging, applied after filtering and ordering.

/// Default page size when `take` is absent.
pub const DEFAULT_TAKE: usize = 30;

/// `skip` and `take` of a request. An absent `take` falls back to a
/// configured default; results are never unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl Page {
    pub fn new(skip: Option<usize>, take: Option<usize>) -> Self {
        Page { skip, take }
    }

    /// Skips, then takes `take` items (or `default_take` when absent).
    pub fn apply<I: IntoIterator>(self, items: I, default_take: usize) -> impl Iterator<Item = I::Item> {
        apply_take(apply_skip(items, self.skip), self.take, default_take)
    }
}

pub fn apply_skip<I: IntoIterator>(items: I, skip: Option<usize>) -> std::iter::Skip<I::IntoIter> {
    items.into_iter().skip(skip.unwrap_or(0))
}

pub fn apply_take<I: IntoIterator>(items: I, take: Option<usize>, default_take: usize) -> std::iter::Take<I::IntoIter> {
    items.into_iter().take(take.unwrap_or(default_take))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_then_take() {
        let page = Page::new(Some(2), Some(1));
        let items: Vec<_> = page.apply(["A", "B", "C", "D"], DEFAULT_TAKE).collect();
        assert_eq!(items, vec!["C"]);
    }

    #[test]
    fn absent_take_uses_default() {
        let items: Vec<_> = Page::default().apply(0..100, 30).collect();
        assert_eq!(items.len(), 30);
        assert_eq!(items.first(), Some(&0));

        let items: Vec<_> = Page::new(Some(95), None).apply(0..100, 30).collect();
        assert_eq!(items, vec![95, 96, 97, 98, 99]);
    }

    #[test]
    fn skip_past_the_end() {
        let items: Vec<i32> = apply_skip(vec![1, 2], Some(5)).collect();
        assert!(items.is_empty());
    }
}
