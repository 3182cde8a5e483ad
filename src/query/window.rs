//! Result windowing: `_start`/`_end` slices and `_page`/`_limit` pages.

use super::descriptor::QueryDescriptor;

/// The slice of a filtered result set that is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// `[start, end)`, either bound optional
    Slice { start: Option<usize>, end: Option<usize> },
    /// `[(page - 1) * limit, page * limit)`
    Page { page: usize, limit: usize },
    /// `[0, limit)`
    Limit(usize),
    /// Everything
    All,
}

impl Window {
    /// Pick the window a query asks for.
    ///
    /// Precedence: slice bounds, then page and limit together, then a
    /// bare limit. A page without a limit selects everything.
    pub fn of(query: &QueryDescriptor) -> Self {
        if query.start.is_some() || query.end.is_some() {
            return Window::Slice {
                start: query.start,
                end: query.end,
            };
        }

        match (query.page, query.limit) {
            (Some(page), Some(limit)) => Window::Page { page, limit },
            (None, Some(limit)) => Window::Limit(limit),
            _ => Window::All,
        }
    }

    /// Index range into a sequence of `len` items, clamped to bounds.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let (start, end) = match *self {
            Window::Slice { start, end } => (start.unwrap_or(0), end.unwrap_or(len)),
            Window::Page { page, limit } => {
                let start = page.saturating_sub(1).saturating_mul(limit);
                (start, start.saturating_add(limit))
            }
            Window::Limit(limit) => (0, limit),
            Window::All => (0, len),
        };

        let end = end.min(len);
        start.min(end)..end
    }

    /// Apply the window to an owned result set.
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let range = self.range(items.len());
        items.truncate(range.end);
        items.drain(..range.start);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_slice_defaults() {
        let window = Window::Slice {
            start: Some(20),
            end: None,
        };
        assert_eq!(window.apply(numbers(25)), vec![20, 21, 22, 23, 24]);

        let window = Window::Slice {
            start: None,
            end: Some(2),
        };
        assert_eq!(window.apply(numbers(25)), vec![0, 1]);
    }

    #[test]
    fn test_inverted_slice_is_empty() {
        let window = Window::Slice {
            start: Some(5),
            end: Some(2),
        };
        assert!(window.apply(numbers(10)).is_empty());
    }

    #[test]
    fn test_page_window() {
        let window = Window::Page { page: 2, limit: 10 };
        assert_eq!(window.apply(numbers(25)), (10..20).collect::<Vec<_>>());

        let window = Window::Page { page: 3, limit: 10 };
        assert_eq!(window.apply(numbers(25)), (20..25).collect::<Vec<_>>());

        let window = Window::Page { page: 9, limit: 10 };
        assert!(window.apply(numbers(25)).is_empty());
    }

    #[test]
    fn test_limit_only() {
        assert_eq!(Window::Limit(3).apply(numbers(25)), vec![0, 1, 2]);
        assert_eq!(Window::Limit(30).apply(numbers(2)), vec![0, 1]);
    }

    #[test]
    fn test_precedence() {
        let query = QueryDescriptor {
            page: Some(2),
            limit: Some(10),
            start: Some(0),
            ..Default::default()
        };
        assert_eq!(
            Window::of(&query),
            Window::Slice {
                start: Some(0),
                end: None
            }
        );

        let query = QueryDescriptor {
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(Window::of(&query), Window::All);
    }
}
