use crate::error::CoreError;
use serde::Serialize;

/// Fixed number of questions on every page.
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Builds a request for `number` with the standard page size.
    pub fn new(number: u32) -> Result<Self, CoreError> {
        Self::with_size(number, QUESTIONS_PER_PAGE)
    }

    pub fn with_size(number: u32, size: u32) -> Result<Self, CoreError> {
        if number == 0 {
            return Err(CoreError::InvalidInput(
                "page".to_string(),
                "page numbers start at 1".to_string(),
            ));
        }
        if size == 0 {
            return Err(CoreError::InvalidInput(
                "page size".to_string(),
                "must be positive".to_string(),
            ));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Slices an already ordered sequence down to this page.
    ///
    /// A page past the end yields an empty `items` with the full `total`.
    pub fn slice<T>(&self, ordered: Vec<T>) -> Page<T> {
        let total = ordered.len() as i64;
        let items = ordered
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(self.size as usize)
            .collect();
        Page { items, total }
    }
}

/// One page of results together with the size of the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_rejected() {
        assert!(PageRequest::new(0).is_err());
        assert!(PageRequest::with_size(1, 0).is_err());
    }

    #[test]
    fn offset_is_one_based() {
        assert_eq!(PageRequest::new(1).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3).unwrap().offset(), 20);
    }

    #[test]
    fn slice_returns_requested_window_and_full_total() {
        let page = PageRequest::new(2).unwrap().slice((1..=25).collect::<Vec<_>>());
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);

        let last = PageRequest::new(3).unwrap().slice((1..=25).collect::<Vec<_>>());
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn slice_past_the_end_is_empty_not_an_error() {
        let page = PageRequest::new(100).unwrap().slice(vec!["a", "b"]);
        assert!(page.is_empty());
        assert_eq!(page.total, 2);
    }
}
