//! Page selection for paginated endpoints.

use serde::{Deserialize, Serialize};

use crate::request::QueryParams;

/// Zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Number of items per page
    pub size: u32,
}

impl PageRequest {
    /// Page size used by listing endpoints.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Page size used by author pages.
    pub const AUTHOR_PAGE_SIZE: u32 = 20;

    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// First page with the author-page size.
    #[must_use]
    pub const fn author_page() -> Self {
        Self::new(0, Self::AUTHOR_PAGE_SIZE)
    }

    /// Returns `page` and `size` as query parameters.
    #[must_use]
    pub fn to_query(self) -> QueryParams {
        QueryParams::new()
            .with("page", self.page)
            .with("size", self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_page() {
        assert_eq!(PageRequest::default(), PageRequest::new(0, 10));
        assert_eq!(PageRequest::author_page().size, 20);
    }

    #[test]
    fn test_query_order() {
        let query = PageRequest::new(2, 5).to_query();
        let pairs: Vec<_> = query.defined().collect();
        assert_eq!(pairs, vec![("page", "2"), ("size", "5")]);
    }
}
