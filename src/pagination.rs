use serde::{Deserialize, Serialize};

/// Page size applied when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pagination options applied to a repository list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Requested page, 1-based.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

/// A page of items together with the paging metadata returned to clients.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wrap a page of items, deriving `total_pages` from the overall count.
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_derives_total_pages() {
        let page = Paginated::new(vec![1, 2, 3], 27, 3, DEFAULT_ITEMS_PER_PAGE);

        assert_eq!(page.total, 27);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn paginated_handles_empty_result() {
        let page = Paginated::<i32>::new(Vec::new(), 0, 1, DEFAULT_ITEMS_PER_PAGE);

        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
