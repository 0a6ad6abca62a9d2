/// Pagination and search state for the word list.
///
/// Owned exclusively by the controller and recomputed after every
/// successful list fetch; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub search_term: String,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            search_term: String::new(),
        }
    }

    pub fn offset_for(&self, page: u32) -> u32 {
        (page.max(1) - 1) * self.page_size
    }

    /// Replaces page, search term, and derived total in one step, so the
    /// state always reflects exactly one completed fetch.
    pub fn apply_fetch(&mut self, page: u32, search: &str, total: u64) {
        self.total_pages = total_pages(total, self.page_size);
        self.page = page.clamp(1, self.total_pages);
        self.search_term = search.to_string();
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `max(1, ceil(total / page_size))`; an empty result set still has one
/// (empty) page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
