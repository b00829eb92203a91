use serde::Serialize;
use std::ops::Range;

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    /// Page actually shown: past-the-end requests land on the last page.
    pub fn effective_page(&self, total_rows: usize) -> usize {
        let pages = self.total_pages(total_rows);
        if pages == 0 {
            1
        } else {
            self.page.min(pages)
        }
    }

    pub fn range(&self, total_rows: usize) -> Range<usize> {
        let page = self.effective_page(total_rows);
        let start = ((page - 1) * self.page_size).min(total_rows);
        let end = (start + self.page_size).min(total_rows);
        start..end
    }
}
