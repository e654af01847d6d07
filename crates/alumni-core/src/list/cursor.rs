use crate::Result;
use crate::error::InvalidInputError;

/// Server-side pagination position of a list.
///
/// `current_page` counts pages already fetched (0 before the first fetch),
/// so the next request asks for `current_page + 1`. Whether another page
/// exists is decided with a ceiling boundary: once
/// `current_page * page_size >= total` the list is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    page_size: u32,
    total: Option<u64>,
}

impl PaginationState {
    /// Create a cursor that has not fetched anything yet.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(InvalidInputError::PageSize.into());
        }
        Ok(Self {
            current_page: 0,
            page_size,
            total: None,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Server-reported size of the whole collection, once known.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// The page the next load-more should request.
    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    /// Number of pages the collection spans, once the total is known.
    pub fn total_pages(&self) -> Option<u64> {
        self.total.map(|t| t.div_ceil(u64::from(self.page_size)))
    }

    pub fn has_more(&self) -> bool {
        match self.total {
            None => true,
            Some(total) => u64::from(self.current_page) * u64::from(self.page_size) < total,
        }
    }

    /// Record one more fetched page.
    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = Some(total);
    }

    /// Back to the unfetched state, as on refresh.
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.total = None;
    }
}
