//! Offset/limit window

/// Limit sentinel meaning "no LIMIT clause"
pub const UNBOUNDED: i64 = -1;

/// Pagination window with normalized bounds
///
/// `offset` is never negative and `limit` is either positive or [`UNBOUNDED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            offset: 0,
            limit: UNBOUNDED,
        }
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset.max(0);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = if limit <= 0 { UNBOUNDED } else { limit };
        self
    }

    /// Page numbers start at 1; a non-positive page size means unbounded
    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        if page_size <= 0 {
            self.offset = 0;
            self.limit = UNBOUNDED;
        } else {
            self.offset = (page - 1).saturating_mul(page_size);
            self.limit = page_size;
        }
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit == UNBOUNDED
    }
}
