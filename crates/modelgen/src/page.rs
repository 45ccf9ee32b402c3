/// Window over a paginated finder's results, passed as the trailing `limit`
/// and `offset` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i32,
    pub offset: i32,
}

impl Page {
    pub fn new(limit: i32, offset: i32) -> Page {
        Page { limit, offset }
    }

    /// The first `limit` rows
    pub fn first(limit: i32) -> Page {
        Page::new(limit, 0)
    }

    /// The page after this one
    pub fn next(self) -> Page {
        Page::new(self.limit, self.offset.saturating_add(self.limit))
    }
}
