//! Paging parameter normalization
//!
//! Every list query goes through [`normalize`]. Zero and negative raw
//! values mean "absent" and are replaced by the defaults below.

/// Page index used when the caller gives none (zero-based)
pub const DEFAULT_PAGE: i64 = 0;

/// Page size used when the caller gives none
pub const DEFAULT_LIMIT: i64 = 5;

/// Effective paging parameters for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Zero-based page index
    pub page: i64,
    /// Page size, always positive
    pub limit: i64,
}

impl Paging {
    /// Row offset for SQL LIMIT/OFFSET
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.limit)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Substitute defaults for non-positive raw page/limit values
///
/// # Examples
/// ```
/// use songbook_server::pagination::normalize;
///
/// let p = normalize(0, 0);
/// assert_eq!((p.page, p.limit), (0, 5));
///
/// let p = normalize(2, 10);
/// assert_eq!(p.offset(), 20);
/// ```
pub fn normalize(raw_page: i64, raw_limit: i64) -> Paging {
    let page = if raw_page <= 0 { DEFAULT_PAGE } else { raw_page };
    let limit = if raw_limit <= 0 { DEFAULT_LIMIT } else { raw_limit };

    Paging { page, limit }
}
