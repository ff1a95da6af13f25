//! Page/limit arithmetic for listing endpoints.

/// Default page when none (or an unusable one) is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// A validated page request: both `page` and `limit` are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, raising zero values to one.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Records per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Build a page request from raw query values.
    ///
    /// Each value is read by its leading integer (`"3rd"` is page 3). Missing,
    /// unparsable, zero or negative values fall back to the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use angle_catalog_common::pagination::PageRequest;
    ///
    /// let req = PageRequest::from_query(Some("3"), None, 10);
    /// assert_eq!((req.page(), req.limit()), (3, 10));
    /// assert_eq!(req.offset(), 20);
    /// ```
    pub fn from_query(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        Self::new(
            positive_or(page, DEFAULT_PAGE),
            positive_or(limit, default_limit),
        )
    }

    /// Number of records to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Total number of pages needed for `count` matching records.
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(u64::from(self.limit))
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => default,
    }
}

/// Parse the integer prefix of `text`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when there is no digit to read.
///
/// # Examples
///
/// ```
/// use angle_catalog_common::pagination::parse_leading_int;
///
/// assert_eq!(parse_leading_int("  42abc"), Some(42));
/// assert_eq!(parse_leading_int("-7"), Some(-7));
/// assert_eq!(parse_leading_int("abc"), None);
/// ```
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
