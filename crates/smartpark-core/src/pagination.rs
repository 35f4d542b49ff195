//! The list contract shared by every resource.
//!
//! A listing is paginated only when both `page` and `pageSize` are supplied.
//! With either one missing the full ordered set is returned as a bare array;
//! with both present the rows come wrapped in a [`Page`] envelope.

use serde::Serialize;

use crate::validation::ValidationError;

/// The pagination parameters of a list call after normalisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    page: Option<u32>,
    page_size: Option<u32>,
}

/// A concrete slice of the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Zero counts as "not supplied", the same as leaving the parameter out.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.filter(|value| *value > 0),
            page_size: page_size.filter(|value| *value > 0),
        }
    }

    pub fn unpaginated() -> Self {
        Self::default()
    }

    pub fn paged(page: u32, page_size: u32) -> Self {
        Self::new(Some(page), Some(page_size))
    }

    /// Builds a request from raw query-string values.
    ///
    /// Values are read like a lenient integer parse: leading digits win and
    /// trailing garbage is ignored, while a value with no leading digits is
    /// treated as absent. Negative numbers are rejected.
    pub fn from_query(
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let page = parse_param("page", page)?;
        let page_size = parse_param("pageSize", page_size)?;
        Ok(Self::new(page, page_size))
    }

    pub fn window(&self) -> Option<Window> {
        match (self.page, self.page_size) {
            (Some(page), Some(page_size)) => Some(Window { page, page_size }),
            _ => None,
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.window().is_some()
    }
}

impl Window {
    /// Rows to skip. Saturates for windows far past any real table, which
    /// still yields an empty page with the true totals.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1)
            .checked_mul(i64::from(self.page_size))
            .unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(u64::from(self.page_size))
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return Ok(None);
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| ValidationError::new(format!("\"{name}\" must be a safe number")))?;

    if value == 0 {
        return Ok(None);
    }
    if negative {
        return Err(ValidationError::new(format!(
            "\"{name}\" must be a positive number"
        )));
    }

    u32::try_from(value)
        .map(Some)
        .map_err(|_| ValidationError::new(format!("\"{name}\" must be a safe number")))
}

/// The envelope returned when both pagination parameters are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Result of a list call: a bare array or a paginated envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    /// Assembles the listing for `request` from an already-sliced set of rows
    /// and the total number of rows matching the same predicate.
    pub fn from_parts(request: PageRequest, rows: Vec<T>, total_items: u64) -> Self {
        match request.window() {
            Some(window) => Listing::Paged(Page {
                data: rows,
                current_page: window.page,
                total_pages: window.total_pages(total_items),
                total_items,
            }),
            None => Listing::All(rows),
        }
    }

    /// A listing for a predicate that cannot match any row, shaped according
    /// to `request`.
    pub fn empty(request: PageRequest) -> Self {
        Self::from_parts(request, Vec::new(), 0)
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::All(rows) => rows,
            Listing::Paged(page) => &page.data,
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Listing::All(rows) => rows,
            Listing::Paged(page) => page.data,
        }
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Listing::Paged(page) => Some(page),
            Listing::All(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_requires_both_parameters() {
        assert!(PageRequest::new(Some(1), Some(10)).is_paginated());
        assert!(!PageRequest::new(Some(1), None).is_paginated());
        assert!(!PageRequest::new(None, Some(10)).is_paginated());
        assert!(!PageRequest::unpaginated().is_paginated());
    }

    #[test]
    fn zero_is_treated_as_missing() {
        assert!(!PageRequest::new(Some(0), Some(10)).is_paginated());
        assert!(!PageRequest::new(Some(2), Some(0)).is_paginated());
    }

    #[test]
    fn window_offsets_follow_page_numbers() {
        let window = PageRequest::paged(2, 5).window().unwrap();
        assert_eq!(window.offset(), 5);
        assert_eq!(window.limit(), 5);

        let first = PageRequest::paged(1, 25).window().unwrap();
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn largest_window_does_not_overflow() {
        let request = PageRequest::from_query(Some("4294967295"), Some("4294967295")).unwrap();
        let window = request.window().unwrap();
        assert_eq!(window.offset(), i64::MAX);
        assert_eq!(window.limit(), 4_294_967_295);

        let listing: Listing<i32> = Listing::from_parts(request, Vec::new(), 12);
        let page = listing.page().unwrap();
        assert_eq!(page.current_page, u32::MAX);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 12);
    }

    #[test]
    fn total_pages_rounds_up() {
        let window = PageRequest::paged(2, 5).window().unwrap();
        assert_eq!(window.total_pages(12), 3);
        assert_eq!(window.total_pages(10), 2);
        assert_eq!(window.total_pages(0), 0);
    }

    #[test]
    fn query_values_parse_leniently() {
        let request = PageRequest::from_query(Some("2"), Some("5abc")).unwrap();
        assert_eq!(request.window(), Some(Window { page: 2, page_size: 5 }));

        let request = PageRequest::from_query(Some("abc"), Some("5")).unwrap();
        assert!(!request.is_paginated());

        let request = PageRequest::from_query(None, Some("5")).unwrap();
        assert!(!request.is_paginated());

        let request = PageRequest::from_query(Some(" 3"), Some("+4")).unwrap();
        assert_eq!(request.window(), Some(Window { page: 3, page_size: 4 }));
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = PageRequest::from_query(Some("-1"), Some("5")).unwrap_err();
        assert_eq!(err.message(), "\"page\" must be a positive number");

        let err = PageRequest::from_query(Some("1"), Some("-5")).unwrap_err();
        assert_eq!(err.message(), "\"pageSize\" must be a positive number");
    }

    #[test]
    fn oversized_values_are_rejected() {
        let err = PageRequest::from_query(Some("99999999999"), Some("5")).unwrap_err();
        assert_eq!(err.message(), "\"page\" must be a safe number");
    }

    #[test]
    fn unpaginated_listing_serializes_as_bare_array() {
        let listing = Listing::from_parts(PageRequest::new(Some(1), None), vec![1, 2, 3], 3);
        assert_eq!(serde_json::to_value(&listing).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn paginated_listing_serializes_as_envelope() {
        let listing = Listing::from_parts(PageRequest::paged(2, 5), vec![6, 7, 8, 9, 10], 12);
        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({
                "data": [6, 7, 8, 9, 10],
                "currentPage": 2,
                "totalPages": 3,
                "totalItems": 12
            })
        );
    }

    #[test]
    fn empty_listing_keeps_the_requested_shape() {
        let bare: Listing<i32> = Listing::empty(PageRequest::unpaginated());
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!([]));

        let paged: Listing<i32> = Listing::empty(PageRequest::paged(1, 10));
        assert_eq!(
            serde_json::to_value(&paged).unwrap(),
            json!({"data": [], "currentPage": 1, "totalPages": 0, "totalItems": 0})
        );
    }
}
