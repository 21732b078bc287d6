//! History pagination state.
//!
//! Pure value holder: setters never perform I/O and never check bounds
//! against the server-side total. Prev/Next bounds are a presentation concern.

use std::str::FromStr;

use client_gateway_core::HistoryQuery;
use strum::{EnumIter, IntoEnumIterator};

/// Allowed history page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Twenty,
}

impl PageSize {
    pub const fn rows(self) -> u32 {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
        }
    }

    pub fn from_rows(rows: u32) -> Option<Self> {
        PageSize::iter().find(|size| size.rows() == rows)
    }

    /// The next size in the selector, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::Five,
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(PageSize::from_rows)
            .ok_or_else(|| format!("unsupported page size {s:?}, expected 5, 10 or 20"))
    }
}

/// What a page size change does to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitChangePolicy {
    /// Keep the current page index (may point past the end).
    #[default]
    KeepPage,
    /// Jump back to page 1.
    ResetToFirst,
}

/// Current page index (1-based) and page size of the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: PageSize,
}

impl Pagination {
    pub const fn new(limit: PageSize) -> Self {
        Self { page: 1, limit }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn limit(&self) -> PageSize {
        self.limit
    }

    /// Returns true if the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Returns true if the limit changed. The page is left alone.
    pub fn set_limit(&mut self, limit: PageSize) -> bool {
        let changed = self.limit != limit;
        self.limit = limit;
        changed
    }

    /// Query for the page currently selected.
    pub fn query(&self) -> HistoryQuery {
        HistoryQuery::new(self.page, self.limit.rows())
    }

    /// Same page size, first page.
    pub fn first_page(&self) -> Self {
        Self {
            page: 1,
            limit: self.limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_report_changes_only() {
        let mut pagination = Pagination::default();
        assert!(!pagination.set_page(1));
        assert!(pagination.set_page(4));
        assert!(!pagination.set_limit(PageSize::Five));
        assert!(pagination.set_limit(PageSize::Twenty));
    }

    #[test]
    fn limit_change_keeps_page() {
        let mut pagination = Pagination::default();
        pagination.set_page(3);
        pagination.set_limit(PageSize::Ten);
        assert_eq!(pagination.query(), HistoryQuery::new(3, 10));
    }

    #[test]
    fn page_is_not_bounded_by_state() {
        let mut pagination = Pagination::default();
        pagination.set_page(999);
        assert_eq!(pagination.page(), 999);
        assert_eq!(pagination.first_page().query(), HistoryQuery::new(1, 5));
    }

    #[test]
    fn page_size_parses_supported_rows_only() {
        assert_eq!("10".parse::<PageSize>(), Ok(PageSize::Ten));
        assert_eq!(" 20 ".parse::<PageSize>(), Ok(PageSize::Twenty));
        assert!("7".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
    }

    #[test]
    fn cycle_visits_every_size() {
        let visited: Vec<_> = std::iter::successors(Some(PageSize::Five), |s| Some(s.cycle()))
            .take(4)
            .map(PageSize::rows)
            .collect();
        assert_eq!(visited, vec![5, 10, 20, 5]);
    }
}
