//! Offset pagination value objects

use serde::Serialize;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on items per page
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction for time-ordered listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping the size to `1..=MAX_PAGE_SIZE`
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the totals needed to navigate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: i64,
    pub page_size: u32,
    pub is_last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let size = i64::from(request.size.max(1));
        let total_pages = ((total_elements.max(0) + size - 1) / size) as u32;
        Self {
            content,
            current_page: request.page,
            total_pages,
            total_elements,
            page_size: request.size,
            is_last: request.page.saturating_add(1) >= total_pages,
        }
    }

    /// Slice an in-memory, already ordered collection
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let content = all
            .iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Self::new(content, request, all.len() as i64)
    }

    /// Convert the items, keeping the page metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            page_size: self.page_size,
            is_last: self.is_last,
        }
    }
}
