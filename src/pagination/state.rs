//! Controller-internal pagination state
//!
//! Owned exclusively by the controller task. Every mutation goes through one
//! of the transition methods below.

use crate::types::Page;

/// Lifecycle phase of the first page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// First page requested, no result yet
    InitialLoading,
    /// First page loaded; incremental loading allowed
    Ready,
    /// First page failed with this message
    InitialError(String),
}

/// Page counters, accumulated items and the in-flight guard
#[derive(Debug, Clone)]
pub struct ControllerState<T> {
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    is_loading_more: bool,
    phase: Phase,
}

impl<T> Default for ControllerState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            is_loading_more: false,
            phase: Phase::InitialLoading,
        }
    }
}

impl<T> ControllerState<T> {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated items in page order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last page applied
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the last successful fetch
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a page > 1 fetch is outstanding
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Current phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the server reports pages after the current one
    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Back to the freshly-created state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enter `InitialLoading` for a page-1 request
    pub fn begin_initial(&mut self) {
        self.phase = Phase::InitialLoading;
        self.is_loading_more = false;
    }

    /// Apply a successful page-1 fetch.
    ///
    /// Replaces the buffer wholesale; page 1 never appends.
    pub fn apply_first_page(&mut self, page: Page<T>) {
        self.current_page = page.page_number;
        self.total_pages = page.total_pages;
        self.items = page.items;
        self.phase = Phase::Ready;
    }

    /// Record a failed page-1 fetch
    pub fn fail_initial(&mut self, message: impl Into<String>) {
        self.items.clear();
        self.phase = Phase::InitialError(message.into());
    }

    /// Try to claim the in-flight guard for the next page.
    ///
    /// Returns the page number to request, or `None` when a fetch is already
    /// outstanding, the first page is not loaded, or there are no more pages.
    pub fn begin_next_page(&mut self) -> Option<u32> {
        if self.is_loading_more || self.phase != Phase::Ready || !self.has_more_pages() {
            return None;
        }
        self.is_loading_more = true;
        Some(self.current_page + 1)
    }

    /// Append a successful incremental fetch and release the guard
    pub fn apply_next_page(&mut self, page: Page<T>) {
        self.items.extend(page.items);
        self.current_page = page.page_number;
        self.total_pages = page.total_pages;
        self.is_loading_more = false;
    }

    /// Release the guard after a failed incremental fetch.
    ///
    /// Items and counters are left untouched.
    pub fn abandon_next_page(&mut self) {
        self.is_loading_more = false;
    }
}
