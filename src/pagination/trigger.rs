//! Scroll-proximity trigger
//!
//! Decides, from the reader's position in the rendered list, when the next
//! page should be requested.

use super::controller::PaginationController;
use super::view::ViewState;
use tracing::trace;

/// Default number of items before the end at which loading starts
pub const DEFAULT_BUFFER: usize = 3;

/// Level-triggered "load more" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTrigger {
    buffer: usize,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}

impl ScrollTrigger {
    /// Create a trigger with the given buffer
    pub fn new(buffer: usize) -> Self {
        Self { buffer }
    }

    /// Items-before-end threshold
    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Whether more should be loaded.
    ///
    /// True when `has_more_data` and `(last_visible_index + 1) > (total_items - buffer)`.
    /// With nothing visible the index counts as 0.
    pub fn should_load_more(
        &self,
        total_items: usize,
        last_visible_index: Option<usize>,
        has_more_data: bool,
    ) -> bool {
        if !has_more_data {
            return false;
        }
        let visible = last_visible_index.unwrap_or(0).saturating_add(1);
        // visible > total - buffer, without underflow
        visible.saturating_add(self.buffer) > total_items
    }

    /// Evaluate the signal against a published view
    pub fn evaluate<T>(&self, view: &ViewState<T>, last_visible_index: Option<usize>) -> bool {
        match view {
            ViewState::Success { items, .. } => {
                self.should_load_more(items.len(), last_visible_index, view.has_more_data())
            }
            ViewState::Loading | ViewState::Error { .. } => false,
        }
    }

    /// Feed a position change; requests the next page when the signal is true.
    ///
    /// Repeated true observations are safe: the controller's in-flight guard
    /// drops duplicates. Returns whether a request was issued.
    pub fn on_scroll<T>(
        &self,
        controller: &PaginationController<T>,
        last_visible_index: Option<usize>,
    ) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let fire = self.evaluate(&controller.view(), last_visible_index);
        trace!(?last_visible_index, fire, "Scroll position changed");
        if fire {
            controller.load_next_page();
        }
        fire
    }
}
