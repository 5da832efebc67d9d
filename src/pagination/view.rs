//! Externally observable view state and its projection

use super::state::{ControllerState, Phase};
use std::sync::Arc;

/// What presentation sees of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// No items known yet
    Loading,
    /// At least the first page is loaded
    Success {
        /// Immutable snapshot of the accumulated items
        items: Arc<[T]>,
        /// Whether a next-page fetch is outstanding
        is_loading_more: bool,
        /// `current_page < total_pages`
        has_more_pages: bool,
        current_page: u32,
        total_pages: u32,
    },
    /// The first page could not be loaded
    Error {
        /// Human-readable failure
        message: String,
    },
}

impl<T> ViewState<T> {
    /// Check if this is the loading state
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if this is the success state
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Items shown so far (empty unless `Success`)
    pub fn items(&self) -> &[T] {
        match self {
            Self::Success { items, .. } => &items[..],
            Self::Loading | Self::Error { .. } => &[],
        }
    }

    /// Whether a next-page fetch is outstanding
    pub fn is_loading_more(&self) -> bool {
        matches!(
            self,
            Self::Success {
                is_loading_more: true,
                ..
            }
        )
    }

    /// Whether more pages can be requested
    pub fn has_more_pages(&self) -> bool {
        matches!(
            self,
            Self::Success {
                has_more_pages: true,
                ..
            }
        )
    }

    /// More pages exist and none is being fetched
    pub fn has_more_data(&self) -> bool {
        self.has_more_pages() && !self.is_loading_more()
    }

    /// Current page, if loaded
    pub fn current_page(&self) -> Option<u32> {
        match self {
            Self::Success { current_page, .. } => Some(*current_page),
            Self::Loading | Self::Error { .. } => None,
        }
    }

    /// Total pages, if loaded
    pub fn total_pages(&self) -> Option<u32> {
        match self {
            Self::Success { total_pages, .. } => Some(*total_pages),
            Self::Loading | Self::Error { .. } => None,
        }
    }

    /// Error message, if the first page failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Loading | Self::Success { .. } => None,
        }
    }
}

/// Project controller state into the view presentation observes
pub fn project<T: Clone>(state: &ControllerState<T>) -> ViewState<T> {
    match state.phase() {
        Phase::InitialLoading => ViewState::Loading,
        Phase::InitialError(message) => ViewState::Error {
            message: message.clone(),
        },
        Phase::Ready => ViewState::Success {
            items: Arc::from(state.items()),
            is_loading_more: state.is_loading_more(),
            has_more_pages: state.has_more_pages(),
            current_page: state.current_page(),
            total_pages: state.total_pages(),
        },
    }
}
