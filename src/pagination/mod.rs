//! Pagination module
//!
//! Presents a remotely paginated collection as one growing, observable list.
//!
//! # Overview
//!
//! - `PaginationController` - owns page counters, the accumulated items and
//!   the in-flight guard; exposes `load_next_page` and `retry`
//! - `ControllerState` - the state the controller task owns
//! - `ViewState` / `project` - the immutable projection presentation observes
//! - `ScrollTrigger` - decides from scroll position when to load more
//!
//! Failures on the first page surface as `ViewState::Error`. Failures on
//! later pages only clear the loading indicator; loaded items are kept.

mod controller;
mod state;
mod trigger;
mod view;

pub use controller::PaginationController;
pub use state::{ControllerState, Phase};
pub use trigger::{ScrollTrigger, DEFAULT_BUFFER};
pub use view::{project, ViewState};


#[cfg(test)]
mod controller_tests;
