//! Resource envelope module
//!
//! Normalises the outcome of one asynchronous fetch attempt into a
//! tri-state [`Resource`]: `Loading`, then exactly one of `Success` or
//! `Error`.
//!
//! # Overview
//!
//! - `Resource` - the tri-state value itself
//! - `track` - turns a fallible future into a two-element stream of resources
//!
//! No retries happen here; retrying is a user-driven controller operation.

mod envelope;
mod types;

pub use envelope::track;
pub use types::Resource;
