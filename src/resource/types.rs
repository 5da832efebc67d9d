//! Resource type
//!
//! Defines the tri-state wrapper used around every asynchronous outcome.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Outcome of one asynchronous operation
#[derive(Debug, Clone)]
pub enum Resource<T> {
    /// Operation in flight
    Loading,
    /// Operation completed with data
    Success(T),
    /// Operation failed
    Error {
        /// Human-readable message
        message: String,
        /// Diagnostic detail, never interpreted by consumers
        cause: Option<Arc<Error>>,
    },
}

impl<T> Resource<T> {
    /// Create a loading resource
    pub fn loading() -> Self {
        Self::Loading
    }

    /// Create a successful resource
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// Create an error resource without a cause
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error resource from a crate error, keeping it as the cause
    pub fn from_error(err: Error) -> Self {
        Self::Error {
            message: err.to_string(),
            cause: Some(Arc::new(err)),
        }
    }

    /// Convert a finished fetch into its terminal resource
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::from_error(err),
        }
    }

    /// Check if this is the loading state
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Data, if successful
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, if failed
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}
