//! Error types for showfeed
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Fetch failures are split into the four kinds a page fetcher may report
//! (see [`FetchErrorKind`]). Their `Display` output is the human-readable
//! message shown to the user when the first page cannot be loaded.

use thiserror::Error;

/// The main error type for showfeed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Unable to reach the server, check your network connection: {message}")]
    Connectivity { message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },

    #[error("No show found for '{lookup}'")]
    ShowNotFound { lookup: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Classification of a failed page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No route to the remote host (DNS, refused connection, timeout,
    /// connection lost while reading the body)
    Connectivity,
    /// Server reached but answered with a non-success status
    HttpStatus,
    /// Payload did not have the expected shape
    Decode,
    /// Anything else
    Unknown,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a connectivity error
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Classify a transport failure into one of the fetch error kinds.
    ///
    /// Status codes never reach this point: the HTTP client maps non-2xx
    /// responses itself, with the body attached.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || body_interrupted(err) {
            Self::connectivity(err.to_string())
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::unknown(err.to_string())
        }
    }

    /// Fetch kind of this error, if it came from a page fetch
    pub fn fetch_kind(&self) -> Option<FetchErrorKind> {
        match self {
            Error::Connectivity { .. } => Some(FetchErrorKind::Connectivity),
            Error::HttpStatus { .. } => Some(FetchErrorKind::HttpStatus),
            Error::Decode { .. } | Error::JsonParse(_) => Some(FetchErrorKind::Decode),
            Error::Unknown { .. } | Error::ShowNotFound { .. } => Some(FetchErrorKind::Unknown),
            _ => None,
        }
    }

    /// Check if this error means the server could not be reached
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity { .. })
    }
}

/// Whether reading the response body failed. reqwest reports an
/// interrupted body read as a decode error with the body error as its source.
fn body_interrupted(err: &reqwest::Error) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_body) {
            return true;
        }
        current = e.source();
    }
    false
}

/// Result type alias for showfeed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
