//! HTTP client module
//!
//! Provides the HTTP transport with rate limiting and failure
//! classification.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Failure Classification**: Connectivity, HTTP status, decode and unknown
//! - **Base URL Joining**: Relative endpoint paths against a configured base

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
