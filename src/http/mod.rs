//! HTTP client module
//!
//! Provides the HTTP transport used by the list API client.
//!
//! # Features
//!
//! - **Bearer Auth**: an already-issued access token is attached to every request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: status, timeout and transport failures map to `Error`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
