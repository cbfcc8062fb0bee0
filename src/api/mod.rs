// src/api/mod.rs
//! MediaWiki API interaction: the ability to ask a wiki questions.
//!
//! This module keeps I/O, decoding and policy apart: the transport moves
//! bytes, the parser turns bytes into typed envelopes, and
//! [`MediaWikiApi`] decides where to send a request and how fast.

pub mod cache;
pub mod client;
mod endpoint;
mod mediawiki;
pub mod parser;
mod rate_limit;
pub mod request;
pub mod responses;

use crate::error::WikiError;

pub use cache::TtlCache;
pub use client::{ApiResponse, WikiHttpClient};
pub use endpoint::EndpointRegistry;
pub use mediawiki::MediaWikiApi;
pub use rate_limit::WikiRateLimiters;
pub use request::ApiParams;

/// The ability to perform one HTTP GET against a wiki.
///
/// Everything above this trait depends on it, never on reqwest directly,
/// so the navigator can be driven by an in-memory wiki in tests.
/// Implementations return non-2xx statuses as data, not as errors; only
/// failures to get any answer at all are `Err`.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<ApiResponse<String>, WikiError>;
}
