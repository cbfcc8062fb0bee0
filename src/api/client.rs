// src/api/client.rs
//! Pure HTTP client wrapper for MediaWiki APIs.
//!
//! This module provides a thin wrapper around reqwest for making GET
//! requests to a wiki. It sets identification, decompression and the
//! overall timeout, and hands back the raw body without parsing it.

use super::HttpTransport;
use crate::config::WikiConfig;
use crate::constants::COMPRESSED_BODY_PLACEHOLDER;
use crate::error::WikiError;
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for MediaWiki API requests.
#[derive(Clone)]
pub struct WikiHttpClient {
    client: Client,
}

impl WikiHttpClient {
    /// Creates an HTTP client with the configured identity and timeout.
    ///
    /// Gzip responses are decompressed transparently.
    pub fn new(config: &WikiConfig) -> Result<Self, WikiError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[async_trait::async_trait]
impl HttpTransport for WikiHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<ApiResponse<String>, WikiError> {
        log::debug!("GET {} ({} params)", url, query.len());
        let response = self.client.get(url).query(query).send().await?;
        extract_response_text(response).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
///
/// Error bodies that are still encoded after reqwest's decompression (an
/// encoding it does not understand) are replaced with a placeholder rather
/// than surfacing binary noise.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, WikiError> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let still_encoded = response.headers().contains_key(header::CONTENT_ENCODING);
        let data = if still_encoded {
            COMPRESSED_BODY_PLACEHOLDER.to_string()
        } else {
            response
                .text()
                .await
                .unwrap_or_else(|_| COMPRESSED_BODY_PLACEHOLDER.to_string())
        };
        return Ok(ApiResponse { data, status, url });
    }

    let data = response.text().await?;
    Ok(ApiResponse { data, status, url })
}
