// src/api/mediawiki.rs
//! The MediaWiki API client: endpoint, throttle, request, decode.

use super::endpoint::EndpointRegistry;
use super::parser::decode_envelope;
use super::rate_limit::WikiRateLimiters;
use super::request::ApiParams;
use super::responses::Envelope;
use super::HttpTransport;
use crate::error::WikiError;
use crate::types::WikiUrl;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Sends API requests to any number of wikis through one transport.
///
/// Endpoint and limiter state belong to this instance. The client never
/// retries; a cancelled `shutdown` token aborts every pending wait and
/// in-flight call with [`WikiError::Cancelled`].
pub struct MediaWikiApi {
    transport: Arc<dyn HttpTransport>,
    endpoints: EndpointRegistry,
    limiters: WikiRateLimiters,
    shutdown: CancellationToken,
}

impl MediaWikiApi {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        requests_per_second: f64,
        shutdown: CancellationToken,
    ) -> Result<Self, WikiError> {
        Ok(Self {
            transport,
            endpoints: EndpointRegistry::new(),
            limiters: WikiRateLimiters::new(requests_per_second)?,
            shutdown,
        })
    }

    /// Performs one API call against `wiki` and decodes its envelope.
    pub async fn request(&self, wiki: &WikiUrl, params: ApiParams) -> Result<Envelope, WikiError> {
        if self.shutdown.is_cancelled() {
            return Err(WikiError::Cancelled);
        }

        self.limiters.acquire(wiki.as_str(), &self.shutdown).await?;
        let endpoint = self
            .until_shutdown(self.endpoints.resolve(wiki.as_str(), self.transport.as_ref()))
            .await?;

        let query = params.with_standard_format().into_pairs();
        log::debug!(
            "API {} {}",
            endpoint,
            query
                .iter()
                .find(|(k, _)| k == "action")
                .map(|(_, v)| v.as_str())
                .unwrap_or("?")
        );
        let response = self
            .until_shutdown(self.transport.get(&endpoint, &query))
            .await?;

        decode_envelope(response)
    }

    /// The discovered endpoint for `wiki`, if any request reached it yet.
    pub fn known_endpoint(&self, wiki: &WikiUrl) -> Option<String> {
        self.endpoints.cached(wiki.as_str())
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    async fn until_shutdown<T, F>(&self, work: F) -> Result<T, WikiError>
    where
        F: Future<Output = Result<T, WikiError>>,
    {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(WikiError::Cancelled),
            result = work => result,
        }
    }
}
