// src/api/endpoint.rs
//! API endpoint discovery.
//!
//! Wikis put `api.php` in different places. The first time a wiki is seen
//! the known layouts are probed in order and the first one that answers
//! 200 is remembered for the lifetime of the registry.

use super::HttpTransport;
use crate::constants::API_PATH_CANDIDATES;
use crate::error::WikiError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Wiki base URL to full API URL.
#[derive(Default)]
pub struct EndpointRegistry {
    resolved: RwLock<HashMap<String, String>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered endpoint for `wiki`, if discovery already ran.
    pub fn cached(&self, wiki: &str) -> Option<String> {
        self.resolved.read().get(wiki).cloned()
    }

    /// Returns the API URL for `wiki`, probing candidates on first use.
    ///
    /// A probe failing at the transport level moves on to the next
    /// candidate; only exhausting the list is an error.
    pub async fn resolve(
        &self,
        wiki: &str,
        transport: &dyn HttpTransport,
    ) -> Result<String, WikiError> {
        if let Some(endpoint) = self.cached(wiki) {
            return Ok(endpoint);
        }

        let probe = probe_query();
        for path in API_PATH_CANDIDATES {
            let candidate = format!("{}{}", wiki, path);
            match transport.get(&candidate, &probe).await {
                Ok(response) if response.status == reqwest::StatusCode::OK => {
                    log::debug!("Discovered API endpoint for {}: {}", wiki, candidate);
                    let mut resolved = self.resolved.write();
                    // A concurrent discovery may have won; keep its answer.
                    return Ok(resolved
                        .entry(wiki.to_string())
                        .or_insert(candidate)
                        .clone());
                }
                Ok(response) => {
                    log::debug!("Probe {} answered {}", candidate, response.status);
                }
                Err(e) => {
                    log::debug!("Probe {} failed: {}", candidate, e);
                }
            }
        }

        Err(WikiError::NoReachableEndpoint {
            wiki: wiki.to_string(),
            tried: API_PATH_CANDIDATES.iter().map(|p| p.to_string()).collect(),
        })
    }
}

fn probe_query() -> Vec<(String, String)> {
    [("action", "query"), ("meta", "siteinfo"), ("format", "json")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
