// src/navigator/search.rs
use super::{keys, Navigator};
use crate::api::ApiParams;
use crate::error::WikiError;
use crate::formatting::{extract_links, markdown_or_raw};
use crate::model::{SearchResponse, SearchResult};
use crate::types::{clamp_limit, require_title, WikiUrl};
use std::sync::Arc;

impl Navigator {
    /// Full-text search, one page of up to `limit` hits.
    ///
    /// Snippets are converted to Markdown where possible and otherwise
    /// returned as the wiki's HTML.
    pub async fn search(
        &self,
        wiki: &WikiUrl,
        query: &str,
        limit: u32,
    ) -> Result<Arc<SearchResponse>, WikiError> {
        let query = require_title(query, "query")?;
        let limit = clamp_limit(limit);
        let key = keys::search(wiki, query, limit);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let found = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("list", "search")
                    .set("srsearch", query)
                    .set("srlimit", limit)
                    .set("srprop", "snippet|wordcount")
                    .set("srinfo", "totalhits|suggestion"),
            )
            .await?
            .into_query()?;

        let results: Vec<SearchResult> = found
            .search
            .into_iter()
            .map(|hit| SearchResult {
                snippet: markdown_or_raw(&hit.snippet),
                snippet_links: extract_links(&hit.snippet),
                title: hit.title,
                word_count: hit.wordcount,
            })
            .collect();

        let info = found.searchinfo.unwrap_or_default();
        let response = SearchResponse {
            total_hits: info.totalhits.unwrap_or(results.len() as u64),
            suggestion: info.suggestion.filter(|s| !s.is_empty()),
            results,
        };
        Ok(self.store(key, response, self.ttl.search))
    }
}
