// src/navigator/backlinks.rs
use super::{keys, Navigator};
use crate::api::ApiParams;
use crate::error::WikiError;
use crate::model::{Backlink, BacklinksResponse};
use crate::types::{clamp_limit, require_title, WikiUrl};
use std::sync::Arc;

impl Navigator {
    /// Up to `limit` pages linking to `title`.
    pub async fn backlinks(
        &self,
        wiki: &WikiUrl,
        title: &str,
        limit: u32,
    ) -> Result<Arc<BacklinksResponse>, WikiError> {
        let title = require_title(title, "title")?;
        let limit = clamp_limit(limit);
        let key = keys::backlinks(wiki, title, limit);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let listing = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("list", "backlinks")
                    .set("bltitle", title)
                    .set("bllimit", limit),
            )
            .await?
            .into_query()?;

        let backlinks: Vec<Backlink> = listing
            .backlinks
            .into_iter()
            .map(|link| Backlink { title: link.title })
            .collect();
        let response = BacklinksResponse {
            title: title.to_string(),
            total_count: backlinks.len(),
            backlinks,
        };
        Ok(self.store(key, response, self.ttl.content))
    }
}
