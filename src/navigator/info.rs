// src/navigator/info.rs
use super::{keys, Navigator};
use crate::api::ApiParams;
use crate::error::WikiError;
use crate::model::WikiInfo;
use crate::types::WikiUrl;
use std::sync::Arc;

impl Navigator {
    /// Site name, main page, language, article count and namespaces.
    pub async fn wiki_info(&self, wiki: &WikiUrl) -> Result<Arc<WikiInfo>, WikiError> {
        let key = keys::info(wiki);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let site = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("meta", "siteinfo")
                    .set("siprop", "general|namespaces|statistics"),
            )
            .await?
            .into_query()?;

        let general = site.general.unwrap_or_default();
        let info = WikiInfo {
            name: general.sitename,
            base_url: wiki.to_string(),
            main_page: general.mainpage,
            language: general.lang,
            article_count: site.statistics.unwrap_or_default().articles,
            namespaces: site
                .namespaces
                .into_values()
                .map(|namespace| (namespace.id, namespace.name))
                .collect(),
        };
        Ok(self.store(key, info, self.ttl.info))
    }
}
