// src/navigator/full.rs
use super::section::link_titles;
use super::{keys, Navigator};
use crate::api::responses::RenderedText;
use crate::api::ApiParams;
use crate::constants::LARGE_PAGE_WORDS;
use crate::error::WikiError;
use crate::formatting::{count_words, html_to_markdown};
use crate::model::PageFull;
use crate::types::{require_title, WikiUrl};
use std::sync::Arc;

impl Navigator {
    /// The whole page as Markdown.
    ///
    /// Long pages carry a warning suggesting outline and section retrieval.
    pub async fn page_full(&self, wiki: &WikiUrl, title: &str) -> Result<Arc<PageFull>, WikiError> {
        let title = require_title(title, "title")?;
        let key = keys::full_page(wiki, title);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let parsed = self
            .api
            .request(
                wiki,
                ApiParams::parse_page(title)
                    .set("prop", "text|links")
                    .set("disabletoc", "1"),
            )
            .await?
            .into_parse()?;

        let html = parsed.text.map(RenderedText::into_string).unwrap_or_default();
        let content = html_to_markdown(&html)?;
        let word_count = count_words(&content);
        let warning = (word_count > LARGE_PAGE_WORDS).then(|| {
            format!(
                "Large page ({} words). Consider the page outline and section operations for targeted retrieval.",
                word_count
            )
        });

        let page = PageFull {
            title: parsed.title,
            links: link_titles(parsed.links, &html),
            content,
            word_count,
            warning,
        };
        Ok(self.store(key, page, self.ttl.content))
    }
}
