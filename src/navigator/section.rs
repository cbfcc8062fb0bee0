// src/navigator/section.rs
use super::tree::{flatten_sections, locate_section};
use super::{keys, Navigator};
use crate::api::responses::{MwLink, RenderedText};
use crate::api::ApiParams;
use crate::error::WikiError;
use crate::formatting::{count_words, extract_links, html_to_markdown};
use crate::model::{Adjacent, PageSection, Section};
use crate::types::{require_title, WikiUrl};
use std::sync::Arc;

impl Navigator {
    /// One section's full content, with its parent and reading-order
    /// neighbours.
    ///
    /// Indices come from [`Navigator::page_outline`] and go stale when the
    /// page is edited; an index the current outline doesn't have fails with
    /// [`WikiError::SectionNotFound`].
    pub async fn page_section(
        &self,
        wiki: &WikiUrl,
        title: &str,
        index: u32,
    ) -> Result<Arc<PageSection>, WikiError> {
        let title = require_title(title, "title")?;
        let key = keys::section(wiki, title, index);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let outline = self.page_outline(wiki, title).await?;
        let flat = flatten_sections(&outline.sections);
        let location = locate_section(&flat, index)?;

        let parsed = self
            .api
            .request(
                wiki,
                ApiParams::parse_page(title)
                    .set("section", index)
                    .set("prop", "text|links"),
            )
            .await?
            .into_parse()?;

        let html = parsed.text.map(RenderedText::into_string).unwrap_or_default();
        let markdown = html_to_markdown(&html)?;
        let links = link_titles(parsed.links, &html);

        let target = location.target;
        let section = Section {
            word_count: count_words(&markdown),
            content: Some(markdown),
            links,
            ..Section::heading(target.index, target.title.clone(), target.level)
        };

        let page_section = PageSection {
            title: outline.title.clone(),
            section,
            parent_section: location.parent.map(Section::reference),
            adjacent: Adjacent {
                previous: location.previous.map(Section::reference),
                next: location.next.map(Section::reference),
            },
        };
        Ok(self.store(key, page_section, self.ttl.content))
    }
}

/// Titles from the API's link list, or scraped from the HTML when the wiki
/// sent none.
pub(super) fn link_titles(links: Vec<MwLink>, html: &str) -> Vec<String> {
    if links.is_empty() {
        extract_links(html)
    } else {
        links.into_iter().map(|link| link.title).collect()
    }
}
