// src/navigator/outline.rs
use super::tree::{build_section_tree, toc_entries, total_word_count};
use super::{keys, Navigator};
use crate::api::responses::{MwLink, MwRevision, RenderedText};
use crate::api::ApiParams;
use crate::constants::{
    CATEGORY_PREFIX, LEAD_SECTION_TITLE, SECTION_PREVIEW_WORDS, SEE_ALSO_LIMIT,
    SUMMARY_PREVIEW_WORDS,
};
use crate::error::WikiError;
use crate::formatting::{
    count_words, extract_infobox, extract_links, extract_preview, html_to_markdown, without_tables,
};
use crate::model::{Infobox, PageOutline, Section};
use crate::types::{require_title, WikiUrl};
use std::collections::HashSet;
use std::sync::Arc;

/// Namespace prefixes never offered as related reading.
const META_PREFIXES: &[&str] = &["Category:", "File:", "Wikipedia:", "Template:", "Help:"];

impl Navigator {
    /// The section tree, summary, infobox and categories of a page.
    ///
    /// Costs two parse calls plus a wikitext fetch for the infobox. The
    /// infobox is optional: if its fetch fails the outline is still returned.
    pub async fn page_outline(&self, wiki: &WikiUrl, title: &str) -> Result<Arc<PageOutline>, WikiError> {
        let title = require_title(title, "title")?;
        let key = keys::outline(wiki, title);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let skeleton = self
            .api
            .request(
                wiki,
                ApiParams::parse_page(title).set("prop", "sections|categories|links"),
            )
            .await?
            .into_parse()?;
        let lead = self
            .api
            .request(
                wiki,
                ApiParams::parse_page(title)
                    .set("prop", "text")
                    .set("section", "0"),
            )
            .await?
            .into_parse()?;

        let lead_html = lead.text.map(RenderedText::into_string).unwrap_or_default();
        let lead_markdown = html_to_markdown(&lead_html)?;
        let lead_prose = without_tables(&lead_markdown);

        let mut lead_section = Section::heading(0, LEAD_SECTION_TITLE, 1);
        lead_section.preview = Some(extract_preview(&lead_prose, SECTION_PREVIEW_WORDS))
            .filter(|preview| !preview.is_empty());
        lead_section.word_count = count_words(&lead_markdown);

        let mut sections = vec![lead_section];
        sections.extend(build_section_tree(toc_entries(&skeleton.sections)));

        let categories = skeleton
            .categories
            .iter()
            .map(|category| strip_category_prefix(&category.title))
            .collect();
        let infobox = self.fetch_infobox(wiki, title).await?;

        let outline = PageOutline {
            title: skeleton.title,
            exists: true,
            summary: extract_preview(&lead_prose, SUMMARY_PREVIEW_WORDS),
            summary_links: extract_links(&lead_html),
            infobox,
            total_word_count: total_word_count(&sections),
            sections,
            categories,
            see_also: see_also_links(&skeleton.links),
        };
        Ok(self.store(key, outline, self.ttl.content))
    }

    /// The page's infobox, or `None` when it has none or it can't be fetched.
    async fn fetch_infobox(&self, wiki: &WikiUrl, title: &str) -> Result<Option<Infobox>, WikiError> {
        match self.fetch_wikitext(wiki, title).await {
            Ok(wikitext) => Ok(wikitext.as_deref().and_then(extract_infobox)),
            Err(WikiError::Cancelled) => Err(WikiError::Cancelled),
            Err(e) => {
                log::warn!("Omitting infobox for {:?}: {}", title, e);
                Ok(None)
            }
        }
    }

    async fn fetch_wikitext(&self, wiki: &WikiUrl, title: &str) -> Result<Option<String>, WikiError> {
        let query = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("titles", title)
                    .set("prop", "revisions")
                    .set("rvprop", "content")
                    .set("rvslots", "main"),
            )
            .await?
            .into_query()?;

        Ok(query
            .pages
            .map(|pages| pages.into_vec())
            .unwrap_or_default()
            .into_iter()
            .find_map(|page| page.revisions.into_iter().next())
            .and_then(MwRevision::into_content))
    }
}

pub(super) fn strip_category_prefix(name: &str) -> String {
    name.strip_prefix(CATEGORY_PREFIX).unwrap_or(name).replace('_', " ")
}

/// Main-namespace links, first occurrence only, capped.
///
/// A heuristic over the page's outgoing links, not a parse of its
/// "See also" heading.
fn see_also_links(links: &[MwLink]) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| link.ns == 0)
        .filter(|link| !META_PREFIXES.iter().any(|prefix| link.title.starts_with(prefix)))
        .filter(|link| seen.insert(link.title.as_str()))
        .take(SEE_ALSO_LIMIT)
        .map(|link| link.title.clone())
        .collect()
}
