// src/formatting/mod.rs
//! Turns MediaWiki HTML and wikitext into Markdown, links, text and infoboxes.

mod infobox;
mod links;
mod markdown;
mod text;

pub use self::infobox::extract_infobox;
pub use self::links::{extract_links, title_from_href};
pub use self::markdown::{html_to_markdown, html_to_plain_text};
pub use self::text::{count_words, extract_preview, strip_markdown, without_tables};

/// Converts HTML for degraded contexts: on conversion failure the raw HTML
/// is returned instead, with a warning.
pub fn markdown_or_raw(html: &str) -> String {
    match html_to_markdown(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            log::warn!("Falling back to raw HTML: {}", e);
            html.to_string()
        }
    }
}
