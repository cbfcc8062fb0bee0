// src/formatting/links.rs
//! Wiki link extraction from rendered HTML.

use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// Titles of the wiki pages an HTML fragment links to.
///
/// Recognizes `/wiki/<Title>` paths and `?title=<Title>` query links.
/// Titles are percent-decoded with underscores turned into spaces and
/// returned in order of first appearance without duplicates.
pub fn extract_links(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let anchors = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a");
    for anchor in anchors {
        let Some(title) = anchor.value().attr("href").and_then(title_from_href) else {
            continue;
        };
        if seen.insert(title.clone()) {
            links.push(title);
        }
    }
    links
}

/// The page title an href points at, if it is a wiki page link.
pub fn title_from_href(href: &str) -> Option<String> {
    let raw = if let Some(path) = href.strip_prefix("/wiki/") {
        let end = path.find(['#', '?']).unwrap_or(path.len());
        percent_decode(&path[..end])
    } else {
        let (_, query) = href.split_once('?')?;
        let query = query.split('#').next().unwrap_or_default();
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "title")
            .map(|(_, value)| value.into_owned())?
    };

    let title = raw.replace('_', " ").trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Decodes `%XX` escapes in a path segment. A literal `+` stays a plus.
fn percent_decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
