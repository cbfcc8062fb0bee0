// src/navigator/keys.rs
//! Cache-key discipline.
//!
//! A key is a namespace tag, the wiki origin and request identifiers joined
//! with `|`, which MediaWiki forbids in page titles.

use crate::types::{RevisionSpec, WikiUrl};

const SEPARATOR: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Page,
    Section,
    Search,
    Info,
    Category,
    Backlinks,
    Compare,
}

impl Namespace {
    fn tag(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Search => "search",
            Self::Info => "info",
            Self::Category => "category",
            Self::Backlinks => "backlinks",
            Self::Compare => "compare",
        }
    }
}

fn compose(namespace: Namespace, wiki: &WikiUrl, parts: &[&str]) -> String {
    let mut key = format!("{}{}{}", namespace.tag(), SEPARATOR, wiki.as_str());
    for part in parts {
        key.push_str(SEPARATOR);
        key.push_str(part);
    }
    key
}

pub(crate) fn outline(wiki: &WikiUrl, title: &str) -> String {
    compose(Namespace::Page, wiki, &[title, "outline"])
}

pub(crate) fn full_page(wiki: &WikiUrl, title: &str) -> String {
    compose(Namespace::Page, wiki, &[title, "full"])
}

pub(crate) fn section(wiki: &WikiUrl, title: &str, index: u32) -> String {
    compose(Namespace::Section, wiki, &[title, &index.to_string()])
}

/// The limit goes last so free-text queries containing `|` stay unambiguous.
pub(crate) fn search(wiki: &WikiUrl, query: &str, limit: u32) -> String {
    compose(Namespace::Search, wiki, &[query, &limit.to_string()])
}

pub(crate) fn info(wiki: &WikiUrl) -> String {
    compose(Namespace::Info, wiki, &[])
}

pub(crate) fn category(wiki: &WikiUrl, category: &str, limit: u32) -> String {
    compose(Namespace::Category, wiki, &[category, &limit.to_string()])
}

pub(crate) fn backlinks(wiki: &WikiUrl, title: &str, limit: u32) -> String {
    compose(Namespace::Backlinks, wiki, &[title, &limit.to_string()])
}

pub(crate) fn compare(wiki: &WikiUrl, title: &str, from: RevisionSpec, to: RevisionSpec) -> String {
    compose(
        Namespace::Compare,
        wiki,
        &[title, &from.to_string(), &to.to_string()],
    )
}
