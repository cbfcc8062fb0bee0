// src/model/mod.rs
//! Assembled responses returned by the navigator.
//!
//! Everything here is built per request from API data, cached for a while,
//! and serialized as-is for callers. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat infobox attributes, sorted by key for deterministic output.
pub type Infobox = BTreeMap<String, String>;

/// One section of a page and, in an outline, its subsections.
///
/// The lead is always index 0 and level 1. A table-of-contents entry at
/// `toclevel` n has level n + 1, so a child's level is always strictly
/// greater than its parent's and level 0 never occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub index: u32,
    pub title: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    /// A section with no content yet.
    pub fn heading(index: u32, title: impl Into<String>, level: u32) -> Self {
        Self {
            index,
            title: title.into(),
            level,
            preview: None,
            content: None,
            links: Vec::new(),
            word_count: 0,
            subsections: Vec::new(),
        }
    }

    pub fn reference(&self) -> SectionRef {
        SectionRef {
            index: self.index,
            title: self.title.clone(),
        }
    }
}

/// Points at a section without carrying its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub index: u32,
    pub title: String,
}

/// The sections immediately before and after another one, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<SectionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<SectionRef>,
}

impl Adjacent {
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// A page's structure without its full text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOutline {
    pub title: String,
    pub exists: bool,
    pub summary: String,
    pub summary_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infobox: Option<Infobox>,
    pub sections: Vec<Section>,
    pub categories: Vec<String>,
    pub see_also: Vec<String>,
    pub total_word_count: usize,
}

/// One section with enough context to navigate from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub title: String,
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section: Option<SectionRef>,
    #[serde(default, skip_serializing_if = "Adjacent::is_empty")]
    pub adjacent: Adjacent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFull {
    pub title: String,
    pub content: String,
    pub links: Vec<String>,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiInfo {
    pub name: String,
    pub base_url: String,
    pub main_page: String,
    pub language: String,
    pub article_count: u64,
    /// Namespace id to local name; the main namespace has an empty name.
    pub namespaces: BTreeMap<i32, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub snippet_links: Vec<String>,
    pub word_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_hits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// What kind of page a category member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Page,
    Subcat,
    File,
}

impl MemberKind {
    /// Maps the API's `type` field, falling back to the namespace number.
    pub fn classify(member_type: Option<&str>, namespace: i32) -> Self {
        match member_type {
            Some("subcat") => Self::Subcat,
            Some("file") => Self::File,
            Some(_) => Self::Page,
            None => match namespace {
                14 => Self::Subcat,
                6 => Self::File,
                _ => Self::Page,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMember {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
    pub members: Vec<CategoryMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_categories: Vec<String>,
    pub total_members: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backlink {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklinksResponse {
    pub title: String,
    pub backlinks: Vec<Backlink>,
    pub total_count: usize,
}

/// One side of a comparison as the wiki resolved it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionInfo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub title: String,
    pub from: RevisionInfo,
    pub to: RevisionInfo,
    pub diff_summary: String,
    pub diff_markdown: String,
}
