// src/api/responses.rs
//! Wire types for MediaWiki API responses.
//!
//! MediaWiki's JSON is loose: the same field arrives under different keys
//! depending on the format version, and a response carries exactly one of
//! several top-level envelopes. These types accept both spellings and
//! [`Envelope`] makes the choice of envelope explicit.

use crate::error::WikiError;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// The successful body of one API response.
///
/// Error envelopes never reach this type; the parser turns them into
/// [`WikiError::Api`] first.
#[derive(Debug, Clone)]
pub enum Envelope {
    Query(MwQuery),
    Parse(MwParse),
    Compare(MwCompare),
}

impl Envelope {
    fn kind(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Parse(_) => "parse",
            Self::Compare(_) => "compare",
        }
    }

    fn unexpected(&self, wanted: &str) -> WikiError {
        WikiError::MalformedResponse(format!(
            "expected a {} envelope, got {}",
            wanted,
            self.kind()
        ))
    }

    pub fn into_query(self) -> Result<MwQuery, WikiError> {
        match self {
            Self::Query(query) => Ok(query),
            other => Err(other.unexpected("query")),
        }
    }

    pub fn into_parse(self) -> Result<MwParse, WikiError> {
        match self {
            Self::Parse(parse) => Ok(parse),
            other => Err(other.unexpected("parse")),
        }
    }

    pub fn into_compare(self) -> Result<MwCompare, WikiError> {
        match self {
            Self::Compare(compare) => Ok(compare),
            other => Err(other.unexpected("compare")),
        }
    }
}

/// An `error` object reported by the wiki with a 2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct MwError {
    pub code: String,
    #[serde(default, alias = "text")]
    pub info: String,
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// HTML or wikitext as returned by `action=parse`.
///
/// Format version 2 sends a bare string; version 1 wraps it as `{"*": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedText(pub String);

impl RenderedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for RenderedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Wrapped {
                #[serde(rename = "*")]
                text: String,
            },
        }

        match Repr::deserialize(deserializer) {
            Ok(Repr::Bare(text)) | Ok(Repr::Wrapped { text }) => Ok(RenderedText(text)),
            Err(_) => Err(de::Error::custom(
                "rendered text must be a string or an object with a \"*\" field",
            )),
        }
    }
}

/// Accepts `"3"` or `3` for identifiers MediaWiki sends as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(text) => text,
        Repr::Number(n) => n.to_string(),
    })
}

/// A boolean flag that format version 1 sends as an empty string when set.
fn presence_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Bool(false) | serde_json::Value::Null))
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwCategory {
    #[serde(alias = "category", alias = "*")]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwLink {
    #[serde(default)]
    pub ns: i32,
    #[serde(alias = "*")]
    pub title: String,
}

// ---------------------------------------------------------------------------
// action=parse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MwParse {
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub text: Option<RenderedText>,
    #[serde(default)]
    pub sections: Vec<MwSection>,
    #[serde(default)]
    pub categories: Vec<MwCategory>,
    #[serde(default)]
    pub links: Vec<MwLink>,
}

/// One table-of-contents entry. `line` is an HTML fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct MwSection {
    pub toclevel: u32,
    pub line: String,
    #[serde(deserialize_with = "string_or_number")]
    pub index: String,
}

// ---------------------------------------------------------------------------
// action=compare
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MwCompare {
    #[serde(default)]
    pub fromrevid: Option<u64>,
    #[serde(default)]
    pub torevid: Option<u64>,
    #[serde(default)]
    pub fromtimestamp: Option<String>,
    #[serde(default)]
    pub totimestamp: Option<String>,
    #[serde(default)]
    pub fromuser: Option<String>,
    #[serde(default)]
    pub touser: Option<String>,
    #[serde(default)]
    pub fromcomment: Option<String>,
    #[serde(default)]
    pub tocomment: Option<String>,
    /// Diff table rows as HTML.
    #[serde(default, alias = "*")]
    pub body: String,
}

// ---------------------------------------------------------------------------
// action=query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MwQuery {
    #[serde(default)]
    pub pages: Option<MwPages>,
    #[serde(default)]
    pub search: Vec<MwSearchHit>,
    #[serde(default)]
    pub searchinfo: Option<MwSearchInfo>,
    #[serde(default)]
    pub general: Option<MwGeneral>,
    #[serde(default)]
    pub namespaces: HashMap<String, MwNamespace>,
    #[serde(default)]
    pub statistics: Option<MwStatistics>,
    #[serde(default)]
    pub categorymembers: Vec<MwCategoryMember>,
    #[serde(default)]
    pub backlinks: Vec<MwBacklink>,
}

/// `query.pages`: an array under format version 2, an id-keyed map under 1.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MwPages {
    List(Vec<MwPage>),
    Keyed(HashMap<String, MwPage>),
}

impl MwPages {
    pub fn into_vec(self) -> Vec<MwPage> {
        match self {
            Self::List(pages) => pages,
            Self::Keyed(map) => {
                let mut pages: Vec<(String, MwPage)> = map.into_iter().collect();
                pages.sort_by(|a, b| a.0.cmp(&b.0));
                pages.into_iter().map(|(_, page)| page).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwPage {
    pub title: String,
    #[serde(default)]
    pub ns: i32,
    #[serde(default, deserialize_with = "presence_flag")]
    pub missing: bool,
    #[serde(default)]
    pub revisions: Vec<MwRevision>,
    #[serde(default)]
    pub categories: Vec<MwCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwRevision {
    #[serde(default)]
    pub slots: HashMap<String, MwSlot>,
    #[serde(default, alias = "*")]
    pub content: Option<String>,
}

impl MwRevision {
    /// Wikitext of the main slot, falling back to the pre-slots layout.
    pub fn into_content(mut self) -> Option<String> {
        self.slots
            .remove("main")
            .and_then(|slot| slot.content)
            .or(self.content)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwSlot {
    #[serde(default, alias = "*")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwSearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub wordcount: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MwSearchInfo {
    #[serde(default)]
    pub totalhits: Option<u64>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MwGeneral {
    #[serde(default)]
    pub sitename: String,
    #[serde(default)]
    pub mainpage: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub lang: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwNamespace {
    pub id: i32,
    #[serde(default, alias = "*")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MwStatistics {
    #[serde(default)]
    pub articles: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwCategoryMember {
    pub title: String,
    #[serde(default)]
    pub ns: i32,
    #[serde(default, rename = "type")]
    pub member_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MwBacklink {
    pub title: String,
    #[serde(default)]
    pub ns: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rendered_text_accepts_both_shapes() {
        let bare: RenderedText = serde_json::from_str(r#""<p>Hi</p>""#).unwrap();
        let wrapped: RenderedText = serde_json::from_str(r#"{"*": "<p>Hi</p>"}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.as_str(), "<p>Hi</p>");
    }

    #[test]
    fn rendered_text_rejects_other_shapes() {
        let err = serde_json::from_str::<RenderedText>(r#"{"html": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("rendered text must be a string"));
    }

    #[test]
    fn pages_decode_as_list_or_map() {
        let list: MwPages = serde_json::from_str(r#"[{"title": "A", "ns": 0}]"#).unwrap();
        let keyed: MwPages =
            serde_json::from_str(r#"{"-1": {"title": "B", "missing": ""}}"#).unwrap();
        assert_eq!(list.into_vec()[0].title, "A");
        let keyed = keyed.into_vec();
        assert_eq!(keyed[0].title, "B");
        assert!(keyed[0].missing);
    }

    #[test]
    fn revision_content_prefers_main_slot() {
        let rev: MwRevision = serde_json::from_str(
            r#"{"slots": {"main": {"contentmodel": "wikitext", "content": "{{Infobox}}"}}}"#,
        )
        .unwrap();
        assert_eq!(rev.into_content().as_deref(), Some("{{Infobox}}"));

        let legacy: MwRevision = serde_json::from_str(r#"{"*": "old"}"#).unwrap();
        assert_eq!(legacy.into_content().as_deref(), Some("old"));
    }

    #[test]
    fn category_and_link_titles_accept_legacy_keys() {
        let cat: MwCategory = serde_json::from_str(r#"{"sortkey": "", "category": "Poets"}"#).unwrap();
        let legacy: MwCategory = serde_json::from_str(r#"{"sortkey": "", "*": "Poets"}"#).unwrap();
        assert_eq!(cat.title, legacy.title);

        let link: MwLink = serde_json::from_str(r#"{"ns": 0, "exists": "", "*": "Paris"}"#).unwrap();
        assert_eq!(link.title, "Paris");
    }

    #[test]
    fn section_index_accepts_numbers_and_strings() {
        let s: MwSection =
            serde_json::from_str(r#"{"toclevel": 1, "line": "History", "index": 2}"#).unwrap();
        assert_eq!(s.index, "2");
        let t: MwSection =
            serde_json::from_str(r#"{"toclevel": 1, "line": "X", "index": "T-1"}"#).unwrap();
        assert_eq!(t.index, "T-1");
    }
}
