// src/formatting/infobox.rs
//! Infobox extraction from raw wikitext.
//!
//! Rendered infoboxes differ from skin to skin, so the attribute map is
//! read from the template source instead. Only the first infobox on a page
//! is considered and nested infoboxes are not supported.

use crate::model::Infobox;
use once_cell::sync::Lazy;
use regex::Regex;

static INFOBOX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{\s*[Ii]nfobox[^\}]*?\n(.*?)\n\}\}").expect("valid infobox regex")
});
static WIKI_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[([^\|\]]+)(?:\|([^\]]+))?\]\]").expect("valid wiki link regex")
});
static LIFE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\{\{\s*(?:birth|death) date(?: and age)?\s*\|(?:\s*\w+\s*=[^\|\}]*\|)*\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\d+)[^\}]*\}\}",
    )
    .expect("valid date template regex")
});
static AGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{\s*age\s*\|[^\}]+\}\}").expect("valid age template regex"));
static CIRCA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{\s*circa\s*\|([^\}]+)\}\}").expect("valid circa template regex")
});
static FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{\s*flag\s*\|([^\}]+)\}\}").expect("valid flag template regex")
});
static COORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{\s*coord\s*\|[^\}]+\}\}").expect("valid coord template regex")
});
static ANY_TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^\}]+\}\}").expect("valid template regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Parses the first `{{Infobox ...}}` template into a sorted attribute map.
///
/// Returns `None` when the page has no infobox or it carries no non-empty
/// attributes; that is the normal case for many pages.
pub fn extract_infobox(wikitext: &str) -> Option<Infobox> {
    let body = INFOBOX.captures(wikitext)?.get(1)?.as_str();

    let mut infobox = Infobox::new();
    let mut current: Option<(String, String)> = None;

    for line in body.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let new_pair = line
            .strip_prefix('|')
            .and_then(|rest| rest.split_once('='));
        match new_pair {
            Some((key, value)) => {
                if let Some((key, value)) = current.take() {
                    insert_cleaned(&mut infobox, key, &value);
                }
                current = Some((key.trim().to_string(), value.trim().to_string()));
            }
            None => {
                if let Some((_, value)) = current.as_mut() {
                    value.push(' ');
                    value.push_str(line.trim_start_matches('|'));
                }
            }
        }
    }
    if let Some((key, value)) = current {
        insert_cleaned(&mut infobox, key, &value);
    }

    if infobox.is_empty() {
        None
    } else {
        Some(infobox)
    }
}

fn insert_cleaned(infobox: &mut Infobox, key: String, raw: &str) {
    let value = clean_value(raw);
    if !key.is_empty() && !value.is_empty() {
        infobox.insert(key, value);
    }
}

/// Reduces a template value to readable text.
fn clean_value(raw: &str) -> String {
    let value = WIKI_LINK.replace_all(raw.trim(), |caps: &regex::Captures| {
        caps.get(2)
            .or_else(|| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    });
    let value = LIFE_DATE.replace_all(&value, "$1-$2-$3");
    let value = AGE.replace_all(&value, "");
    let value = CIRCA.replace_all(&value, "circa $1");
    let value = FLAG.replace_all(&value, "$1");
    let value = COORD.replace_all(&value, "");
    let value = ANY_TEMPLATE.replace_all(&value, "");
    let value = HTML_TAG.replace_all(&value, "");
    let value = value.replace("'''", "").replace("''", "");
    WHITESPACE.replace_all(value.trim(), " ").into_owned()
}
