// src/formatting/text.rs
//! Word counting and previews over rendered Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[^`]*```").expect("valid regex"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").expect("valid regex"));
// Link targets may hold one level of parentheses, as in `/wiki/Go_(game)`.
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\((?:[^()\s]|\([^()]*\))+\)").expect("valid regex")
});
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\((?:[^()\s]|\([^()]*\))+\)").expect("valid regex")
});
// Horizontal rules and table separator rows.
static RULE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t|:-]*-{3,}[ \t|:-]*$").expect("valid regex"));
static CELL_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\?\|").expect("valid regex"));
static QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:>[ \t]?)+").expect("valid regex"));
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]+").expect("valid regex"));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").expect("valid regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+\s+").expect("valid regex"));

/// Removes Markdown syntax, keeping link display text, image alt text and
/// table cell contents.
pub fn strip_markdown(markdown: &str) -> String {
    let text = FENCED_CODE.replace_all(markdown, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = RULE_ROW.replace_all(&text, "");
    let text = CELL_DELIMITER.replace_all(&text, " ");
    let text = QUOTE.replace_all(&text, "");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "");
    HEADING.replace_all(&text, "").into_owned()
}

/// The Markdown with every table line removed.
///
/// Lead sections usually open with an infobox table; previews read the
/// prose that follows it.
pub fn without_tables(markdown: &str) -> String {
    markdown
        .lines()
        .filter(|line| !line.trim_start().starts_with('|'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of whitespace-separated words once Markdown syntax is removed.
pub fn count_words(markdown: &str) -> usize {
    strip_markdown(markdown).split_whitespace().count()
}

/// The first `max_words` words of the text, with `...` appended only when
/// something was cut.
pub fn extract_preview(markdown: &str, max_words: usize) -> String {
    let stripped = strip_markdown(markdown);
    let words: Vec<&str> = stripped.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}...", words[..max_words].join(" "))
}
