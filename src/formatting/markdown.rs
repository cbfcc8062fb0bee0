// src/formatting/markdown.rs
//! HTML to Markdown conversion for MediaWiki-rendered pages.
//!
//! The output style is fixed: ATX headings, `-` bullets, fenced code,
//! `**` strong, `*` emphasis and `---` rules. MediaWiki chrome (edit
//! links, styles, scripts) is dropped and reference markers become `[n]`.

use crate::constants::{HTML_MAX_RENDER_DEPTH, INDENT_SPACES};
use crate::error::WikiError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Converts an HTML fragment to Markdown.
///
/// Fails with [`WikiError::Conversion`] when the markup nests deeper than
/// the converter is willing to descend.
pub fn html_to_markdown(html: &str) -> Result<String, WikiError> {
    let fragment = Html::parse_fragment(html);
    let ctx = RenderContext::default();
    let raw = render_children(fragment.root_element(), &ctx, 0)?;
    Ok(cleanup_markdown(&raw))
}

/// Tag-free text with whitespace collapsed.
///
/// Used for section titles, which MediaWiki delivers as HTML fragments.
pub fn html_to_plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::new();
    for node in fragment.root_element().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ElementRef::wrap(ancestor).is_some_and(|el| is_skipped(&el))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }
    collapse_whitespace(&text).trim().to_string()
}

fn cleanup_markdown(markdown: &str) -> String {
    let trimmed_lines: Vec<&str> = markdown.lines().map(str::trim_end).collect();
    let joined = trimmed_lines.join("\n");
    EXCESS_NEWLINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct RenderContext {
    /// Nesting of enclosing `ul`/`ol` elements.
    list_depth: usize,
}

impl RenderContext {
    fn nested_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
        }
    }
}

fn is_skipped(el: &ElementRef) -> bool {
    match el.value().name() {
        "script" | "style" | "noscript" => true,
        "span" => el.value().classes().any(|c| c == "mw-editsection"),
        _ => false,
    }
}

fn render_children(parent: ElementRef, ctx: &RenderContext, depth: usize) -> Result<String, WikiError> {
    if depth > HTML_MAX_RENDER_DEPTH {
        return Err(WikiError::Conversion(format!(
            "markup nests deeper than {} elements",
            HTML_MAX_RENDER_DEPTH
        )));
    }

    let mut out = String::new();
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&collapse_whitespace(text)),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    out.push_str(&render_element(el, ctx, depth + 1)?);
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

fn render_element(el: ElementRef, ctx: &RenderContext, depth: usize) -> Result<String, WikiError> {
    if is_skipped(&el) {
        return Ok(String::new());
    }

    let name = el.value().name();
    let rendered = match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(name.as_bytes()[1] - b'0');
            let text = render_children(el, ctx, depth)?;
            block(&format!("{} {}", "#".repeat(level), single_line(&text)))
        }
        "p" | "div" | "section" | "article" | "main" | "figure" | "figcaption" | "center" => {
            block(render_children(el, ctx, depth)?.trim())
        }
        "br" => "\n".to_string(),
        "hr" => block("---"),
        "b" | "strong" => wrap_inline(&render_children(el, ctx, depth)?, "**"),
        "i" | "em" => wrap_inline(&render_children(el, ctx, depth)?, "*"),
        "sup" if el.value().classes().any(|c| c == "reference") => reference_marker(&el),
        "code" | "tt" | "kbd" => {
            let code: String = el.text().collect();
            if code.is_empty() {
                String::new()
            } else {
                format!("`{}`", code)
            }
        }
        "pre" => {
            let code: String = el.text().collect();
            block(&format!("```\n{}\n```", code.trim_end_matches('\n')))
        }
        "a" => render_anchor(el, ctx, depth)?,
        "img" => {
            let alt = el.value().attr("alt").unwrap_or_default();
            match el.value().attr("src") {
                Some(src) => format!("![{}]({})", alt, src),
                None => String::new(),
            }
        }
        "ul" | "ol" => render_list(el, ctx, depth)?,
        "blockquote" => {
            let inner = render_children(el, ctx, depth)?;
            let quoted: Vec<String> = cleanup_markdown(&inner)
                .lines()
                .map(|line| format!("> {}", line).trim_end().to_string())
                .collect();
            block(&quoted.join("\n"))
        }
        "table" => render_table(el, ctx, depth)?,
        "dt" => format!("\n\n**{}**\n", single_line(&render_children(el, ctx, depth)?)),
        "dd" | "li" => format!("\n{}\n\n", render_children(el, ctx, depth)?.trim()),
        _ => render_children(el, ctx, depth)?,
    };
    Ok(rendered)
}

fn block(content: &str) -> String {
    if content.is_empty() {
        String::new()
    } else {
        format!("\n\n{}\n\n", content)
    }
}

fn single_line(text: &str) -> String {
    collapse_whitespace(text).trim().to_string()
}

/// Wraps inline content in a marker, keeping surrounding spaces outside it.
fn wrap_inline(inner: &str, marker: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner.to_string();
    }
    let leading = if inner.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if inner.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{}{}{}{}{}", leading, marker, trimmed, marker, trailing)
}

fn reference_marker(el: &ElementRef) -> String {
    let text: String = el.text().collect();
    let number = text.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if number.is_empty() {
        String::new()
    } else {
        format!("[{}]", number)
    }
}

fn render_anchor(el: ElementRef, ctx: &RenderContext, depth: usize) -> Result<String, WikiError> {
    let text = render_children(el, ctx, depth)?;
    let label = single_line(&text);
    Ok(match el.value().attr("href") {
        Some(href) if !label.is_empty() => format!("[{}]({})", label, href),
        _ => text,
    })
}

fn render_list(el: ElementRef, ctx: &RenderContext, depth: usize) -> Result<String, WikiError> {
    let ordered = el.value().name() == "ol";
    let indent = " ".repeat(ctx.list_depth * INDENT_SPACES);
    let inner_ctx = ctx.nested_list();

    let mut items = Vec::new();
    let list_items = el
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li");
    for (position, item) in list_items.enumerate() {
        let marker = if ordered {
            format!("{}. ", position + 1)
        } else {
            "- ".to_string()
        };
        let content = render_children(item, &inner_ctx, depth + 1)?;
        let content = EXCESS_NEWLINES.replace_all(content.trim(), "\n");
        let mut lines = content.lines();
        let first = lines.next().unwrap_or_default().trim();
        let mut rendered = format!("{}{}{}", indent, marker, first);
        for line in lines.filter(|line| !line.trim().is_empty()) {
            rendered.push('\n');
            rendered.push_str(line);
        }
        items.push(rendered);
    }

    if items.is_empty() {
        return Ok(String::new());
    }
    let body = items.join("\n");
    Ok(if ctx.list_depth == 0 {
        block(&body)
    } else {
        format!("\n{}\n", body)
    })
}

fn render_table(el: ElementRef, ctx: &RenderContext, depth: usize) -> Result<String, WikiError> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for child in el.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(render_row(child, ctx, depth + 1)?),
            "thead" | "tbody" | "tfoot" => {
                for row in child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr")
                {
                    rows.push(render_row(row, ctx, depth + 2)?);
                }
            }
            _ => {}
        }
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Ok(String::new());
    }

    let format_row = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(width, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&rows[0]));
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        lines.push(format_row(row));
    }
    Ok(block(&lines.join("\n")))
}

fn render_row(row: ElementRef, ctx: &RenderContext, depth: usize) -> Result<Vec<String>, WikiError> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| {
            let text = render_children(cell, ctx, depth + 1)?;
            Ok(single_line(&text).replace('|', "\\|"))
        })
        .collect()
}
