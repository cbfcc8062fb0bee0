// src/navigator/compare.rs
use super::{keys, Navigator};
use crate::api::responses::MwCompare;
use crate::api::ApiParams;
use crate::error::WikiError;
use crate::formatting::markdown_or_raw;
use crate::model::{CompareResponse, RevisionInfo};
use crate::types::{require_title, RevisionSpec, ValidationError, WikiUrl};
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use std::sync::Arc;

impl Navigator {
    /// A best-effort Markdown rendering of the changes between two
    /// revisions of a page.
    ///
    /// Only comparisons between two fixed revision ids are cached; relative
    /// specifiers name different revisions after every edit.
    pub async fn compare(
        &self,
        wiki: &WikiUrl,
        title: &str,
        from: RevisionSpec,
        to: RevisionSpec,
    ) -> Result<Arc<CompareResponse>, WikiError> {
        let title = require_title(title, "title")?;
        let params = compare_params(title, from, to)?;
        let cacheable = from.revision_id().is_some() && to.revision_id().is_some();
        let key = keys::compare(wiki, title, from, to);
        if cacheable {
            if let Some(hit) = self.cached(&key) {
                return Ok(hit);
            }
        }

        let diff = self.api.request(wiki, params).await?.into_compare()?;
        let response = assemble(title, diff)?;

        if cacheable {
            Ok(self.store(key, response, self.ttl.content))
        } else {
            Ok(Arc::new(response))
        }
    }
}

/// Maps a pair of revision specifiers onto `action=compare` parameters.
///
/// The API only resolves relative revisions on the `to` side, and treats
/// `torelative=prev` as "the revision before `from`", swapping the two.
/// That covers every pair that starts at a revision id or the current
/// revision, plus `prev` against a fixed point; other pairs are rejected.
pub fn compare_params(
    title: &str,
    from: RevisionSpec,
    to: RevisionSpec,
) -> Result<ApiParams, ValidationError> {
    use crate::types::RevisionSpec::{Current, Id, Prev};

    let base = ApiParams::action("compare").set("prop", "diff|ids|timestamp|user|comment");
    let params = match (from, to) {
        (Id(a), Id(b)) => base.set("fromrev", a).set("torev", b),
        (Id(a), relative) => base.set("fromrev", a).set("torelative", relative_value(relative)),
        (Current, Id(b)) => base.set("fromtitle", title).set("torev", b),
        (Current, relative) => base
            .set("fromtitle", title)
            .set("torelative", relative_value(relative)),
        (Prev, Current) => base.set("fromtitle", title).set("torelative", "prev"),
        (Prev, Id(b)) => base.set("fromrev", b).set("torelative", "prev"),
        (from, to) => {
            return Err(ValidationError::UnsupportedComparison {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    };
    Ok(params)
}

fn relative_value(spec: RevisionSpec) -> &'static str {
    spec.relative().unwrap_or("cur")
}

fn assemble(title: &str, diff: MwCompare) -> Result<CompareResponse, WikiError> {
    let from = RevisionInfo {
        id: diff.fromrevid.ok_or_else(|| {
            WikiError::MalformedResponse("compare response has no fromrevid".to_string())
        })?,
        timestamp: parse_timestamp(diff.fromtimestamp.as_deref()),
        user: diff.fromuser,
        comment: diff.fromcomment,
    };
    let to = RevisionInfo {
        id: diff.torevid.ok_or_else(|| {
            WikiError::MalformedResponse("compare response has no torevid".to_string())
        })?,
        timestamp: parse_timestamp(diff.totimestamp.as_deref()),
        user: diff.touser,
        comment: diff.tocomment,
    };

    // The body is bare table rows; give the parser the table around them.
    let table = format!("<table>{}</table>", diff.body);
    let diff_markdown = if diff.body.trim().is_empty() {
        String::new()
    } else {
        markdown_or_raw(&table)
    };

    Ok(CompareResponse {
        title: title.to_string(),
        from,
        to,
        diff_summary: summarize_diff(&table),
        diff_markdown,
    })
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable revision timestamp {:?}: {}", raw, e);
            None
        }
    }
}

/// Counts changed lines in a rendered diff table.
fn summarize_diff(table_html: &str) -> String {
    let document = Html::parse_fragment(table_html);
    let (mut added, mut removed) = (0usize, 0usize);
    for cell in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        for class in cell.value().classes() {
            match class {
                "diff-addedline" => added += 1,
                "diff-deletedline" => removed += 1,
                _ => {}
            }
        }
    }

    if added == 0 && removed == 0 {
        "No textual changes".to_string()
    } else {
        format!("{} lines added, {} lines removed", added, removed)
    }
}
