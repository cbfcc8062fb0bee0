// tests/page_navigation.rs
//! Outline, section and full-page retrieval against an in-memory wiki.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wikinav::{ApiErrorCode, ErrorReport, WikiError};

#[tokio::test]
async fn outline_builds_the_section_tree() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let outline = navigator.page_outline(&wiki_url(), ARTICLE).await.unwrap();

    assert_eq!(outline.title, ARTICLE);
    assert!(outline.exists);
    let top: Vec<(u32, &str, u32)> = outline
        .sections
        .iter()
        .map(|s| (s.index, s.title.as_str(), s.level))
        .collect();
    assert_eq!(top, vec![(0, "Lead", 1), (1, "Biography", 2), (4, "Legacy", 2)]);

    let biography = &outline.sections[1];
    let children: Vec<(u32, u32)> = biography
        .subsections
        .iter()
        .map(|s| (s.index, s.level))
        .collect();
    assert_eq!(children, vec![(2, 3), (3, 3)]);
    assert!(outline.sections[0].subsections.is_empty());
}

#[tokio::test]
async fn outline_carries_summary_categories_infobox_and_related_pages() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let outline = navigator.page_outline(&wiki_url(), ARTICLE).await.unwrap();

    assert!(outline.summary.starts_with("Augusta Ada King was an English mathematician"));
    assert!(!outline.summary.contains("**"));
    assert_eq!(
        outline.summary_links,
        vec!["Charles Babbage", "Analytical Engine"]
    );
    assert_eq!(
        outline.categories,
        vec!["1815 births", "English mathematicians"]
    );
    assert_eq!(
        outline.see_also,
        vec!["Charles Babbage", "Analytical Engine"]
    );

    let infobox = outline.infobox.as_ref().expect("infobox present");
    assert_eq!(infobox.get("name").map(String::as_str), Some("Ada Lovelace"));
    assert_eq!(
        infobox.get("birth_place").map(String::as_str),
        Some("London, England")
    );
    assert!(!infobox.contains_key("known_for"));

    let lead = &outline.sections[0];
    assert_eq!(lead.word_count, 16);
    assert_eq!(outline.total_word_count, 16);
    assert!(lead.preview.is_some());
}

#[tokio::test]
async fn infobox_table_stays_out_of_the_summary() {
    let wiki = FakeWiki::new(|call| match (call.param("action"), call.param("prop")) {
        (Some("parse"), Some("text")) => (
            200,
            json!({"parse": {"title": ARTICLE, "pageid": 974, "text":
                "<table class=\"infobox\"><tr><th>Born</th><td>10 December 1815</td></tr></table><p>Ada was a mathematician.</p>"
            }}),
        ),
        _ => article_routes(call),
    });
    let navigator = navigator(&wiki);

    let outline = navigator.page_outline(&wiki_url(), ARTICLE).await.unwrap();

    assert_eq!(outline.summary, "Ada was a mathematician.");
    assert_eq!(outline.sections[0].preview.as_deref(), Some("Ada was a mathematician."));
    // "Born 10 December 1815 Ada was a mathematician."
    assert_eq!(outline.sections[0].word_count, 8);
}

#[tokio::test]
async fn repeated_outline_is_served_from_cache() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);
    let wiki_url = wiki_url();

    let first = navigator.page_outline(&wiki_url, ARTICLE).await.unwrap();
    let calls_after_first = wiki.api_calls().len();
    let second = navigator.page_outline(&wiki_url, ARTICLE).await.unwrap();

    assert_eq!(calls_after_first, 3);
    assert_eq!(wiki.api_calls().len(), calls_after_first);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(navigator.cached_entries(), 1);
}

#[tokio::test]
async fn titles_are_trimmed_before_lookup() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    navigator.page_outline(&wiki_url(), "  Ada Lovelace ").await.unwrap();
    navigator.page_outline(&wiki_url(), ARTICLE).await.unwrap();

    assert_eq!(wiki.api_calls().len(), 3);
    assert_eq!(wiki.api_calls()[0].param("page"), Some(ARTICLE));
}

#[tokio::test]
async fn empty_title_is_rejected_without_a_request() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let err = navigator.page_outline(&wiki_url(), "   ").await.unwrap_err();

    assert!(matches!(err, WikiError::Validation(_)));
    assert!(wiki.calls().is_empty());
}

#[tokio::test]
async fn infobox_failure_does_not_fail_the_outline() {
    let wiki = FakeWiki::new(|call| match call.param("prop") {
        Some("revisions") => (500, json!("Internal Server Error")),
        _ => article_routes(call),
    });
    let navigator = navigator(&wiki);

    let outline = navigator.page_outline(&wiki_url(), ARTICLE).await.unwrap();

    assert_eq!(outline.infobox, None);
    assert_eq!(outline.sections.len(), 3);
}

#[tokio::test]
async fn missing_page_reports_the_wiki_error() {
    let wiki = FakeWiki::new(|_| {
        api_error("missingtitle", "The page you specified doesn't exist.")
    });
    let navigator = navigator(&wiki);

    let err = navigator
        .page_outline(&wiki_url(), "No such page")
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(&ApiErrorCode::MissingTitle));
    let report = ErrorReport::from(&err);
    assert_eq!(report.error, "missingtitle");
    assert!(report.hint.is_some());
}

#[tokio::test]
async fn section_resolves_parent_and_neighbours() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let page = navigator
        .page_section(&wiki_url(), ARTICLE, 2)
        .await
        .unwrap();

    assert_eq!(page.title, ARTICLE);
    assert_eq!(page.section.index, 2);
    assert_eq!(page.section.title, "Early life");
    assert_eq!(page.section.level, 3);
    assert_eq!(page.section.links, vec!["London", "Lord Byron"]);
    let content = page.section.content.as_deref().unwrap();
    assert!(content.contains("Born in [London](/wiki/London) to Lord Byron."));

    assert_eq!(page.parent_section.as_ref().map(|s| s.index), Some(1));
    assert_eq!(page.adjacent.previous.as_ref().map(|s| s.index), Some(1));
    assert_eq!(
        page.adjacent.next.as_ref().map(|s| s.title.as_str()),
        Some("Adult years")
    );

    let section_call = wiki
        .api_calls()
        .into_iter()
        .find(|c| c.param("prop") == Some("text|links"))
        .unwrap();
    assert_eq!(section_call.param("section"), Some("2"));
}

#[tokio::test]
async fn last_section_has_no_next_and_top_level_parent_is_the_lead() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let page = navigator
        .page_section(&wiki_url(), ARTICLE, 4)
        .await
        .unwrap();

    assert_eq!(page.section.title, "Legacy");
    assert_eq!(page.parent_section.as_ref().map(|s| s.index), Some(0));
    assert_eq!(page.adjacent.previous.as_ref().map(|s| s.index), Some(3));
    assert_eq!(page.adjacent.next, None);
}

#[tokio::test]
async fn unknown_section_index_reports_available_count() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);

    let err = navigator
        .page_section(&wiki_url(), ARTICLE, 99)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WikiError::SectionNotFound {
            index: 99,
            available: 5
        }
    ));
    assert!(wiki
        .api_calls()
        .iter()
        .all(|c| c.param("prop") != Some("text|links")));
}

#[tokio::test]
async fn section_reuses_the_cached_outline() {
    let wiki = FakeWiki::new(article_routes);
    let navigator = navigator(&wiki);
    let wiki_url = wiki_url();

    navigator.page_outline(&wiki_url, ARTICLE).await.unwrap();
    navigator.page_section(&wiki_url, ARTICLE, 3).await.unwrap();
    navigator.page_section(&wiki_url, ARTICLE, 3).await.unwrap();

    // Three calls for the outline, one for the section.
    assert_eq!(wiki.api_calls().len(), 4);
}

#[tokio::test]
async fn full_page_warns_when_large() {
    let body = "word ".repeat(6000);
    let wiki = FakeWiki::new(move |_| {
        (
            200,
            json!({"parse": {
                "title": "Long page",
                "text": format!("<p>{}</p>", body),
                "links": []
            }}),
        )
    });
    let navigator = navigator(&wiki);

    let page = navigator.page_full(&wiki_url(), "Long page").await.unwrap();

    assert_eq!(page.word_count, 6000);
    assert!(page.warning.as_deref().unwrap().starts_with("Large page (6000 words)"));
    assert_eq!(wiki.api_calls()[0].param("disabletoc"), Some("1"));
}

#[tokio::test]
async fn full_page_scrapes_links_when_the_wiki_lists_none() {
    let wiki = FakeWiki::new(|_| {
        (
            200,
            json!({"parse": {
                "title": "Short",
                "text": "<p>See <a href=\"/wiki/Rust_(programming_language)\">Rust</a>.</p>"
            }}),
        )
    });
    let navigator = navigator(&wiki);

    let page = navigator.page_full(&wiki_url(), "Short").await.unwrap();

    assert_eq!(page.warning, None);
    assert_eq!(page.links, vec!["Rust (programming language)"]);
    assert_eq!(page.content, "See [Rust](/wiki/Rust_(programming_language)).");
}
