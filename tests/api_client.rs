// tests/api_client.rs
//! Endpoint discovery, error classification and shutdown.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wikinav::api::{ApiParams, MediaWikiApi};
use wikinav::{ApiErrorCode, ErrorReport, HttpTransport, WikiError, WikiUrl};

fn site_info() -> (u16, serde_json::Value) {
    (
        200,
        json!({"batchcomplete": true, "query": {
            "general": {
                "sitename": "Example Wiki",
                "mainpage": "Main Page",
                "base": "https://wiki.example.org/wiki/Main_Page",
                "lang": "en"
            },
            "namespaces": {
                "-1": {"id": -1, "case": "first-letter", "name": "Special", "canonical": "Special"},
                "0": {"id": 0, "case": "first-letter", "name": "", "content": true},
                "14": {"id": 14, "case": "first-letter", "name": "Category", "canonical": "Category"}
            },
            "statistics": {"pages": 1200, "articles": 345, "edits": 9000}
        }}),
    )
}

#[tokio::test]
async fn discovery_falls_back_to_wikimedia_layout_and_remembers_it() {
    let wiki = FakeWiki::at("/w/api.php", |_| site_info());
    let navigator = navigator(&wiki);
    let wiki_url = wiki_url();

    navigator.wiki_info(&wiki_url).await.unwrap();
    navigator.search(&wiki_url, "anything", 5).await.unwrap();

    let probed: Vec<String> = wiki.probes().into_iter().map(|c| c.url).collect();
    assert_eq!(
        probed,
        vec![
            "https://wiki.example.org/api.php".to_string(),
            "https://wiki.example.org/w/api.php".to_string(),
        ]
    );
    assert!(wiki
        .api_calls()
        .iter()
        .all(|c| c.url == "https://wiki.example.org/w/api.php"));
}

#[tokio::test]
async fn stock_layout_is_found_with_a_single_probe() {
    let wiki = FakeWiki::new(|_| site_info());
    let transport: Arc<dyn HttpTransport> = wiki.clone();
    let api = MediaWikiApi::new(transport, 1000.0, CancellationToken::new()).unwrap();
    let wiki_url = wiki_url();

    assert_eq!(api.known_endpoint(&wiki_url), None);
    api.request(&wiki_url, ApiParams::query().set("meta", "siteinfo"))
        .await
        .unwrap();

    assert_eq!(wiki.probes().len(), 1);
    assert_eq!(
        api.known_endpoint(&wiki_url).as_deref(),
        Some("https://wiki.example.org/api.php")
    );
}

#[tokio::test]
async fn unreachable_wiki_reports_every_candidate() {
    let wiki = FakeWiki::unreachable();
    let navigator = navigator(&wiki);

    let err = navigator.wiki_info(&wiki_url()).await.unwrap_err();

    match &err {
        WikiError::NoReachableEndpoint { wiki, tried } => {
            assert_eq!(wiki, "https://wiki.example.org");
            assert_eq!(tried, &vec!["/api.php".to_string(), "/w/api.php".to_string()]);
        }
        other => panic!("expected NoReachableEndpoint, got {:?}", other),
    }
    assert_eq!(ErrorReport::from(&err).error, "no_api_endpoint");
}

#[tokio::test]
async fn every_call_uses_the_standard_format() {
    let wiki = FakeWiki::new(|_| site_info());
    let navigator = navigator(&wiki);

    navigator.wiki_info(&wiki_url()).await.unwrap();

    let call = &wiki.api_calls()[0];
    assert_eq!(call.param("format"), Some("json"));
    assert_eq!(call.param("formatversion"), Some("2"));
    assert_eq!(call.param("maxlag"), Some("5"));
    assert_eq!(call.param("meta"), Some("siteinfo"));
}

#[tokio::test]
async fn wiki_info_maps_site_metadata() {
    let wiki = FakeWiki::new(|_| site_info());
    let navigator = navigator(&wiki);

    let info = navigator.wiki_info(&wiki_url()).await.unwrap();

    assert_eq!(info.name, "Example Wiki");
    assert_eq!(info.base_url, "https://wiki.example.org");
    assert_eq!(info.main_page, "Main Page");
    assert_eq!(info.language, "en");
    assert_eq!(info.article_count, 345);
    assert_eq!(
        info.namespaces.iter().map(|(id, name)| (*id, name.as_str())).collect::<Vec<_>>(),
        vec![(-1, "Special"), (0, ""), (14, "Category")]
    );
}

#[tokio::test]
async fn pasted_article_urls_share_one_wiki() {
    let wiki = FakeWiki::new(|_| site_info());
    let navigator = navigator(&wiki);

    let pasted = WikiUrl::parse("https://wiki.example.org/wiki/Some_Article").unwrap();
    navigator.wiki_info(&pasted).await.unwrap();
    navigator.wiki_info(&wiki_url()).await.unwrap();

    assert_eq!(wiki.api_calls().len(), 1);
    assert_eq!(wiki.probes().len(), 1);
}

#[tokio::test]
async fn maxlag_is_classified_as_retryable() {
    let wiki = FakeWiki::new(|_| api_error("maxlag", "Waiting for 10.64.0.1: 7 seconds lagged."));
    let navigator = navigator(&wiki);

    let err = navigator.wiki_info(&wiki_url()).await.unwrap_err();

    assert_eq!(err.api_code(), Some(&ApiErrorCode::MaxLag));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn server_errors_surface_status_and_body() {
    let wiki = FakeWiki::new(|_| (503, json!("Service Unavailable")));
    let navigator = navigator(&wiki);

    let err = navigator.wiki_info(&wiki_url()).await.unwrap_err();

    match err {
        WikiError::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("Service Unavailable"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_bodies_are_malformed() {
    let wiki = FakeWiki::new(|_| (200, json!({"batchcomplete": true})));
    let navigator = navigator(&wiki);

    let err = navigator.wiki_info(&wiki_url()).await.unwrap_err();

    assert!(matches!(err, WikiError::MalformedResponse(_)));
}

#[tokio::test]
async fn failures_are_not_cached() {
    let wiki = FakeWiki::new(|_| (503, json!("Service Unavailable")));
    let navigator = navigator(&wiki);
    let wiki_url = wiki_url();

    assert!(navigator.wiki_info(&wiki_url).await.is_err());
    assert!(navigator.wiki_info(&wiki_url).await.is_err());

    assert_eq!(wiki.api_calls().len(), 2);
    assert_eq!(navigator.cached_entries(), 0);
}

#[tokio::test]
async fn shutdown_cancels_later_requests() {
    let wiki = FakeWiki::new(|_| site_info());
    let navigator = navigator(&wiki);

    navigator.shutdown().await;
    let err = navigator.wiki_info(&wiki_url()).await.unwrap_err();

    assert!(matches!(err, WikiError::Cancelled));
    assert!(wiki.calls().is_empty());
    assert_eq!(ErrorReport::from(&err).error, "cancelled");
}

#[tokio::test]
async fn cached_answers_survive_shutdown() {
    let wiki = FakeWiki::new(|_| site_info());
    let navigator = navigator(&wiki);
    let wiki_url = wiki_url();

    navigator.wiki_info(&wiki_url).await.unwrap();
    navigator.shutdown().await;

    assert!(navigator.wiki_info(&wiki_url).await.is_ok());
}
