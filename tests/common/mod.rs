// tests/common/mod.rs
//! An in-memory wiki behind the `HttpTransport` seam.

#![allow(dead_code)]

use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wikinav::{ApiResponse, HttpTransport, Navigator, WikiConfig, WikiError, WikiUrl};

pub const WIKI: &str = "https://wiki.example.org";

/// One request the navigator sent.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub params: HashMap<String, String>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Discovery probes are the only calls without `formatversion`.
    pub fn is_probe(&self) -> bool {
        self.param("formatversion").is_none()
    }
}

type Handler = Box<dyn Fn(&Call) -> (u16, Value) + Send + Sync>;

pub struct FakeWiki {
    api_url: Option<String>,
    handler: Handler,
    calls: Mutex<Vec<Call>>,
}

impl FakeWiki {
    /// A wiki whose API lives at `path` and answers with `handler`.
    pub fn at<F>(path: &str, handler: F) -> Arc<Self>
    where
        F: Fn(&Call) -> (u16, Value) + Send + Sync + 'static,
    {
        Arc::new(Self {
            api_url: Some(format!("{}{}", WIKI, path)),
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A wiki with its API at the stock `/api.php`.
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Call) -> (u16, Value) + Send + Sync + 'static,
    {
        Self::at("/api.php", handler)
    }

    /// A host where every path answers 404.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            api_url: None,
            handler: Box::new(|_| (404, Value::Null)),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// API calls, probes excluded.
    pub fn api_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| !c.is_probe()).collect()
    }

    pub fn probes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_probe).collect()
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeWiki {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<ApiResponse<String>, WikiError> {
        let call = Call {
            url: url.to_string(),
            params: query.iter().cloned().collect(),
        };
        self.calls.lock().push(call.clone());

        let (status, body) = if self.api_url.as_deref() != Some(url) {
            (404, Value::String("Not Found".to_string()))
        } else if call.is_probe() {
            (200, json!({"batchcomplete": "", "query": {"general": {"sitename": "Example"}}}))
        } else {
            (self.handler)(&call)
        };

        Ok(ApiResponse {
            data: body.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            url: url.to_string(),
        })
    }
}

pub fn test_config() -> WikiConfig {
    WikiConfig {
        rate_limit: 1000.0,
        sweep_interval: Duration::from_secs(3600),
        ..WikiConfig::default()
    }
}

pub fn navigator(wiki: &Arc<FakeWiki>) -> Navigator {
    let transport: Arc<dyn HttpTransport> = wiki.clone();
    Navigator::new(test_config(), transport).unwrap()
}

pub fn wiki_url() -> WikiUrl {
    WikiUrl::parse(WIKI).unwrap()
}

pub fn api_error(code: &str, info: &str) -> (u16, Value) {
    (200, json!({"error": {"code": code, "info": info}}))
}

// ---------------------------------------------------------------------------
// A small article with a two-level table of contents and an infobox.
// ---------------------------------------------------------------------------

pub const ARTICLE: &str = "Ada Lovelace";

pub fn article_skeleton() -> Value {
    json!({"parse": {
        "title": ARTICLE,
        "pageid": 974,
        "sections": [
            {"toclevel": 1, "level": "2", "line": "Biography", "number": "1", "index": "1"},
            {"toclevel": 2, "level": "3", "line": "Early life", "number": "1.1", "index": "2"},
            {"toclevel": 2, "level": "3", "line": "Adult years", "number": "1.2", "index": "3"},
            {"toclevel": 1, "level": "2", "line": "<i>Legacy</i>", "number": "2", "index": "4"}
        ],
        "categories": [
            {"sortkey": "", "category": "1815_births"},
            {"sortkey": "", "category": "English_mathematicians"}
        ],
        "links": [
            {"ns": 0, "exists": true, "title": "Charles Babbage"},
            {"ns": 14, "exists": true, "title": "Category:Women in computing"},
            {"ns": 0, "exists": true, "title": "Analytical Engine"},
            {"ns": 0, "exists": true, "title": "Charles Babbage"}
        ]
    }})
}

pub fn article_lead() -> Value {
    json!({"parse": {
        "title": ARTICLE,
        "pageid": 974,
        "text": "<div class=\"mw-parser-output\"><p><b>Augusta Ada King</b> was an English mathematician who worked with <a href=\"/wiki/Charles_Babbage\">Charles Babbage</a> on the <a href=\"/wiki/Analytical_Engine\">Analytical Engine</a>.</p></div>"
    }})
}

pub fn article_wikitext() -> Value {
    json!({"batchcomplete": true, "query": {"pages": [{
        "pageid": 974,
        "ns": 0,
        "title": ARTICLE,
        "revisions": [{"slots": {"main": {
            "contentmodel": "wikitext",
            "content": "{{Infobox person\n| name = Ada Lovelace\n| birth_place = [[London]], England\n| known_for = \n}}\n'''Augusta Ada King''' was..."
        }}}]
    }]}})
}

pub fn article_section(index: &str) -> Value {
    let (html, links) = match index {
        "1" => ("<h2>Biography</h2>", json!([])),
        "2" => (
            "<h3>Early life</h3><p>Born in <a href=\"/wiki/London\">London</a> to Lord Byron.</p>",
            json!([{"ns": 0, "exists": true, "title": "London"}, {"ns": 0, "exists": true, "title": "Lord Byron"}]),
        ),
        "3" => (
            "<h3>Adult years</h3><p>She corresponded with Babbage.</p>",
            json!([]),
        ),
        _ => ("<h2>Legacy</h2><p>Ada Lovelace Day is held every October.</p>", json!([])),
    };
    json!({"parse": {"title": ARTICLE, "pageid": 974, "text": html, "links": links}})
}

/// Routes the article's outline, section and wikitext requests.
pub fn article_routes(call: &Call) -> (u16, Value) {
    match (call.param("action"), call.param("prop")) {
        (Some("parse"), Some("sections|categories|links")) => (200, article_skeleton()),
        (Some("parse"), Some("text")) => (200, article_lead()),
        (Some("parse"), Some("text|links")) => {
            (200, article_section(call.param("section").unwrap_or("0")))
        }
        (Some("query"), Some("revisions")) => (200, article_wikitext()),
        other => panic!("unexpected request {:?}: {:?}", other, call.params),
    }
}
