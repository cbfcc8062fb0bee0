//! Query-parameter builder for MediaWiki API calls.

use crate::constants::{FORMAT_VERSION, MAXLAG_SECONDS};

/// Ordered API parameters where setting a key twice replaces the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParams {
    pairs: Vec<(String, String)>,
}

impl ApiParams {
    /// Starts a request for the given `action`.
    pub fn action(action: &str) -> Self {
        Self::default().set("action", action)
    }

    /// Starts an `action=parse` request for a page, without edit links.
    pub fn parse_page(title: &str) -> Self {
        Self::action("parse")
            .set("page", title)
            .set("disableeditsection", "1")
    }

    /// Starts an `action=query` request.
    pub fn query() -> Self {
        Self::action("query")
    }

    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Forces the parameters every call carries: JSON output in the stable
    /// schema, UTF-8 text, and the `maxlag` politeness signal.
    pub fn with_standard_format(self) -> Self {
        self.set("format", "json")
            .set("formatversion", FORMAT_VERSION)
            .set("utf8", "1")
            .set("maxlag", MAXLAG_SECONDS)
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
