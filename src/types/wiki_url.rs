use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The base URL of a MediaWiki installation: scheme and host, no path.
///
/// Anything after the origin (a pasted article link, a trailing slash) is
/// dropped, so `https://en.wikipedia.org/wiki/Rust` and
/// `https://en.wikipedia.org/` name the same wiki and share its endpoint,
/// limiter and cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WikiUrl(String);

impl WikiUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }
        if parsed.host_str().is_none() {
            return Err(ValidationError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "URL has no host".to_string(),
            });
        }

        let origin = parsed.origin().ascii_serialization();
        if parsed.path() != "/" || parsed.query().is_some() {
            log::debug!("Wiki URL {} reduced to its origin {}", trimmed, origin);
        }
        Ok(Self(origin))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WikiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WikiUrl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WikiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WikiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WikiUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_scheme_and_host_only() {
        let wiki = WikiUrl::parse("https://en.wikipedia.org/wiki/Rust_(programming_language)").unwrap();
        assert_eq!(wiki.as_str(), "https://en.wikipedia.org");

        let wiki = WikiUrl::parse(" https://minecraft.fandom.com/ ").unwrap();
        assert_eq!(wiki.as_str(), "https://minecraft.fandom.com");
    }

    #[test]
    fn keeps_non_default_ports() {
        let wiki = WikiUrl::parse("http://localhost:8080").unwrap();
        assert_eq!(wiki.to_string(), "http://localhost:8080");
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(matches!(
            WikiUrl::parse("ftp://wiki.example.org"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(WikiUrl::parse("not a url").is_err());
    }
}
