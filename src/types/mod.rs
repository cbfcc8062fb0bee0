//! Validated request-side types: what the navigator accepts from callers.

use thiserror::Error;

mod revision;
mod wiki_url;

pub use revision::RevisionSpec;
pub use wiki_url::WikiUrl;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid revision specifier: {0} (expected prev, current, next or a revision id)")]
    InvalidRevision(String),

    #[error("Cannot compare from {from} to {to}: the starting side must be a revision id or current, or prev against current")]
    UnsupportedComparison { from: String, to: String },
}

/// Trims a page title and rejects it when nothing is left.
pub fn require_title<'a>(title: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Clamps a caller-supplied result limit into what a single API page allows.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, crate::constants::MAX_RESULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_required() {
        assert_eq!(require_title("  Ada Lovelace ", "title"), Ok("Ada Lovelace"));
        assert_eq!(
            require_title("   ", "title"),
            Err(ValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn limits_stay_within_one_page() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(25), 25);
        assert_eq!(clamp_limit(10_000), 500);
    }
}
