// src/error.rs
//! Error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant tells what went wrong and where: on the wire, inside the
//! wiki, or in the navigator's own reasoning about a page.

use crate::types::ValidationError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// MediaWiki API error codes as a typed vocabulary.
///
/// The codes the navigator reacts to get their own variant; anything else
/// is carried verbatim so the caller still sees what the wiki said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// The page does not exist
    MissingTitle,
    /// The section index does not exist on the page
    NoSuchSection,
    /// The server is lagging and asks the client to back off
    MaxLag,
    /// The title contains illegal characters or is empty
    InvalidTitle,
    /// A revision id passed to compare does not exist
    NoSuchRevision,
    /// An error code this client doesn't recognize
    Unknown(String),
}

impl ApiErrorCode {
    /// Parse a MediaWiki error code string into the typed vocabulary.
    pub fn from_api_code(code: &str) -> Self {
        match code {
            "missingtitle" => Self::MissingTitle,
            "nosuchsection" => Self::NoSuchSection,
            "maxlag" => Self::MaxLag,
            "invalidtitle" => Self::InvalidTitle,
            "nosuchrevid" => Self::NoSuchRevision,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether waiting and asking again is likely to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MaxLag)
    }

    /// Whether the error means the requested thing simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MissingTitle | Self::NoSuchSection | Self::NoSuchRevision
        )
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "missingtitle"),
            Self::NoSuchSection => write!(f, "nosuchsection"),
            Self::MaxLag => write!(f, "maxlag"),
            Self::InvalidTitle => write!(f, "invalidtitle"),
            Self::NoSuchRevision => write!(f, "nosuchrevid"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main error type for every navigator operation.
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No reachable API endpoint for {wiki} (tried {})", tried.join(", "))]
    NoReachableEndpoint { wiki: String, tried: Vec<String> },

    #[error("MediaWiki API error: {code}: {message}")]
    Api { code: ApiErrorCode, message: String },

    #[error("Section index {index} does not exist (page has {available} sections)")]
    SectionNotFound { index: u32, available: usize },

    #[error("Markdown conversion failed: {0}")]
    Conversion(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl WikiError {
    /// The typed API code, when the wiki itself reported the failure.
    pub fn api_code(&self) -> Option<&ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the caller may retry after a pause.
    pub fn is_retryable(&self) -> bool {
        self.api_code().is_some_and(ApiErrorCode::is_retryable)
    }
}

impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::MalformedResponse(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Boundary rendering
// ---------------------------------------------------------------------------

/// A failure rendered for whoever sits at the edge of the process:
/// a machine code, a human message, and what to try next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

const HINT_REFRESH_OUTLINE: &str =
    "Call the page outline operation to get fresh section indices.";

impl From<&WikiError> for ErrorReport {
    fn from(err: &WikiError) -> Self {
        match err {
            WikiError::Api { code, message } => ErrorReport {
                error: code.to_string(),
                message: message.clone(),
                hint: api_hint(code).map(str::to_string),
                details: None,
            },
            WikiError::SectionNotFound { index, available } => ErrorReport {
                error: "section_not_found".to_string(),
                message: err.to_string(),
                hint: Some(HINT_REFRESH_OUTLINE.to_string()),
                details: Some(serde_json::json!({
                    "section_index": index,
                    "available_sections": available,
                })),
            },
            WikiError::NoReachableEndpoint { wiki, tried } => ErrorReport {
                error: "no_api_endpoint".to_string(),
                message: err.to_string(),
                hint: Some("Check that the wiki URL is the site root (scheme and host only).".to_string()),
                details: Some(serde_json::json!({ "wiki_url": wiki, "tried": tried })),
            },
            WikiError::HttpStatus { status, .. } => ErrorReport {
                error: "http_error".to_string(),
                message: err.to_string(),
                hint: None,
                details: Some(serde_json::json!({ "status": status })),
            },
            WikiError::Validation(_) | WikiError::InvalidConfiguration(_) => ErrorReport {
                error: "invalid_argument".to_string(),
                message: err.to_string(),
                hint: None,
                details: None,
            },
            WikiError::Cancelled => ErrorReport {
                error: "cancelled".to_string(),
                message: err.to_string(),
                hint: None,
                details: None,
            },
            _ => ErrorReport {
                error: "internal_error".to_string(),
                message: err.to_string(),
                hint: None,
                details: None,
            },
        }
    }
}

fn api_hint(code: &ApiErrorCode) -> Option<&'static str> {
    match code {
        ApiErrorCode::MissingTitle => {
            Some("The page doesn't exist. Try searching the wiki to find the correct title.")
        }
        ApiErrorCode::NoSuchSection => Some(HINT_REFRESH_OUTLINE),
        ApiErrorCode::MaxLag => {
            Some("The wiki server is experiencing high load. Wait a moment and try again.")
        }
        _ => None,
    }
}
