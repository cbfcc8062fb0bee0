// src/lib.rs
//! wikinav library: structured, cached, rate-limited navigation of MediaWiki sites.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `WikiError`, `ApiErrorCode`, `ErrorReport`, `ValidationError`
//! - **Configuration**: `WikiConfig`, `CommandLineInput`
//! - **Domain model**: `PageOutline`, `PageSection`, `Section`, `SearchResponse`, etc.
//! - **Request types**: `WikiUrl`, `RevisionSpec`
//! - **API client**: `HttpTransport`, `WikiHttpClient`, `MediaWikiApi`, `TtlCache`
//! - **Formatting**: `html_to_markdown`, `extract_infobox`, `extract_links`
//! - **Assembly**: `Navigator`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod formatting;
pub mod model;
pub mod navigator;
pub mod types;

// Error handling
pub use error::{ApiErrorCode, ErrorReport, WikiError};
pub use types::ValidationError;

// Configuration
pub use config::{Command, CommandLineInput, WikiConfig};

// Request types
pub use types::{RevisionSpec, WikiUrl};

// Domain model
pub use model::{
    Adjacent, Backlink, BacklinksResponse, CategoryMember, CategoryResponse, CompareResponse,
    Infobox, MemberKind, PageFull, PageOutline, PageSection, RevisionInfo, SearchResponse,
    SearchResult, Section, SectionRef, WikiInfo,
};

// API client
pub use api::{ApiParams, ApiResponse, HttpTransport, MediaWikiApi, TtlCache, WikiHttpClient};

// Formatting
pub use formatting::{extract_infobox, extract_links, html_to_markdown};

// Assembly
pub use error_recovery::retry_with_backoff;
pub use navigator::Navigator;
