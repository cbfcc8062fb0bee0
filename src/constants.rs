// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the navigator talks to a wiki: where it looks for the API, how
//! long it remembers answers, and how much of a page it summarizes.

use std::time::Duration;

// ---------------------------------------------------------------------------
// MediaWiki API boundaries
// ---------------------------------------------------------------------------

/// API paths probed, in order, when a wiki is seen for the first time.
///
/// `/api.php` is the stock MediaWiki layout; `/w/api.php` is the
/// Wikimedia-style layout used by Wikipedia and many mirrors.
pub const API_PATH_CANDIDATES: &[&str] = &["/api.php", "/w/api.php"];

/// Seconds of replication lag after which the server answers `maxlag`
/// instead of serving a degraded response.
pub const MAXLAG_SECONDS: &str = "5";

/// Response schema version requested on every call.
pub const FORMAT_VERSION: &str = "2";

/// First pause before retrying a request the wiki refused with `maxlag`.
pub const MAXLAG_RETRY_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Longest pause between `maxlag` retries.
pub const MAXLAG_RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

/// Largest result limit a non-bot client may ask for in a single page.
pub const MAX_RESULT_LIMIT: u32 = 500;

/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Default number of category members and backlinks returned.
pub const DEFAULT_LISTING_LIMIT: u32 = 20;

/// Parent categories requested when describing a category.
pub const PARENT_CATEGORY_LIMIT: &str = "10";

/// Namespace prefix stripped from category names for readability.
pub const CATEGORY_PREFIX: &str = "Category:";

// ---------------------------------------------------------------------------
// Cache lifetimes
// ---------------------------------------------------------------------------

/// How long assembled page content stays fresh.
pub const CONTENT_CACHE_TTL: Duration = Duration::from_secs(300);

/// How long wiki metadata stays fresh. Site info changes rarely.
pub const METADATA_CACHE_TTL: Duration = Duration::from_secs(3600);

/// How long search results stay fresh. Short, because free-text queries
/// have unbounded cardinality.
pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(60);

/// How often the background sweeper drops expired cache entries.
pub const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Transport defaults
// ---------------------------------------------------------------------------

/// Requests per second allowed against a single wiki.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 10.0;

/// Upper bound on a whole API call, connect through body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identification string sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikinav/",
    env!("CARGO_PKG_VERSION"),
    " (structured MediaWiki navigation)"
);

/// Placeholder reported when an error body arrived compressed and could not be read.
pub const COMPRESSED_BODY_PLACEHOLDER: &str = "(compressed error response)";

// ---------------------------------------------------------------------------
// Page shaping
// ---------------------------------------------------------------------------

/// Title given to the synthetic section holding a page's introduction.
pub const LEAD_SECTION_TITLE: &str = "Lead";

/// Words kept in a page outline's summary.
pub const SUMMARY_PREVIEW_WORDS: usize = 100;

/// Words kept in the lead section's preview.
pub const SECTION_PREVIEW_WORDS: usize = 50;

/// Cap on the heuristic "see also" list.
pub const SEE_ALSO_LIMIT: usize = 10;

/// Pages longer than this get a warning pointing at outline + section retrieval.
pub const LARGE_PAGE_WORDS: usize = 5000;

/// Maximum element nesting the markdown converter descends into.
///
/// Real article HTML stays far below this; anything deeper is treated as
/// a conversion failure rather than risking unbounded recursion.
pub const HTML_MAX_RENDER_DEPTH: usize = 256;

/// Number of spaces per list nesting level in rendered markdown.
pub const INDENT_SPACES: usize = 2;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing an undecodable response body.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
