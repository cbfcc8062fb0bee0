// src/config.rs
use crate::constants::{
    CACHE_SWEEP_INTERVAL, CONTENT_CACHE_TTL, DEFAULT_LISTING_LIMIT, DEFAULT_REQUESTS_PER_SECOND,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_LIMIT, DEFAULT_USER_AGENT, METADATA_CACHE_TTL,
    SEARCH_CACHE_TTL,
};
use crate::error::WikiError;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parsed command-line input for the `wikinav` harness.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Wiki base URL (e.g., "https://en.wikipedia.org")
    #[arg(short, long)]
    pub wiki: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Requests per second allowed against the wiki (overrides WIKINAV_RATE_LIMIT)
    #[arg(long)]
    pub rate_limit: Option<f64>,

    /// Whole-request timeout in seconds (overrides WIKINAV_REQUEST_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User agent sent to the wiki (overrides WIKINAV_USER_AGENT)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Retry this many times when the wiki reports it is lagging
    #[arg(long, default_value_t = 2)]
    pub maxlag_retries: u32,

    #[command(subcommand)]
    pub command: Command,
}

/// The navigator operation to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Site name, language, article count and namespaces
    Info,
    /// Full-text search
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },
    /// Section tree, summary, infobox and categories of a page
    Outline { title: String },
    /// One section of a page with its parent and neighbours
    Section { title: String, index: u32 },
    /// The whole page as markdown
    Full { title: String },
    /// Members and parents of a category
    Category {
        category: String,
        #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT)]
        limit: u32,
    },
    /// Pages linking to a page
    Backlinks {
        title: String,
        #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT)]
        limit: u32,
    },
    /// Difference between two revisions ("prev", "current", "next" or an id)
    Compare {
        title: String,
        #[arg(long, default_value = "prev")]
        from: String,
        #[arg(long, default_value = "current")]
        to: String,
    },
}

/// Resolved navigator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiConfig {
    /// Requests per second per wiki; burst is always 1.
    pub rate_limit: f64,
    /// Lifetime of assembled page content.
    pub cache_ttl: Duration,
    /// Lifetime of wiki metadata.
    pub cache_ttl_info: Duration,
    /// Lifetime of search results.
    pub cache_ttl_search: Duration,
    /// Bound on a whole outbound call.
    pub request_timeout: Duration,
    pub user_agent: String,
    /// How often expired cache entries are swept.
    pub sweep_interval: Duration,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            rate_limit: DEFAULT_REQUESTS_PER_SECOND,
            cache_ttl: CONTENT_CACHE_TTL,
            cache_ttl_info: METADATA_CACHE_TTL,
            cache_ttl_search: SEARCH_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sweep_interval: CACHE_SWEEP_INTERVAL,
        }
    }
}

impl WikiConfig {
    /// Reads overrides from `WIKINAV_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seconds = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|raw| parse_or_warn::<u64>(key, &raw))
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            rate_limit: lookup("WIKINAV_RATE_LIMIT")
                .and_then(|raw| parse_or_warn::<f64>("WIKINAV_RATE_LIMIT", &raw))
                .unwrap_or(defaults.rate_limit),
            cache_ttl: seconds("WIKINAV_CACHE_TTL", defaults.cache_ttl),
            cache_ttl_info: seconds("WIKINAV_CACHE_TTL_INFO", defaults.cache_ttl_info),
            cache_ttl_search: seconds("WIKINAV_CACHE_TTL_SEARCH", defaults.cache_ttl_search),
            request_timeout: seconds("WIKINAV_REQUEST_TIMEOUT", defaults.request_timeout),
            user_agent: lookup("WIKINAV_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            sweep_interval: defaults.sweep_interval,
        }
    }

    /// Layers command-line flags over the environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, WikiError> {
        let mut config = Self::from_env();
        if let Some(rate) = cli.rate_limit {
            config.rate_limit = rate;
        }
        if let Some(timeout) = cli.timeout {
            config.request_timeout = Duration::from_secs(timeout);
        }
        if let Some(user_agent) = &cli.user_agent {
            config.user_agent = user_agent.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WikiError> {
        if !self.rate_limit.is_finite() || self.rate_limit <= 0.0 {
            return Err(WikiError::InvalidConfiguration(format!(
                "rate limit must be a positive number of requests per second, got {}",
                self.rate_limit
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(WikiError::InvalidConfiguration(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(WikiError::InvalidConfiguration(
                "cache sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(WikiError::InvalidConfiguration(
                "user agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value, using default", key, raw);
            None
        }
    }
}
