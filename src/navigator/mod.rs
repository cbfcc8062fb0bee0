// src/navigator/mod.rs
//! The content assembler: page-level operations over the API client.
//!
//! Every operation follows the same shape. Validate the arguments, look in
//! the cache, otherwise call the wiki, convert what came back into a model
//! type, cache it with the fitting lifetime and hand out a shared pointer.

mod backlinks;
mod category;
mod compare;
mod full;
mod info;
mod keys;
mod outline;
mod search;
mod section;
pub mod tree;

pub use compare::compare_params;

use crate::api::{HttpTransport, MediaWikiApi, TtlCache, WikiHttpClient};
use crate::config::WikiConfig;
use crate::error::WikiError;
use crate::model::{
    BacklinksResponse, CategoryResponse, CompareResponse, PageFull, PageOutline, PageSection,
    SearchResponse, WikiInfo,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// An assembled response as stored in the cache.
#[derive(Debug, Clone)]
pub enum CachedResponse {
    Info(Arc<WikiInfo>),
    Search(Arc<SearchResponse>),
    Outline(Arc<PageOutline>),
    Section(Arc<PageSection>),
    Full(Arc<PageFull>),
    Category(Arc<CategoryResponse>),
    Backlinks(Arc<BacklinksResponse>),
    Compare(Arc<CompareResponse>),
}

/// A model type that can live in the response cache.
pub trait Cacheable: Sized {
    fn into_cached(value: Arc<Self>) -> CachedResponse;
    fn from_cached(cached: CachedResponse) -> Option<Arc<Self>>;
}

macro_rules! cacheable {
    ($($model:ty => $variant:ident),* $(,)?) => {
        $(
            impl Cacheable for $model {
                fn into_cached(value: Arc<Self>) -> CachedResponse {
                    CachedResponse::$variant(value)
                }

                fn from_cached(cached: CachedResponse) -> Option<Arc<Self>> {
                    match cached {
                        CachedResponse::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

cacheable! {
    WikiInfo => Info,
    SearchResponse => Search,
    PageOutline => Outline,
    PageSection => Section,
    PageFull => Full,
    CategoryResponse => Category,
    BacklinksResponse => Backlinks,
    CompareResponse => Compare,
}

#[derive(Debug, Clone, Copy)]
struct CacheLifetimes {
    content: Duration,
    info: Duration,
    search: Duration,
}

/// Structured, cached access to any number of MediaWiki sites.
///
/// Owns the API client, the response cache and the cache sweeper. Call
/// [`Navigator::shutdown`] to stop the sweeper and abort in-flight
/// requests; dropping the navigator cancels them as well.
pub struct Navigator {
    api: MediaWikiApi,
    cache: Arc<TtlCache<CachedResponse>>,
    ttl: CacheLifetimes,
    shutdown: CancellationToken,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl Navigator {
    /// Builds a navigator talking to wikis over HTTP.
    pub fn from_config(config: WikiConfig) -> Result<Self, WikiError> {
        let transport = WikiHttpClient::new(&config)?;
        Self::new(config, Arc::new(transport))
    }

    /// Builds a navigator over any transport.
    ///
    /// Must be called from within a Tokio runtime, which runs the cache sweeper.
    pub fn new(config: WikiConfig, transport: Arc<dyn HttpTransport>) -> Result<Self, WikiError> {
        config.validate()?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(WikiError::InvalidConfiguration(
                "the navigator must be created inside a Tokio runtime".to_string(),
            ));
        }

        let shutdown = CancellationToken::new();
        let api = MediaWikiApi::new(transport, config.rate_limit, shutdown.clone())?;
        let cache = Arc::new(TtlCache::new());
        let sweeper = cache.spawn_sweeper(config.sweep_interval, shutdown.clone());

        log::debug!(
            "Navigator ready ({} req/s per wiki, content TTL {:?})",
            config.rate_limit,
            config.cache_ttl
        );
        Ok(Self {
            api,
            cache,
            ttl: CacheLifetimes {
                content: config.cache_ttl,
                info: config.cache_ttl_info,
                search: config.cache_ttl_search,
            },
            shutdown,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Aborts pending requests and stops the cache sweeper.
    ///
    /// Requests issued afterwards fail with [`WikiError::Cancelled`].
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let sweeper = self.sweeper.lock().take();
        if let Some(handle) = sweeper {
            if let Err(e) = handle.await {
                log::warn!("Cache sweeper ended abnormally: {}", e);
            }
        }
    }

    /// Number of cached responses, including expired ones not yet swept.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn cached<T: Cacheable>(&self, key: &str) -> Option<Arc<T>> {
        match self.cache.get(key).and_then(T::from_cached) {
            Some(hit) => {
                log::debug!("Cache hit: {}", key);
                Some(hit)
            }
            None => {
                log::debug!("Cache miss: {}", key);
                None
            }
        }
    }

    fn store<T: Cacheable>(&self, key: String, value: T, ttl: Duration) -> Arc<T> {
        let value = Arc::new(value);
        self.cache.set(key, T::into_cached(Arc::clone(&value)), ttl);
        value
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
