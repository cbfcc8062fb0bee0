// src/api/rate_limit.rs
//! Per-wiki request throttling.
//!
//! Each wiki base URL gets its own token bucket with a burst of one, so
//! requests to one wiki never slow down another.

use crate::error::WikiError;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

type DirectLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Lazily created limiters, one per wiki, living as long as the client.
pub struct WikiRateLimiters {
    quota: Quota,
    limiters: RwLock<HashMap<String, Arc<DirectLimiter>>>,
}

impl WikiRateLimiters {
    /// Creates the limiter set for `requests_per_second` per wiki.
    pub fn new(requests_per_second: f64) -> Result<Self, WikiError> {
        let period = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .ok()
            .and_then(Quota::with_period)
            .ok_or_else(|| {
                WikiError::InvalidConfiguration(format!(
                    "rate limit of {} requests per second cannot be enforced",
                    requests_per_second
                ))
            })?;

        Ok(Self {
            quota: period.allow_burst(NonZeroU32::MIN),
            limiters: RwLock::new(HashMap::new()),
        })
    }

    fn limiter_for(&self, wiki: &str) -> Arc<DirectLimiter> {
        {
            let limiters = self.limiters.read();
            if let Some(limiter) = limiters.get(wiki) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write();
        limiters
            .entry(wiki.to_string())
            .or_insert_with(|| {
                log::debug!("Creating rate limiter for {}", wiki);
                Arc::new(GovRateLimiter::direct(self.quota))
            })
            .clone()
    }

    /// Waits for this wiki's next request slot.
    ///
    /// Returns [`WikiError::Cancelled`] as soon as `shutdown` fires, even
    /// while a wait is pending.
    pub async fn acquire(&self, wiki: &str, shutdown: &CancellationToken) -> Result<(), WikiError> {
        let limiter = self.limiter_for(wiki);
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => Err(WikiError::Cancelled),
            _ = limiter.until_ready() => Ok(()),
        }
    }

    /// Number of wikis seen so far.
    pub fn len(&self) -> usize {
        self.limiters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
