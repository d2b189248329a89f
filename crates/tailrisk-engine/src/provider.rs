//! The market-data seam and the returns cache.
//!
//! The engine never fetches prices itself: an external collaborator
//! implements [`ReturnsProvider`] and hands over aligned return
//! histories. [`ReturnsCache`] is the explicit cache collaborator, keyed
//! by (asset set, date range) with a visible TTL policy rather than a
//! hidden process-wide cache inside the risk engine.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dashmap::DashMap;

use tailrisk_core::{Asset, ReturnSeries};

use crate::error::EngineResult;

/// Supplies aligned return histories for a set of assets over a range.
///
/// Implementations own alignment, gap handling and forward-filling; the
/// returned series must carry the requested assets in the requested
/// order.
pub trait ReturnsProvider {
    /// Fetches the return history for `assets` between `start` and `end`
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Implementations surface fetch failures as
    /// [`EngineError::ProviderError`](crate::EngineError::ProviderError).
    fn returns(
        &self,
        assets: &[Asset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<ReturnSeries>;
}

/// Cache key: the asset set (order-sensitive) and the date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    tickers: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl CacheKey {
    fn new(assets: &[Asset], start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            tickers: assets.iter().map(|a| a.ticker().to_string()).collect(),
            start,
            end,
        }
    }
}

struct CachedSeries {
    series: ReturnSeries,
    fetched_at: Instant,
}

/// Return-history cache with time-boxed expiry.
pub struct ReturnsCache {
    entries: DashMap<CacheKey, CachedSeries>,
    ttl: Duration,
}

impl ReturnsCache {
    /// Creates a cache with the given entry time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Gets a cached series if present and fresh.
    #[must_use]
    pub fn get(&self, assets: &[Asset], start: NaiveDate, end: NaiveDate) -> Option<ReturnSeries> {
        let key = CacheKey::new(assets, start, end);
        self.entries.get(&key).and_then(|entry| {
            if entry.fetched_at.elapsed() <= self.ttl {
                Some(entry.series.clone())
            } else {
                None
            }
        })
    }

    /// Stores a freshly fetched series.
    pub fn insert(&self, assets: &[Asset], start: NaiveDate, end: NaiveDate, series: ReturnSeries) {
        self.entries.insert(
            CacheKey::new(assets, start, end),
            CachedSeries {
                series,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Removes expired entries.
    pub fn cleanup_expired(&self) {
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() <= self.ttl);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries currently held, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReturnsCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300)) // 5 minutes
    }
}

/// A provider wrapped with a [`ReturnsCache`].
///
/// Cache hits skip the underlying provider entirely; misses fetch, store,
/// and return.
pub struct CachedProvider<P> {
    inner: P,
    cache: ReturnsCache,
}

impl<P: ReturnsProvider> CachedProvider<P> {
    /// Wraps a provider with a cache of the given TTL.
    #[must_use]
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: ReturnsCache::new(ttl),
        }
    }

    /// The cache, for inspection and manual invalidation.
    #[must_use]
    pub fn cache(&self) -> &ReturnsCache {
        &self.cache
    }
}

impl<P: ReturnsProvider> ReturnsProvider for CachedProvider<P> {
    fn returns(
        &self,
        assets: &[Asset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<ReturnSeries> {
        if let Some(series) = self.cache.get(assets, start, end) {
            tracing::debug!(assets = assets.len(), %start, %end, "returns cache hit");
            return Ok(series);
        }

        let series = self.inner.returns(assets, start, end)?;
        self.cache.insert(assets, start, end, series.clone());
        tracing::debug!(assets = assets.len(), %start, %end, "returns cache fill");
        Ok(series)
    }
}
