//! Feed response cache.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::departures::FeedSource;
use crate::feeds::{FeedClient, FeedError, FeedId, FeedRecord};

use super::CachePolicy;

type FeedEntry = Arc<Vec<FeedRecord>>;

/// Decoded records per feed.
pub struct FeedCache {
    entries: MokaCache<FeedId, FeedEntry>,
}

impl FeedCache {
    pub fn new(policy: &CachePolicy) -> Self {
        Self {
            entries: policy.build(),
        }
    }

    pub async fn get(&self, feed: FeedId) -> Option<FeedEntry> {
        self.entries.get(&feed).await
    }

    pub async fn insert(&self, feed: FeedId, entry: FeedEntry) {
        self.entries.insert(feed, entry).await;
    }
}

/// Feed client with caching.
///
/// Only successful fetches are cached, so a failing feed is retried on the
/// next query.
pub struct CachedFeedClient {
    client: FeedClient,
    cache: FeedCache,
}

impl CachedFeedClient {
    pub fn new(client: FeedClient, policy: &CachePolicy) -> Self {
        Self {
            client,
            cache: FeedCache::new(policy),
        }
    }
}

impl FeedSource for CachedFeedClient {
    async fn fetch(&self, feed: FeedId) -> Result<FeedEntry, FeedError> {
        if let Some(cached) = self.cache.get(feed).await {
            debug!(feed = %feed, records = cached.len(), "feed cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fetch(feed).await?);
        self.cache.insert(feed, entry.clone()).await;
        Ok(entry)
    }
}
