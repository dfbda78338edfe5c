//! Ephemeral read-through TTL cache for calendar fetches.
//!
//! Nothing persists across restarts; the cache only exists so page-refresh
//! style polling does not hammer the upstream feeds. `fetched_at` is kept
//! alongside the events so responses can disclose staleness.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::EconomicEvent;
use crate::services::{CalendarSource, FetchWindow};

struct CacheEntry {
    events: Vec<EconomicEvent>,
    fetched_at: DateTime<Utc>,
    stored_at: Instant,
}

pub struct CalendarCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CalendarCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn key(source: CalendarSource, window: FetchWindow) -> String {
        format!("{}:{}:{}", source.as_str(), window.from, window.to)
    }

    /// Fresh events for the key, with the original fetch timestamp.
    pub async fn get(&self, key: &str) -> Option<(Vec<EconomicEvent>, DateTime<Utc>)> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some((entry.events.clone(), entry.fetched_at))
    }

    /// Store a fetch result, returning its timestamp. Expired entries are
    /// swept opportunistically on write.
    pub async fn put(&self, key: String, events: Vec<EconomicEvent>) -> DateTime<Utc> {
        let fetched_at = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() <= self.ttl);
        entries.insert(
            key,
            CacheEntry {
                events,
                fetched_at,
                stored_at: Instant::now(),
            },
        );
        fetched_at
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
