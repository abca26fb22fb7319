// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-widget response cache with stale-while-revalidate lookups.
//!
//! Each widget owns exactly one entry. A failed fetch records its error but
//! keeps the last good payload, so the widget can keep showing it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashwire_core::{FetchedPayload, WidgetId};
use serde_json::Value;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CachedPayload {
    data: Option<Arc<Value>>,
    fetched_at: Instant,
    fetched_wall: DateTime<Utc>,
    cached_at: Option<DateTime<Utc>>,
    fresh_for: Duration,
}

impl CachedPayload {
    fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) >= self.fresh_for
    }
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    payload: Option<CachedPayload>,
    last_error: Option<String>,
}

/// What the cache holds for a widget at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    /// `None` when no fetch has succeeded yet.
    pub payload: Option<Option<Arc<Value>>>,
    pub last_error: Option<String>,
}

impl CacheSnapshot {
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub fn data(&self) -> Option<&Value> {
        self.payload.as_ref().and_then(|d| d.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Miss,
    Fresh(CacheSnapshot),
    /// Expired payload, or only an error so far. Serve it and revalidate.
    Stale(CacheSnapshot),
}

/// Cache state reported to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    /// Wall-clock time of the last successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
    /// The producer's own timestamp, when it sent one.
    pub cached_at: Option<DateTime<Utc>>,
    pub stale: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: DashMap<WidgetId, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, id: &WidgetId, now: Instant) -> CacheLookup {
        let Some(entry) = self.entries.get(id) else {
            return CacheLookup::Miss;
        };

        let snapshot = CacheSnapshot {
            payload: entry.payload.as_ref().map(|p| p.data.clone()),
            last_error: entry.last_error.clone(),
        };
        match &entry.payload {
            Some(payload) if !payload.is_stale(now) => CacheLookup::Fresh(snapshot),
            _ => CacheLookup::Stale(snapshot),
        }
    }

    /// Replace the widget's payload and clear any recorded error.
    pub fn store(&self, id: &WidgetId, payload: FetchedPayload, fresh_for: Duration, now: Instant) {
        let cached = CachedPayload {
            data: payload.data.map(Arc::new),
            fetched_at: now,
            fetched_wall: Utc::now(),
            cached_at: payload.cached_at,
            fresh_for,
        };
        self.entries.insert(
            id.clone(),
            CacheEntry {
                payload: Some(cached),
                last_error: None,
            },
        );
    }

    /// Record a failed fetch, keeping the last good payload.
    pub fn record_failure(&self, id: &WidgetId, message: String) {
        self.entries.entry(id.clone()).or_default().last_error = Some(message);
    }

    pub fn evict(&self, id: &WidgetId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn status(&self, id: &WidgetId, now: Instant) -> Option<CacheStatus> {
        self.entries.get(id).map(|entry| CacheStatus {
            fetched_at: entry.payload.as_ref().map(|p| p.fetched_wall),
            cached_at: entry.payload.as_ref().and_then(|p| p.cached_at),
            stale: entry.payload.as_ref().is_none_or(|p| p.is_stale(now)),
            last_error: entry.last_error.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(data: Value) -> FetchedPayload {
        FetchedPayload {
            data: Some(data),
            cached_at: None,
            refresh_in: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_then_stale() {
        let cache = ResponseCache::new();
        let id = WidgetId::from("w");
        assert_eq!(cache.lookup(&id, Instant::now()), CacheLookup::Miss);

        cache.store(&id, payload(json!(1)), Duration::from_secs(10), Instant::now());
        let CacheLookup::Fresh(snapshot) = cache.lookup(&id, Instant::now()) else {
            panic!("expected fresh entry");
        };
        assert_eq!(snapshot.data(), Some(&json!(1)));

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(matches!(cache.lookup(&id, Instant::now()), CacheLookup::Stale(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_last_good_payload() {
        let cache = ResponseCache::new();
        let id = WidgetId::from("w");
        cache.store(&id, payload(json!("good")), Duration::from_secs(60), Instant::now());
        cache.record_failure(&id, "down".into());

        let CacheLookup::Fresh(snapshot) = cache.lookup(&id, Instant::now()) else {
            panic!("expected fresh entry");
        };
        assert_eq!(snapshot.data(), Some(&json!("good")));
        assert_eq!(snapshot.last_error.as_deref(), Some("down"));

        cache.store(&id, payload(json!("better")), Duration::from_secs(60), Instant::now());
        assert_eq!(cache.status(&id, Instant::now()).unwrap().last_error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn error_only_entry_is_stale() {
        let cache = ResponseCache::new();
        let id = WidgetId::from("w");
        cache.record_failure(&id, "down".into());

        let CacheLookup::Stale(snapshot) = cache.lookup(&id, Instant::now()) else {
            panic!("expected stale entry");
        };
        assert!(!snapshot.has_payload());
        let status = cache.status(&id, Instant::now()).unwrap();
        assert!(status.stale);
        assert!(status.fetched_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_are_independent() {
        let cache = ResponseCache::new();
        let a = WidgetId::from("a");
        let b = WidgetId::from("b");
        cache.store(&a, payload(json!(1)), Duration::from_secs(60), Instant::now());
        cache.record_failure(&b, "down".into());

        assert!(cache.status(&a, Instant::now()).unwrap().last_error.is_none());
        assert!(cache.evict(&b));
        assert_eq!(cache.len(), 1);
    }
}
