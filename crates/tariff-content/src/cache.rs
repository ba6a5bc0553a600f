//! # Header Cache
//!
//! Navigation headers and super-headers change rarely and are requested on
//! every guidance call, so they are read through a small TTL cache keyed
//! by user type and locale. Nothing else in a request is cached.
//!
//! The in-memory cache uses a `parking_lot::RwLock`: locks are never held
//! across an `.await`, and a panicking writer cannot poison the cache.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tariff_core::{Locale, UserType};

use crate::error::ContentError;
use crate::guidance::{GuidanceContentStore, NavigationHeader, NavigationSuperHeader};

/// Cache key: headers are authored per user type and locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderCacheKey {
    /// Reader role.
    pub user_type: UserType,
    /// Locale.
    pub locale: Locale,
}

impl HeaderCacheKey {
    /// Build a key.
    pub fn new(user_type: UserType, locale: Locale) -> Self {
        Self { user_type, locale }
    }
}

/// Lookup-or-store cache for navigation content.
pub trait HeaderCache: Send + Sync {
    /// Cached headers for a key, if present and fresh.
    fn lookup_headers(&self, key: &HeaderCacheKey) -> Option<Vec<NavigationHeader>>;

    /// Store headers for a key.
    fn store_headers(&self, key: HeaderCacheKey, headers: Vec<NavigationHeader>);

    /// Cached super-headers for a key, if present and fresh.
    fn lookup_super_headers(&self, key: &HeaderCacheKey) -> Option<Vec<NavigationSuperHeader>>;

    /// Store super-headers for a key.
    fn store_super_headers(&self, key: HeaderCacheKey, super_headers: Vec<NavigationSuperHeader>);
}

#[derive(Debug)]
struct TtlMap<V: Clone> {
    entries: RwLock<HashMap<HeaderCacheKey, (DateTime<Utc>, Vec<V>)>>,
}

impl<V: Clone> TtlMap<V> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn lookup(&self, key: &HeaderCacheKey, ttl: Duration, now: DateTime<Utc>) -> Option<Vec<V>> {
        let guard = self.entries.read();
        let (stored_at, values) = guard.get(key)?;
        if now - *stored_at >= ttl {
            return None;
        }
        Some(values.clone())
    }

    fn store(&self, key: HeaderCacheKey, values: Vec<V>, now: DateTime<Utc>) {
        self.entries.write().insert(key, (now, values));
    }
}

/// Process-local TTL cache.
#[derive(Debug)]
pub struct InMemoryHeaderCache {
    ttl: Duration,
    headers: TtlMap<NavigationHeader>,
    super_headers: TtlMap<NavigationSuperHeader>,
}

impl InMemoryHeaderCache {
    /// Create a cache whose entries expire `ttl_secs` seconds after storing.
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            ttl,
            headers: TtlMap::new(),
            super_headers: TtlMap::new(),
        }
    }
}

impl HeaderCache for InMemoryHeaderCache {
    fn lookup_headers(&self, key: &HeaderCacheKey) -> Option<Vec<NavigationHeader>> {
        self.headers.lookup(key, self.ttl, Utc::now())
    }

    fn store_headers(&self, key: HeaderCacheKey, headers: Vec<NavigationHeader>) {
        self.headers.store(key, headers, Utc::now());
    }

    fn lookup_super_headers(&self, key: &HeaderCacheKey) -> Option<Vec<NavigationSuperHeader>> {
        self.super_headers.lookup(key, self.ttl, Utc::now())
    }

    fn store_super_headers(&self, key: HeaderCacheKey, super_headers: Vec<NavigationSuperHeader>) {
        self.super_headers.store(key, super_headers, Utc::now());
    }
}

/// Read headers through the cache, populating it on a miss.
pub async fn cached_headers(
    store: &dyn GuidanceContentStore,
    cache: &dyn HeaderCache,
    user_type: UserType,
    locale: Locale,
) -> Result<Vec<NavigationHeader>, ContentError> {
    let key = HeaderCacheKey::new(user_type, locale);
    if let Some(hit) = cache.lookup_headers(&key) {
        tracing::trace!(%user_type, %locale, "header cache hit");
        return Ok(hit);
    }
    let headers = store.headers(user_type, locale).await?;
    cache.store_headers(key, headers.clone());
    Ok(headers)
}

/// Read super-headers through the cache, populating it on a miss.
pub async fn cached_super_headers(
    store: &dyn GuidanceContentStore,
    cache: &dyn HeaderCache,
    user_type: UserType,
    locale: Locale,
) -> Result<Vec<NavigationSuperHeader>, ContentError> {
    let key = HeaderCacheKey::new(user_type, locale);
    if let Some(hit) = cache.lookup_super_headers(&key) {
        tracing::trace!(%user_type, %locale, "super-header cache hit");
        return Ok(hit);
    }
    let super_headers = store.super_headers(user_type, locale).await?;
    cache.store_super_headers(key, super_headers.clone());
    Ok(super_headers)
}
