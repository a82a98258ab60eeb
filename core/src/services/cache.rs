//! Expiring key-value store abstraction.
//!
//! Rate-limit windows and recovery state live behind this trait. Production
//! wires a Redis implementation from the infrastructure layer; tests and
//! local development use [`MemoryCacheStore`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainError;

/// Expiring key-value store
///
/// Values are opaque strings. Every write carries a TTL; implementations
/// must drop entries once the TTL elapses.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store a value under a key with a TTL in seconds
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64)
        -> Result<(), DomainError>;

    /// Fetch a value; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Whether a live (non-expired) value exists under the key
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
}

/// In-memory cache store with TTL support
///
/// Single-process substitute for Redis, used by tests and local runs.
/// Expired entries are dropped lazily on access.
#[derive(Clone)]
pub struct MemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

#[derive(Clone)]
struct StoredEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Force a key to expire immediately, regardless of its TTL.
    /// Lets tests exercise expiry paths without sleeping.
    pub async fn force_expire(&self, key: &str) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Instant::now() - Duration::from_secs(1);
        }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryCacheStore::new();
        store.set_with_ttl("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
        assert!(store.exists("k").await.unwrap());

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // deleting again is fine
        store.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let store = MemoryCacheStore::new();
        store.set_with_ttl("k", "v", 600).await.unwrap();
        store.force_expire("k").await;

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(!store.exists("k").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_resets_value_and_ttl() {
        let store = MemoryCacheStore::new();
        store.set_with_ttl("k", "old", 600).await.unwrap();
        store.force_expire("k").await;
        store.set_with_ttl("k", "new", 600).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
    }
}
