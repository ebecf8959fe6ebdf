// caching/src/caching.rs
use std::time::Duration;
use anyhow::Result;
use moka::future::Cache as MokaCache;

/// String-keyed async cache for responses that never change once fetched
/// (timeline payloads are immutable server-side). Consent flags must NOT go
/// through here; they are fetched fresh on every patient selection.
#[derive(Clone)]
pub struct Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: MokaCache<String, V>,
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: u64) -> Self {
        Cache {
            inner: MokaCache::new(capacity),
        }
    }

    /// Bounded cache whose entries also age out.
    pub fn with_ttl(capacity: u64, ttl: Duration) -> Self {
        Cache {
            inner: MokaCache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: V) -> Result<()> {
        self.inner.insert(key, value).await;
        Ok(())
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::Cache;

    #[tokio::test]
    async fn insert_then_get_returns_the_value() {
        let cache: Cache<Vec<String>> = Cache::new(16);
        assert!(cache.get("enc-1").await.is_none());
        cache
            .insert("enc-1".to_string(), vec!["event".to_string()])
            .await
            .unwrap();
        assert_eq!(cache.get("enc-1").await.unwrap(), vec!["event".to_string()]);
    }

    #[tokio::test]
    async fn invalidate_drops_the_entry() {
        let cache: Cache<u32> = Cache::new(16);
        cache.insert("k".to_string(), 7).await.unwrap();
        cache.invalidate("k").await;
        assert!(cache.get("k").await.is_none());
    }
}
