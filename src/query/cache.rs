//! Keyed query cache with in-flight request deduplication.
//!
//! Every key owns a result cell and a state channel. The first `fetch` for a
//! key runs the fetcher; concurrent callers wait on the same cell and every
//! later caller gets the cached result until the key is invalidated.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, Mutex, OnceCell};
use tracing::debug;

/// Which remote operation a query runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Dolar,
    HistoricalDolar,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Dolar => "dolar",
            QueryKind::HistoricalDolar => "historicalDolar",
        }
    }
}

/// Composite cache key: (operation, market)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: QueryKind,
    pub market: String,
}

impl QueryKey {
    pub fn new(kind: QueryKind, market: &str) -> Self {
        Self {
            kind,
            market: market.to_string(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.kind.as_str(), self.market)
    }
}

/// What consumers observe for a key
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V> {
    pub data: Option<V>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl<V> Default for QueryState<V> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
        }
    }
}

struct Slot<V> {
    result: Arc<OnceCell<Option<V>>>,
    state: Arc<watch::Sender<QueryState<V>>>,
}

impl<V> Slot<V> {
    fn new() -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            result: Arc::new(OnceCell::new()),
            state: Arc::new(state),
        }
    }
}

pub struct QueryCache<V> {
    slots: Mutex<HashMap<QueryKey, Slot<V>>>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(
        &self,
        key: &QueryKey,
    ) -> (Arc<OnceCell<Option<V>>>, Arc<watch::Sender<QueryState<V>>>) {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(key.clone()).or_insert_with(Slot::new);
        (slot.result.clone(), slot.state.clone())
    }

    /// Resolve `key`, running `fetcher` only if no result is cached or in flight.
    ///
    /// An absent result is cached too; it marks the query as errored and keeps
    /// whatever data the key held before.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Option<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<V>>,
    {
        let (result, state) = self.slot(key).await;

        let value = result
            .get_or_init(|| async {
                debug!("Query {} fetching", key);
                state.send_modify(|s| s.is_loading = true);

                let value = fetcher().await;

                state.send_modify(|s| {
                    s.is_loading = false;
                    match &value {
                        Some(v) => {
                            s.data = Some(v.clone());
                            s.is_error = false;
                        }
                        None => s.is_error = true,
                    }
                });
                debug!("Query {} settled (ok: {})", key, value.is_some());
                value
            })
            .await;

        value.clone()
    }

    /// Watch state transitions for `key`. Works before the first fetch.
    pub async fn subscribe(&self, key: &QueryKey) -> watch::Receiver<QueryState<V>> {
        let (_, state) = self.slot(key).await;
        state.subscribe()
    }

    /// Drop the cached result so the next `fetch` hits the fetcher again.
    /// Published data stays until the refetch settles. A fetch still in
    /// flight keeps its cell, so one key never has two outstanding requests.
    pub async fn invalidate(&self, key: &QueryKey) {
        let mut slots = self.slots.lock().await;
        if let Some(slot) = slots.get_mut(key) {
            if slot.result.initialized() {
                slot.result = Arc::new(OnceCell::new());
            } else {
                debug!("Query {} in flight, not invalidated", key);
            }
        }
    }

    pub async fn invalidate_all(&self) {
        let keys: Vec<QueryKey> = self.slots.lock().await.keys().cloned().collect();
        for key in &keys {
            self.invalidate(key).await;
        }
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(market: &str) -> QueryKey {
        QueryKey::new(QueryKind::Dolar, market)
    }

    async fn current(cache: &QueryCache<u32>, k: &QueryKey) -> QueryState<u32> {
        let rx = cache.subscribe(k).await;
        let state = rx.borrow().clone();
        state
    }

    #[tokio::test]
    async fn test_concurrent_fetches_are_deduplicated() {
        let cache: QueryCache<u32> = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let k = key("blue");

        let calls = &calls;
        let fetcher = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Some(42)
        };

        let (a, b, c) = tokio::join!(
            cache.fetch(&k, fetcher),
            cache.fetch(&k, fetcher),
            cache.fetch(&k, fetcher),
        );

        assert_eq!((a, b, c), (Some(42), Some(42), Some(42)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_result_is_cached_per_key() {
        let cache: QueryCache<u32> = QueryCache::new();
        let calls = AtomicUsize::new(0);

        let calls = &calls;
        let fetcher = move |v: u32| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(v)
            }
        };

        assert_eq!(cache.fetch(&key("blue"), fetcher(1)).await, Some(1));
        assert_eq!(cache.fetch(&key("blue"), fetcher(2)).await, Some(1));
        assert_eq!(cache.fetch(&key("cripto"), fetcher(3)).await, Some(3));
        assert_eq!(
            cache.fetch(&QueryKey::new(QueryKind::HistoricalDolar, "blue"), fetcher(4)).await,
            Some(4)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_absent_result_sets_error_flag() {
        let cache: QueryCache<u32> = QueryCache::new();
        let k = key("blue");

        assert_eq!(cache.fetch(&k, || async { None }).await, None);

        let state = current(&cache, &k).await;
        assert!(state.is_error);
        assert!(!state.is_loading);
        assert!(state.data.is_none());

        // No retry: the failure is cached like any other result
        assert_eq!(cache.fetch(&k, || async { Some(7) }).await, None);
    }

    #[tokio::test]
    async fn test_invalidate_refetches_and_keeps_stale_data_on_failure() {
        let cache: QueryCache<u32> = QueryCache::new();
        let k = key("blue");

        assert_eq!(cache.fetch(&k, || async { Some(1) }).await, Some(1));

        cache.invalidate(&k).await;
        assert_eq!(cache.fetch(&k, || async { None }).await, None);

        let state = current(&cache, &k).await;
        assert!(state.is_error);
        assert_eq!(state.data, Some(1));

        cache.invalidate_all().await;
        assert_eq!(cache.fetch(&k, || async { Some(2) }).await, Some(2));
        let state = current(&cache, &k).await;
        assert!(!state.is_error);
        assert_eq!(state.data, Some(2));
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_keeps_single_request() {
        let cache: Arc<QueryCache<u32>> = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let k = key("blue");

        let slow_fetch = |cache: Arc<QueryCache<u32>>, calls: Arc<AtomicUsize>, k: QueryKey| {
            tokio::spawn(async move {
                cache
                    .fetch(&k, move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Some(1)
                    })
                    .await
            })
        };

        let first = slow_fetch(cache.clone(), calls.clone(), k.clone());
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.invalidate(&k).await;
        cache.invalidate_all().await;
        let second = slow_fetch(cache.clone(), calls.clone(), k.clone());

        assert_eq!(first.await.unwrap(), Some(1));
        assert_eq!(second.await.unwrap(), Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let state = current(&cache, &k).await;
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let cache: Arc<QueryCache<u32>> = Arc::new(QueryCache::new());
        let k = key("cripto");
        let mut rx = cache.subscribe(&k).await;
        assert_eq!(*rx.borrow(), QueryState::default());

        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let task = {
            let cache = cache.clone();
            let k = k.clone();
            tokio::spawn(async move {
                cache
                    .fetch(&k, move || async move {
                        let _ = release_rx.await;
                        Some(5)
                    })
                    .await
            })
        };

        rx.changed().await.unwrap();
        {
            let state = rx.borrow_and_update();
            assert!(state.is_loading);
            assert!(state.data.is_none());
        }

        release_tx.send(()).unwrap();
        rx.changed().await.unwrap();
        {
            let state = rx.borrow_and_update();
            assert!(!state.is_loading);
            assert_eq!(state.data, Some(5));
        }

        assert_eq!(task.await.unwrap(), Some(5));
    }
}
