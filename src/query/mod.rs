//! Keyed query cache shared by every read and write operation of a client.
//!
//! Entries are addressed by [`QueryKey`]. A key has at most one request in
//! flight; concurrent readers of the same key await the same shared future.
//! Invalidation marks an entry stale and bumps its generation, so a response
//! that started before the invalidation is handed to its caller but never
//! written back into the cache.

mod key;
mod mutation;

pub use key::QueryKey;
pub use mutation::{Invalidate, MutationStatus};

use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ClientError;

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue, ClientError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// What a reader sees for one key.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub status: QueryStatus,
    pub error: Option<ClientError>,
    pub stale: bool,
}

impl<T> QueryState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            stale: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.map(f),
            status: self.status,
            error: self.error,
            stale: self.stale,
        }
    }

    /// Data if present, otherwise the error (or a loading placeholder error).
    pub fn into_result(self) -> Result<T, ClientError> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ClientError::Transport("query has not completed".to_string())),
        }
    }
}

struct Entry {
    data: Option<AnyValue>,
    error: Option<ClientError>,
    status: QueryStatus,
    stale: bool,
    generation: u64,
    in_flight: Option<(u64, SharedFetch)>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Idle,
            stale: true,
            generation: 0,
            in_flight: None,
        }
    }
}

impl Entry {
    fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.stale && self.data.is_some()
    }

    fn state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let (data, error) = match self.data.as_ref().map(|d| d.downcast_ref::<T>()) {
            None => (None, self.error.clone()),
            Some(Some(value)) => (Some(value.clone()), self.error.clone()),
            Some(None) => (None, Some(ClientError::CacheTypeMismatch(key.to_string()))),
        };
        QueryState {
            data,
            status: self.status,
            error,
            stale: self.stale,
        }
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    mutations: std::sync::Mutex<HashMap<QueryKey, MutationStatus>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached data for `key` when fresh, joins an in-flight request
    /// for it, or starts one with `fetcher`.
    ///
    /// On failure the previous data is kept (`None` on first load) and the
    /// error is reported alongside it.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (shared, generation) = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.clone()).or_default();

            if entry.is_fresh() {
                return entry.state(&key);
            }

            match entry.in_flight.as_ref().map(|(g, s)| (s.clone(), *g)) {
                Some(joined) => {
                    tracing::trace!(key = %key, "Joining in-flight query");
                    joined
                }
                None => {
                    tracing::debug!(key = %key, generation = entry.generation, "Fetching query");
                    let fut = fetcher();
                    let shared = async move { fut.await.map(|value| Arc::new(value) as AnyValue) }
                        .boxed()
                        .shared();
                    entry.in_flight = Some((entry.generation, shared.clone()));
                    entry.status = QueryStatus::Loading;
                    (shared, entry.generation)
                }
            }
        };

        let result = shared.await;

        let mut entries = self.entries.lock().await;
        let previous = match entries.get_mut(&key) {
            Some(entry) => {
                let current = entry.generation == generation
                    && matches!(&entry.in_flight, Some((g, _)) if *g == generation);
                if current {
                    entry.in_flight = None;
                    match &result {
                        Ok(value) => {
                            entry.data = Some(value.clone());
                            entry.error = None;
                            entry.status = QueryStatus::Success;
                            entry.stale = false;
                        }
                        Err(e) => {
                            tracing::debug!(key = %key, error = %e, "Query failed");
                            entry.error = Some(e.clone());
                            entry.status = QueryStatus::Error;
                        }
                    }
                } else if entry.generation != generation {
                    tracing::debug!(key = %key, generation, "Discarding response from invalidated generation");
                }
                entry.data.clone()
            }
            None => {
                tracing::debug!(key = %key, "Discarding response for cleared query");
                None
            }
        };
        drop(entries);

        match result {
            Ok(value) => match value.downcast_ref::<T>() {
                Some(data) => QueryState {
                    data: Some(data.clone()),
                    status: QueryStatus::Success,
                    error: None,
                    stale: false,
                },
                None => QueryState {
                    data: None,
                    status: QueryStatus::Error,
                    error: Some(ClientError::CacheTypeMismatch(key.to_string())),
                    stale: true,
                },
            },
            Err(error) => QueryState {
                data: previous.and_then(|d| d.downcast_ref::<T>().cloned()),
                status: QueryStatus::Error,
                error: Some(error),
                stale: true,
            },
        }
    }

    /// Current state of `key` without fetching.
    pub async fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) => entry.state(key),
            None => QueryState::idle(),
        }
    }

    /// Seeds `key` with a known value, e.g. a profile returned by login.
    pub async fn set_data<T: Clone + Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key).or_default();
        entry.generation += 1;
        entry.in_flight = None;
        entry.data = Some(Arc::new(value));
        entry.error = None;
        entry.status = QueryStatus::Success;
        entry.stale = false;
    }

    /// True when the next read of `key` will hit the backend.
    pub async fn is_stale(&self, key: &QueryKey) -> bool {
        let entries = self.entries.lock().await;
        entries.get(key).map_or(true, |entry| !entry.is_fresh())
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            Self::mark_stale(key, entry);
        }
    }

    /// Invalidates every key that starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &QueryKey) {
        let mut entries = self.entries.lock().await;
        for (key, entry) in entries.iter_mut().filter(|(key, _)| key.starts_with(prefix)) {
            Self::mark_stale(key, entry);
        }
    }

    pub async fn apply(&self, invalidations: &[Invalidate]) {
        for invalidation in invalidations {
            match invalidation {
                Invalidate::Key(key) => self.invalidate(key).await,
                Invalidate::Prefix(prefix) => self.invalidate_prefix(prefix).await,
            }
        }
    }

    fn mark_stale(key: &QueryKey, entry: &mut Entry) {
        tracing::trace!(key = %key, "Invalidating query");
        entry.stale = true;
        entry.generation += 1;
        entry.in_flight = None;
        if entry.status == QueryStatus::Loading {
            entry.status = if entry.data.is_some() { QueryStatus::Success } else { QueryStatus::Idle };
        }
    }

    /// Drops every entry. In-flight responses are discarded when they land.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
        self.mutation_table().clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u32, ClientError>> {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(value) }.boxed()
        }
    }

    #[tokio::test]
    async fn fresh_entries_are_served_from_cache() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("club").with(42);

        assert_eq!(cache.fetch(key.clone(), counting(&calls, 1)).await.data, Some(1));
        assert_eq!(cache.fetch(key.clone(), counting(&calls, 2)).await.data, Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate(&key).await;
        assert!(cache.is_stale(&key).await);
        assert_eq!(cache.fetch(key, counting(&calls, 2)).await.data, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_request() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("clubs");

        let slow = |calls: Arc<AtomicUsize>| {
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<_, ClientError>(vec![1, 2, 3])
                }
            }
        };

        let (a, b) = tokio::join!(
            cache.fetch(key.clone(), slow(calls.clone())),
            cache.fetch(key.clone(), slow(calls.clone())),
        );
        assert_eq!(a.data, Some(vec![1, 2, 3]));
        assert_eq!(b.data, Some(vec![1, 2, 3]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_keep_previous_data() {
        let cache = QueryCache::new();
        let key = QueryKey::new("club").with(1);

        let first = cache
            .fetch(key.clone(), || async { Err::<String, _>(ClientError::Transport("down".into())) })
            .await;
        assert!(first.is_error());
        assert!(first.data.is_none());

        cache.fetch(key.clone(), || async { Ok::<_, ClientError>("chess".to_string()) }).await;
        cache.invalidate(&key).await;

        let retry = cache
            .fetch(key.clone(), || async { Err::<String, _>(ClientError::Transport("down".into())) })
            .await;
        assert!(retry.is_error());
        assert_eq!(retry.data.as_deref(), Some("chess"));

        let peeked = cache.peek::<String>(&key).await;
        assert_eq!(peeked.status, QueryStatus::Error);
        assert_eq!(peeked.data.as_deref(), Some("chess"));
    }

    #[tokio::test]
    async fn responses_from_an_invalidated_generation_are_not_cached() {
        let cache = Arc::new(QueryCache::new());
        let key = QueryKey::new("club").with(7);
        let (release, wait) = tokio::sync::oneshot::channel::<()>();

        let pending = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key, move || async move {
                        let _ = wait.await;
                        Ok::<_, ClientError>("old".to_string())
                    })
                    .await
            })
        };

        // let the spawned fetch register itself before invalidating
        while !cache.peek::<String>(&key).await.is_loading() {
            tokio::task::yield_now().await;
        }
        cache.invalidate(&key).await;
        let _ = release.send(());

        let old = pending.await.unwrap();
        assert_eq!(old.data.as_deref(), Some("old"));
        assert!(cache.is_stale(&key).await);

        let fresh = cache.fetch(key, || async { Ok::<_, ClientError>("new".to_string()) }).await;
        assert_eq!(fresh.data.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn prefix_invalidation_only_touches_matching_keys() {
        let cache = QueryCache::new();
        let a = QueryKey::new("clubs").with("chess");
        let b = QueryKey::new("clubs").with("soccer");
        let other = QueryKey::new("club").with(1);
        for key in [&a, &b, &other] {
            cache.set_data(key.clone(), 1u8).await;
        }

        cache.invalidate_prefix(&QueryKey::new("clubs")).await;
        assert!(cache.is_stale(&a).await);
        assert!(cache.is_stale(&b).await);
        assert!(!cache.is_stale(&other).await);
    }

    #[tokio::test]
    async fn type_mismatch_is_reported() {
        let cache = QueryCache::new();
        let key = QueryKey::new("me");
        cache.set_data(key.clone(), 5u32).await;
        let state = cache.peek::<String>(&key).await;
        assert!(matches!(state.error, Some(ClientError::CacheTypeMismatch(_))));
    }
}
