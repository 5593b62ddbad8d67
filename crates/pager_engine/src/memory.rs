use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pager_core::{CachePolicy, FindOutcome, QueryError, QueryErrorKind};

use crate::query::{FindCallback, PagedQuery, QueryFactory};

type WindowKey = (Option<usize>, usize);

struct Store<T> {
    records: Vec<T>,
    cache: HashMap<WindowKey, Vec<T>>,
    online: bool,
}

/// In-memory collection queried through [`MemoryQuery`].
///
/// Emulates a remote backend closely enough to exercise every cache policy:
/// results can be cached per limit/skip window and the "network" can be taken
/// offline to produce connection failures.
pub struct MemoryBackend<T> {
    store: Arc<Mutex<Store<T>>>,
    latency: Duration,
    cache_policy: CachePolicy,
}

impl<T> Clone for MemoryBackend<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            latency: self.latency,
            cache_policy: self.cache_policy,
        }
    }
}

impl<T: Clone + Send + 'static> MemoryBackend<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                records,
                cache: HashMap::new(),
                online: true,
            })),
            latency: Duration::ZERO,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Delay applied before every lookup.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Policy given to queries built by this backend.
    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn set_online(&self, online: bool) {
        self.lock().online = online;
    }

    pub fn replace_records(&self, records: Vec<T>) {
        self.lock().records = records;
    }

    pub fn clear_cache(&self) {
        self.lock().cache.clear();
    }

    pub fn cached_windows(&self) -> usize {
        self.lock().cache.len()
    }

    pub fn query(&self) -> MemoryQuery<T> {
        MemoryQuery {
            backend: self.clone(),
            limit: None,
            skip: 0,
            cache_policy: self.cache_policy,
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn factory(&self) -> impl QueryFactory<T> + 'static {
        let backend = self.clone();
        move || Some(Box::new(backend.query()) as Box<dyn PagedQuery<T>>)
    }

    fn lock(&self) -> MutexGuard<'_, Store<T>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct MemoryQuery<T> {
    backend: MemoryBackend<T>,
    limit: Option<usize>,
    skip: usize,
    cache_policy: CachePolicy,
    cancelled: AtomicBool,
}

impl<T: Clone + Send + 'static> MemoryQuery<T> {
    pub fn set_cache_policy(&mut self, cache_policy: CachePolicy) {
        self.cache_policy = cache_policy;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn key(&self) -> WindowKey {
        (self.limit, self.skip)
    }

    fn network(&self, write_cache: bool) -> Result<Vec<T>, QueryError> {
        let mut store = self.backend.lock();
        if !store.online {
            return Err(QueryError::connection_failed("backend offline"));
        }
        let items: Vec<T> = store
            .records
            .iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        if write_cache {
            store.cache.insert(self.key(), items.clone());
        }
        Ok(items)
    }

    fn cached(&self) -> Option<Vec<T>> {
        self.backend.lock().cache.get(&self.key()).cloned()
    }

    fn lookup(&self) -> Vec<FindOutcome<T>> {
        match self.cache_policy {
            CachePolicy::IgnoreCache => vec![into_outcome(self.network(false))],
            CachePolicy::NetworkOnly => vec![into_outcome(self.network(true))],
            CachePolicy::CacheOnly => vec![self.cache_outcome()],
            CachePolicy::CacheElseNetwork => match self.cached() {
                Some(items) => vec![FindOutcome::found(items)],
                None => vec![into_outcome(self.network(true))],
            },
            CachePolicy::NetworkElseCache => match self.network(true) {
                Ok(items) => vec![FindOutcome::found(items)],
                Err(err) if err.kind == QueryErrorKind::ConnectionFailed => {
                    vec![self.cached().map_or(FindOutcome::failed(err), FindOutcome::found)]
                }
                Err(err) => vec![FindOutcome::failed(err)],
            },
            CachePolicy::CacheThenNetwork => {
                vec![self.cache_outcome(), into_outcome(self.network(true))]
            }
        }
    }

    fn cache_outcome(&self) -> FindOutcome<T> {
        self.cached()
            .map_or_else(|| FindOutcome::failed(QueryError::cache_miss()), FindOutcome::found)
    }
}

fn into_outcome<T>(result: Result<Vec<T>, QueryError>) -> FindOutcome<T> {
    match result {
        Ok(items) => FindOutcome::found(items),
        Err(err) => FindOutcome::failed(err),
    }
}

#[async_trait::async_trait]
impl<T: Clone + Send + 'static> PagedQuery<T> for MemoryQuery<T> {
    fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    fn set_skip(&mut self, skip: usize) {
        self.skip = skip;
    }

    fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    async fn find(&self, callback: &dyn FindCallback<T>) {
        if !self.backend.latency.is_zero() {
            tokio::time::sleep(self.backend.latency).await;
        }
        for outcome in self.lookup() {
            if self.is_cancelled() {
                return;
            }
            callback.done(outcome);
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
