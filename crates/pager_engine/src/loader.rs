use std::collections::HashMap;
use std::sync::{mpsc::RecvTimeoutError, Arc};
use std::time::{Duration, Instant};

use pager_core::{update, Effect, LoadKind, LoaderState, LoaderView, Msg, QueryId};
use pager_logging::{pager_debug, pager_error, pager_trace, pager_warn};
use tokio_util::sync::CancellationToken;

use crate::listener::{ListenerId, ListenerRegistry, OnQueryLoadListener};
use crate::query::{PagedQuery, QueryFactory};
use crate::target::LoaderTarget;
use crate::{Completion, LoaderError, LoaderSettings, QueryExecutor};

struct RunningQuery<T> {
    query: Arc<dyn PagedQuery<T>>,
    token: CancellationToken,
}

/// Loads pages of remote results into a [`LoaderTarget`].
///
/// The loader never blocks on a query. Completions are queued by the executor
/// and applied on the loader's own thread by [`process_pending`](Self::process_pending)
/// or [`wait_idle`](Self::wait_idle), so the page table is only ever mutated
/// from one place.
pub struct PagedLoader<T, S> {
    state: LoaderState<T>,
    target: S,
    factory: Option<Box<dyn QueryFactory<T>>>,
    listeners: ListenerRegistry<T>,
    running: HashMap<QueryId, RunningQuery<T>>,
    executor: QueryExecutor<T>,
    last_query_id: QueryId,
}

impl<T, S> PagedLoader<T, S>
where
    T: Clone + Send + 'static,
    S: LoaderTarget<T>,
{
    pub fn new(target: S, settings: &LoaderSettings) -> Result<Self, LoaderError> {
        settings.validate()?;
        let executor = QueryExecutor::start(settings.worker_threads)?;
        Ok(Self {
            state: LoaderState::with_config(settings.paging()),
            target,
            factory: None,
            listeners: ListenerRegistry::new(),
            running: HashMap::new(),
            executor,
            last_query_id: 0,
        })
    }

    pub fn with_query_factory(mut self, factory: impl QueryFactory<T> + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn set_query_factory(&mut self, factory: Option<Box<dyn QueryFactory<T>>>) {
        self.factory = factory;
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut S {
        &mut self.target
    }

    pub fn objects_per_page(&self) -> usize {
        self.state.config().objects_per_page
    }

    pub fn set_objects_per_page(&mut self, objects_per_page: usize) {
        self.state.set_objects_per_page(objects_per_page);
    }

    pub fn set_pagination_enabled(&mut self, enabled: bool) {
        self.state.set_pagination_enabled(enabled);
    }

    pub fn add_on_query_load_listener(
        &mut self,
        listener: Box<dyn OnQueryLoadListener<T>>,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_on_query_load_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn clear_on_query_load_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn has_on_query_load_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    /// Forces the next-page flag; `true` re-enables loading after the end was reached.
    pub fn set_has_next_page(&mut self, has_next_page: bool) {
        self.dispatch(Msg::SetHasNextPage(has_next_page));
    }

    pub fn current_page(&self) -> Option<usize> {
        self.state.current_page()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.items()
    }

    pub fn view(&self) -> LoaderView {
        self.state.view()
    }

    /// Returns whether content changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Reloads from page 0; current content is replaced once results arrive.
    pub fn load_first_page(&mut self) {
        self.load(LoadKind::First);
    }

    pub fn load_next_page(&mut self) {
        self.load(LoadKind::Next);
    }

    pub fn cancel_all_running_queries(&mut self) {
        self.dispatch(Msg::CancelAll);
    }

    /// Empties the target and cancels everything in flight.
    pub fn clear(&mut self) {
        self.dispatch(Msg::Clear);
    }

    /// Applies every completion already queued. Never blocks.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(completion) = self.executor.try_recv() {
            self.handle_completion(completion);
            handled += 1;
        }
        handled
    }

    /// Applies completions until nothing is in flight or `timeout` elapses.
    /// Returns whether the loader went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending();
            if !self.is_loading() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.executor.recv_timeout(remaining) {
                Ok(completion) => self.handle_completion(completion),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    pager_error!("query executor disconnected while waiting");
                    return false;
                }
            }
        }
    }

    fn load(&mut self, kind: LoadKind) {
        let Some(request) = self.state.next_request(kind) else {
            pager_trace!("no further pages; {:?} load skipped", kind);
            return;
        };
        let Some(factory) = self.factory.as_ref() else {
            return;
        };
        let Some(mut query) = factory.create() else {
            pager_debug!("query factory produced no query for page {}", request.page);
            return;
        };
        if let Some(window) = self.state.window_for(request.page) {
            query.set_limit(window.limit);
            query.set_skip(window.skip);
        }

        self.last_query_id += 1;
        let query_id = self.last_query_id;
        let cache_policy = query.cache_policy();
        self.running.insert(
            query_id,
            RunningQuery {
                query: Arc::from(query),
                token: CancellationToken::new(),
            },
        );
        self.dispatch(Msg::QueryIssued {
            query_id,
            request,
            cache_policy,
        });
    }

    fn handle_completion(&mut self, completion: Completion<T>) {
        let Completion { query_id, outcome } = completion;
        if !self.state.is_in_flight(query_id) {
            pager_debug!("discarding completion of stale query {}", query_id);
            return;
        }
        self.dispatch(Msg::QueryCompleted { query_id, outcome });
    }

    fn dispatch(&mut self, msg: Msg<T>) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect<T>) {
        match effect {
            Effect::NotifyLoading => self.listeners.notify_loading(),
            Effect::StartQuery { query_id } => {
                if let Some(running) = self.running.get(&query_id) {
                    pager_debug!("dispatching query {}", query_id);
                    self.executor
                        .dispatch(query_id, running.query.clone(), running.token.clone());
                }
            }
            Effect::CancelQueries(query_ids) => {
                for query_id in query_ids {
                    if let Some(running) = self.running.remove(&query_id) {
                        pager_debug!("cancelling query {}", query_id);
                        running.query.cancel();
                        running.token.cancel();
                    }
                }
            }
            Effect::ReleaseQuery { query_id } => {
                self.running.remove(&query_id);
            }
            Effect::SyncTarget { pages } => {
                self.target.clear_list();
                for page in &pages {
                    self.target.append_sublist(page);
                }
                self.target.notify_data_changed();
            }
            Effect::NotifyLoaded {
                items,
                has_next_page,
                error,
            } => {
                if let Some(err) = error.as_ref().filter(|err| !err.is_cache_miss()) {
                    pager_warn!("query failed: {}", err);
                }
                self.listeners
                    .notify_loaded(items.as_deref(), has_next_page, error.as_ref());
            }
        }
    }
}
