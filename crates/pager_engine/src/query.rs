use std::sync::mpsc;

use pager_core::{CachePolicy, FindOutcome, QueryId};
use tokio_util::sync::CancellationToken;

use crate::Completion;

/// Receives the completions of one find. Called once, or twice for
/// [`CachePolicy::CacheThenNetwork`].
pub trait FindCallback<T>: Send + Sync {
    fn done(&self, outcome: FindOutcome<T>);
}

/// Forwards completions to the loader's single consumer queue.
pub struct ChannelFindCallback<T> {
    query_id: QueryId,
    tx: mpsc::Sender<Completion<T>>,
    token: CancellationToken,
}

impl<T> ChannelFindCallback<T> {
    pub fn new(query_id: QueryId, tx: mpsc::Sender<Completion<T>>, token: CancellationToken) -> Self {
        Self {
            query_id,
            tx,
            token,
        }
    }
}

impl<T: Send> FindCallback<T> for ChannelFindCallback<T> {
    fn done(&self, outcome: FindOutcome<T>) {
        if self.token.is_cancelled() {
            return;
        }
        let _ = self.tx.send(Completion {
            query_id: self.query_id,
            outcome,
        });
    }
}

/// A remote query that can be windowed, run and cancelled.
#[async_trait::async_trait]
pub trait PagedQuery<T>: Send + Sync {
    fn set_limit(&mut self, limit: usize);

    fn set_skip(&mut self, skip: usize);

    fn cache_policy(&self) -> CachePolicy;

    /// Runs the query, reporting every result set or error through `callback`.
    async fn find(&self, callback: &dyn FindCallback<T>);

    /// Best-effort; a completion may still be delivered afterwards.
    fn cancel(&self);
}

/// Builds a fresh query per page request. Returning `None` skips the load.
pub trait QueryFactory<T> {
    fn create(&self) -> Option<Box<dyn PagedQuery<T>>>;
}

impl<T, F> QueryFactory<T> for F
where
    F: Fn() -> Option<Box<dyn PagedQuery<T>>>,
{
    fn create(&self) -> Option<Box<dyn PagedQuery<T>>> {
        self()
    }
}
