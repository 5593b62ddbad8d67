use crate::{QueryError, QueryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<T> {
    /// Tell every listener a load started.
    NotifyLoading,
    /// Dispatch the registered query.
    StartQuery { query_id: QueryId },
    /// Cancel and forget these queries.
    CancelQueries(Vec<QueryId>),
    /// The query delivered its last completion and is no longer in flight.
    ReleaseQuery { query_id: QueryId },
    /// Rebuild the sink from the page table, then signal a content change.
    SyncTarget { pages: Vec<Vec<T>> },
    /// Tell every listener a completion was handled.
    NotifyLoaded {
        items: Option<Vec<T>>,
        has_next_page: bool,
        error: Option<QueryError>,
    },
}
