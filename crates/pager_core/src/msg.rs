use crate::{CachePolicy, PageRequest, QueryError, QueryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<T> {
    /// A query was built for `request` and is about to be dispatched.
    QueryIssued {
        query_id: QueryId,
        request: PageRequest,
        cache_policy: CachePolicy,
    },
    /// A query delivered a completion. Fires twice for dual-callback policies.
    QueryCompleted {
        query_id: QueryId,
        outcome: FindOutcome<T>,
    },
    /// Cancel every in-flight query.
    CancelAll,
    /// Drop all pages and cancel every in-flight query.
    Clear,
    /// Force the next-page flag, e.g. to allow a reload after exhaustion.
    SetHasNextPage(bool),
    NoOp,
}

/// What a single find completion carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOutcome<T> {
    pub items: Option<Vec<T>>,
    pub error: Option<QueryError>,
}

impl<T> FindOutcome<T> {
    pub fn found(items: Vec<T>) -> Self {
        Self {
            items: Some(items),
            error: None,
        }
    }

    pub fn failed(error: QueryError) -> Self {
        Self {
            items: None,
            error: Some(error),
        }
    }
}
