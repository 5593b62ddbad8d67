use pager_core::{
    update, CachePolicy, Effect, FindOutcome, LoadKind, LoaderState, Msg, PagingConfig,
    QueryError, QueryErrorKind, QueryId,
};
use pretty_assertions::assert_eq;

type State = LoaderState<u32>;

fn state_with_page_size(objects_per_page: usize) -> State {
    LoaderState::with_config(PagingConfig {
        objects_per_page,
        pagination_enabled: true,
    })
}

fn issue(
    state: State,
    query_id: QueryId,
    kind: LoadKind,
    cache_policy: CachePolicy,
) -> (State, Vec<Effect<u32>>) {
    let request = state.next_request(kind).expect("load allowed");
    update(
        state,
        Msg::QueryIssued {
            query_id,
            request,
            cache_policy,
        },
    )
}

fn complete(
    state: State,
    query_id: QueryId,
    outcome: FindOutcome<u32>,
) -> (State, Vec<Effect<u32>>) {
    update(state, Msg::QueryCompleted { query_id, outcome })
}

fn first_page_loaded() -> State {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::IgnoreCache);
    let (mut state, _) = complete(state, 1, FindOutcome::found(vec![1, 2, 3]));
    state.consume_dirty();
    state
}

#[test]
fn connection_failure_keeps_content_and_allows_retry() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);
    let (state, _) = update(state, Msg::SetHasNextPage(false));

    let err = QueryError::connection_failed("offline");
    let (mut state, effects) = complete(state, 2, FindOutcome::failed(err.clone()));

    assert_eq!(
        effects,
        vec![
            Effect::NotifyLoaded {
                items: None,
                has_next_page: true,
                error: Some(err),
            },
            Effect::ReleaseQuery { query_id: 2 },
        ]
    );
    assert_eq!(state.items(), vec![1, 2]);
    assert_eq!(state.current_page(), Some(0));
    assert!(state.has_next_page());
    assert!(!state.consume_dirty());
    assert_eq!(state.next_request(LoadKind::Next).map(|r| r.page), Some(1));
}

#[test]
fn failed_first_load_stays_retryable() {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::IgnoreCache);
    let (state, _) = complete(
        state,
        1,
        FindOutcome::failed(QueryError::connection_failed("offline")),
    );

    assert!(state.has_next_page());
    assert_eq!(state.current_page(), None);
    assert!(state.next_request(LoadKind::First).is_some());
}

#[test]
fn cache_miss_waits_for_network_completion() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::CacheThenNetwork);

    let (mut state, effects) = complete(state, 2, FindOutcome::failed(QueryError::cache_miss()));
    assert_eq!(
        effects,
        vec![Effect::NotifyLoaded {
            items: None,
            has_next_page: true,
            error: Some(QueryError::cache_miss()),
        }]
    );
    assert_eq!(state.pages().page(1), Some(&[][..]));
    assert!(state.is_loading());
    assert!(!state.consume_dirty());

    let (state, effects) = complete(state, 2, FindOutcome::found(vec![3]));
    assert_eq!(
        effects[0],
        Effect::SyncTarget {
            pages: vec![vec![1, 2], vec![3]],
        }
    );
    assert_eq!(state.items(), vec![1, 2, 3]);
    assert!(!state.has_next_page());
    assert!(!state.is_loading());
}

#[test]
fn cache_only_miss_changes_nothing() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::CacheOnly);
    let (state, effects) = complete(state, 2, FindOutcome::failed(QueryError::cache_miss()));

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[1], Effect::ReleaseQuery { query_id: 2 });
    assert_eq!(state.items(), vec![1, 2]);
    assert_eq!(state.current_page(), Some(0));
    assert!(!state.is_loading());
}

#[test]
fn unknown_errors_are_surfaced_untouched() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::NetworkOnly);
    let err = QueryError::new(QueryErrorKind::from_code(141), "script failed");
    let (state, effects) = complete(state, 2, FindOutcome::failed(err.clone()));

    assert!(matches!(
        &effects[0],
        Effect::NotifyLoaded { error: Some(e), .. } if *e == err
    ));
    assert_eq!(state.items(), vec![1, 2]);
}

#[test]
fn empty_completion_only_notifies() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);
    let (state, effects) = complete(
        state,
        2,
        FindOutcome {
            items: None,
            error: None,
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::NotifyLoaded {
                items: None,
                has_next_page: true,
                error: None,
            },
            Effect::ReleaseQuery { query_id: 2 },
        ]
    );
    assert_eq!(state.items(), vec![1, 2]);
}

#[test]
fn failed_reload_keeps_pending_next_page() {
    let state = first_page_loaded();
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);

    let (state, effects) = issue(state, 3, LoadKind::First, CachePolicy::IgnoreCache);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::CancelQueries(_))));

    let err = QueryError::connection_failed("offline");
    let (state, _) = complete(state, 3, FindOutcome::failed(err));
    assert_eq!(state.items(), vec![1, 2]);

    let (state, effects) = complete(state, 2, FindOutcome::found(vec![3, 4]));
    assert_eq!(
        effects[0],
        Effect::SyncTarget {
            pages: vec![vec![1, 2], vec![3, 4]],
        }
    );
    assert_eq!(state.items(), vec![1, 2, 3, 4]);
    assert_eq!(state.current_page(), Some(1));
    assert!(!state.is_loading());
}
