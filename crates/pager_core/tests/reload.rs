use pager_core::{
    update, CachePolicy, Effect, FindOutcome, LoadKind, LoaderState, Msg, PagingConfig, QueryId,
};
use pretty_assertions::assert_eq;

type State = LoaderState<&'static str>;

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
) -> (State, Vec<Effect<&'static str>>) {
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
    items: &[&'static str],
) -> (State, Vec<Effect<&'static str>>) {
    update(
        state,
        Msg::QueryCompleted {
            query_id,
            outcome: FindOutcome::found(items.to_vec()),
        },
    )
}

fn loaded_two_pages() -> State {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::IgnoreCache);
    let (state, _) = complete(state, 1, &["a", "b", "c"]);
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);
    let (state, _) = complete(state, 2, &["c", "d", "e"]);
    state
}

#[test]
fn reload_resets_to_page_zero_and_discards_old_pages() {
    let state = loaded_two_pages();
    assert_eq!(state.current_page(), Some(1));

    let (state, _) = issue(state, 3, LoadKind::First, CachePolicy::IgnoreCache);
    // Old content stays visible until the reload's results arrive.
    assert_eq!(state.items(), vec!["a", "b", "c", "d"]);

    let (state, effects) = complete(state, 3, &["x", "y"]);
    assert_eq!(
        effects[0],
        Effect::SyncTarget {
            pages: vec![vec!["x", "y"]],
        }
    );
    assert_eq!(state.items(), vec!["x", "y"]);
    assert_eq!(state.current_page(), Some(0));
    assert!(!state.has_next_page());
}

#[test]
fn reload_cancels_queries_from_previous_generation() {
    let state = loaded_two_pages();
    let (state, _) = issue(state, 3, LoadKind::Next, CachePolicy::IgnoreCache);

    let (state, effects) = issue(state, 4, LoadKind::First, CachePolicy::IgnoreCache);
    assert_eq!(
        effects,
        vec![Effect::NotifyLoading, Effect::StartQuery { query_id: 4 }]
    );
    assert_eq!(state.in_flight().collect::<Vec<_>>(), vec![3, 4]);

    let (state, effects) = complete(state, 4, &["x", "y", "z"]);
    assert_eq!(effects[0], Effect::CancelQueries(vec![3]));
    let (state, effects) = complete(state, 3, &["stale"]);

    assert!(effects.is_empty());
    assert_eq!(state.items(), vec!["x", "y"]);
    assert_eq!(state.current_page(), Some(0));
}

#[test]
fn newer_reload_supersedes_one_still_waiting() {
    let state = loaded_two_pages();
    let (state, _) = issue(state, 3, LoadKind::First, CachePolicy::IgnoreCache);

    let (state, effects) = issue(state, 4, LoadKind::First, CachePolicy::IgnoreCache);
    assert_eq!(
        effects,
        vec![
            Effect::CancelQueries(vec![3]),
            Effect::NotifyLoading,
            Effect::StartQuery { query_id: 4 },
        ]
    );

    let (state, effects) = complete(state, 3, &["old", "reload"]);
    assert!(effects.is_empty());
    assert_eq!(state.items(), vec!["a", "b", "c", "d"]);

    let (state, _) = complete(state, 4, &["x"]);
    assert_eq!(state.items(), vec!["x"]);
}

#[test]
fn reset_cancels_pages_requested_before_it_landed() {
    let state = loaded_two_pages();
    let (state, _) = issue(state, 3, LoadKind::First, CachePolicy::IgnoreCache);
    // Still resolves against the old cursor, so it asks for page 2.
    let (state, _) = issue(state, 4, LoadKind::Next, CachePolicy::IgnoreCache);

    let (state, effects) = complete(state, 3, &["x", "y", "z"]);
    assert_eq!(effects[0], Effect::CancelQueries(vec![4]));
    assert!(!state.is_loading());

    let (state, effects) = complete(state, 4, &["late"]);
    assert!(effects.is_empty());
    assert_eq!(state.items(), vec!["x", "y"]);
    assert_eq!(state.pages().page_count(), 1);
}

#[test]
fn cache_then_network_applies_both_completions() {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::CacheThenNetwork);

    let (state, effects) = complete(state, 1, &["a", "b", "c"]);
    assert!(!effects.contains(&Effect::ReleaseQuery { query_id: 1 }));
    assert!(state.is_loading());
    assert_eq!(state.items(), vec!["a", "b"]);
    assert!(state.has_next_page());

    let (state, effects) = complete(state, 1, &["a", "b"]);
    assert_eq!(effects.last(), Some(&Effect::ReleaseQuery { query_id: 1 }));
    assert!(!state.is_loading());
    assert_eq!(state.items(), vec!["a", "b"]);
    assert!(!state.has_next_page());
}

#[test]
fn late_second_completion_never_rewinds_cursor() {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::CacheThenNetwork);
    let (state, _) = complete(state, 1, &["a", "b", "c"]);

    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);
    let (state, _) = complete(state, 2, &["d"]);
    assert_eq!(state.current_page(), Some(1));
    assert!(!state.has_next_page());

    let (state, _) = complete(state, 1, &["a2", "b2", "c2"]);
    assert_eq!(state.current_page(), Some(1));
    assert!(!state.has_next_page());
    assert_eq!(state.items(), vec!["a2", "b2", "d"]);
    assert!(!state.is_loading());
}

#[test]
fn second_clearing_completion_does_not_reset_again() {
    let state = state_with_page_size(2);
    let (state, _) = issue(state, 1, LoadKind::First, CachePolicy::CacheThenNetwork);
    let (state, _) = complete(state, 1, &["a", "b", "c"]);
    let (state, _) = issue(state, 2, LoadKind::Next, CachePolicy::IgnoreCache);
    let (state, _) = complete(state, 2, &["c", "d", "e"]);

    let (state, effects) = complete(state, 1, &["a", "b", "c"]);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::CancelQueries(_))));
    assert_eq!(state.items(), vec!["a", "b", "c", "d"]);
    assert_eq!(state.pages().page_count(), 2);
}
