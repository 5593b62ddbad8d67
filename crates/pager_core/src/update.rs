use crate::state::{Delivery, InFlight};
use crate::{Effect, FindOutcome, LoaderState, Msg, QueryId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<T: Clone>(
    mut state: LoaderState<T>,
    msg: Msg<T>,
) -> (LoaderState<T>, Vec<Effect<T>>) {
    let effects = match msg {
        Msg::QueryIssued {
            query_id,
            request,
            cache_policy,
        } => {
            if state.in_flight.contains_key(&query_id) {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(3);
            // A newer clearing request supersedes any reload still waiting to
            // reset; next-page requests survive until the reset applies.
            if request.should_clear {
                effects.extend(cancel_pending_resets(&mut state));
            }
            state.in_flight.insert(
                query_id,
                InFlight {
                    page: request.page,
                    cache_policy,
                    reset_pending: request.should_clear,
                    delivery: Delivery::AwaitingFirst,
                },
            );
            state.pages.ensure_page(request.page);
            effects.push(Effect::NotifyLoading);
            effects.push(Effect::StartQuery { query_id });
            effects
        }
        Msg::QueryCompleted { query_id, outcome } => {
            apply_completion(&mut state, query_id, outcome)
        }
        Msg::CancelAll => cancel_all(&mut state).into_iter().collect(),
        Msg::Clear => {
            let mut effects: Vec<_> = cancel_all(&mut state).into_iter().collect();
            state.pages.clear();
            state.current_page = None;
            state.has_next_page = true;
            state.mark_dirty();
            effects.push(Effect::SyncTarget { pages: Vec::new() });
            effects
        }
        Msg::SetHasNextPage(has_next_page) => {
            state.has_next_page = has_next_page;
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel_all<T>(state: &mut LoaderState<T>) -> Option<Effect<T>> {
    if state.in_flight.is_empty() {
        return None;
    }
    let cancelled = std::mem::take(&mut state.in_flight).into_keys().collect();
    Some(Effect::CancelQueries(cancelled))
}

fn cancel_pending_resets<T>(state: &mut LoaderState<T>) -> Option<Effect<T>> {
    let superseded: Vec<QueryId> = state
        .in_flight
        .iter()
        .filter(|(_, flight)| flight.reset_pending)
        .map(|(id, _)| *id)
        .collect();
    if superseded.is_empty() {
        return None;
    }
    for id in &superseded {
        state.in_flight.remove(id);
    }
    Some(Effect::CancelQueries(superseded))
}

fn apply_completion<T: Clone>(
    state: &mut LoaderState<T>,
    query_id: QueryId,
    outcome: FindOutcome<T>,
) -> Vec<Effect<T>> {
    // Cancelled or superseded queries may still deliver; nothing of theirs applies.
    let Some(mut flight) = state.in_flight.get(&query_id).copied() else {
        return Vec::new();
    };

    let released = match (flight.cache_policy.delivers_twice(), flight.delivery) {
        (true, Delivery::AwaitingFirst) => {
            flight.delivery = Delivery::AwaitingSecond;
            false
        }
        _ => true,
    };

    let mut effects = Vec::new();
    let FindOutcome { mut items, error } = outcome;

    match (&error, items.as_mut()) {
        (Some(err), _) => {
            // A cache miss waits for the network-backed completion. Any other
            // failure leaves the table alone and keeps pagination retryable.
            if !err.is_cache_miss() {
                state.has_next_page = true;
            }
        }
        (None, Some(found)) => {
            let page = flight.page;
            if flight.reset_pending {
                flight.reset_pending = false;
                let superseded: Vec<QueryId> = state
                    .in_flight
                    .keys()
                    .copied()
                    .filter(|id| *id != query_id)
                    .collect();
                for id in &superseded {
                    state.in_flight.remove(id);
                }
                if !superseded.is_empty() {
                    effects.push(Effect::CancelQueries(superseded));
                }
                state.pages.reset();
                state.current_page = Some(page);
            }

            let per_page = state.config.objects_per_page;
            // Without a window the query returned everything there is.
            let windowed = state.window_for(page).is_some();
            // Only advance; a late second completion must not rewind the cursor.
            if state.current_page.map_or(true, |current| page >= current) {
                state.current_page = Some(page);
                state.has_next_page = windowed && found.len() > per_page;
            }
            if windowed && found.len() > per_page {
                found.truncate(per_page);
            }

            state.pages.replace(page, found.clone());
            state.mark_dirty();
            effects.push(Effect::SyncTarget {
                pages: state.pages.snapshot(),
            });
        }
        (None, None) => {}
    }

    effects.push(Effect::NotifyLoaded {
        items,
        has_next_page: state.has_next_page,
        error,
    });

    if released {
        state.in_flight.remove(&query_id);
        effects.push(Effect::ReleaseQuery { query_id });
    } else {
        state.in_flight.insert(query_id, flight);
    }

    effects
}
