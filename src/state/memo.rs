//! Memoised filtered view.
//!
//! The filtered events are derived data: they are recomputed from the five
//! inputs whenever any of them changes, and reused otherwise. Shared inputs
//! (events, connections) compare by pointer first and fall back to
//! structural equality; selections always compare structurally.

use super::reducer::DiscoverState;
use crate::core::Event;
use crate::filters::{filter_events, ParticipantBuckets};
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything the filtered view depends on.
#[derive(Debug, Clone)]
pub struct FilterInputs {
    pub events: Arc<[Event]>,
    pub state: DiscoverState,
    pub user_connections: Arc<[String]>,
}

impl FilterInputs {
    fn same_as(&self, other: &FilterInputs) -> bool {
        same_shared(&self.events, &other.events)
            && same_shared(&self.user_connections, &other.user_connections)
            && self.state == other.state
    }
}

fn same_shared<T: PartialEq>(a: &Arc<[T]>, b: &Arc<[T]>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

/// Single-entry cache of the last filter result.
#[derive(Debug, Default)]
pub struct FilteredEventsCache {
    last: Option<(FilterInputs, Arc<[Event]>)>,
    recomputations: usize,
}

impl FilteredEventsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the filtered events for `inputs`, recomputing only on change.
    pub fn get_or_compute(&mut self, inputs: &FilterInputs, buckets: &ParticipantBuckets) -> Arc<[Event]> {
        if let Some((key, result)) = &self.last {
            if key.same_as(inputs) {
                trace!("Filtered view unchanged, reusing {} events", result.len());
                return Arc::clone(result);
            }
        }

        let state = &inputs.state;
        let filtered: Arc<[Event]> = filter_events(
            &inputs.events,
            &state.search_query,
            &state.selected_categories,
            &state.selected_filters,
            &inputs.user_connections,
            buckets,
        )
        .into();
        self.recomputations += 1;
        debug!(
            total = inputs.events.len(),
            matched = filtered.len(),
            active_filters = state.selected_filters.active_count(),
            "Recomputed filtered events"
        );

        self.last = Some((inputs.clone(), Arc::clone(&filtered)));
        filtered
    }

    /// Forget the cached result, e.g. after the bucket configuration changed.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// How many times the view was actually recomputed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
