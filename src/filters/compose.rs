//! The filter composer: every predicate, ANDed, in one pass.

use super::buckets::ParticipantBuckets;
use super::predicates::{Candidate, Connections, EventPredicates};
use super::selection::{CategorySelection, DiscoverFilters};
use crate::core::Event;
use stillwater::predicate::Predicate;

/// Filter `events` down to those passing every dimension.
///
/// Pure: the input is not touched and the survivors come back in their
/// original relative order. Predicates are built once and the connection
/// list is indexed once, so the pass is linear in the number of events.
pub fn filter_events(
    events: &[Event],
    search_query: &str,
    selected_categories: &CategorySelection,
    selected_filters: &DiscoverFilters,
    user_connections: &[String],
    buckets: &ParticipantBuckets,
) -> Vec<Event> {
    let predicates = EventPredicates::new(search_query, selected_categories, selected_filters, buckets);
    let connections: Connections = user_connections.iter().collect();

    events
        .iter()
        .filter(|event| predicates.check(&Candidate::new(event, &connections)))
        .cloned()
        .collect()
}

/// Like [`filter_events`], but yields positions into `events` instead of
/// copies. Useful when the caller keeps its own storage.
pub fn filter_indices(
    events: &[Event],
    search_query: &str,
    selected_categories: &CategorySelection,
    selected_filters: &DiscoverFilters,
    user_connections: &[String],
    buckets: &ParticipantBuckets,
) -> Vec<usize> {
    let predicates = EventPredicates::new(search_query, selected_categories, selected_filters, buckets);
    let connections: Connections = user_connections.iter().collect();

    events
        .iter()
        .enumerate()
        .filter(|(_, event)| predicates.check(&Candidate::new(event, &connections)))
        .map(|(idx, _)| idx)
        .collect()
}
