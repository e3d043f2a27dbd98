//! Filter state owner for one discovery view.
//!
//! A `DiscoverSession` lives as long as the view: it is created with default
//! selections, changed only through its setters, and dropped with the view.
//! Every setter applies one [`DiscoverAction`] through the pure reducer,
//! refreshes the memoised filtered view synchronously, and notifies
//! subscribers when the state actually changed. All of this happens on the
//! caller's thread; no step blocks or yields.

use super::memo::{FilterInputs, FilteredEventsCache};
use super::reducer::{reduce, DiscoverAction, DiscoverState};
use crate::core::{Event, Result};
use crate::filters::{CategorySelection, DiscoverFilters, FilterField, ParticipantBuckets};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Subscriber = Box<dyn FnMut(&DiscoverState)>;

pub struct DiscoverSession {
    inputs: FilterInputs,
    buckets: ParticipantBuckets,
    cache: FilteredEventsCache,
    filtered: Arc<[Event]>,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for DiscoverSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoverSession")
            .field("state", &self.inputs.state)
            .field("events", &self.inputs.events.len())
            .field("filtered", &self.filtered.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl DiscoverSession {
    /// Create a session over the loader's events and the caller's connections.
    pub fn new(events: impl Into<Arc<[Event]>>, user_connections: impl Into<Arc<[String]>>) -> Self {
        Self::with_buckets(events, user_connections, ParticipantBuckets::default())
    }

    pub fn with_buckets(
        events: impl Into<Arc<[Event]>>,
        user_connections: impl Into<Arc<[String]>>,
        buckets: ParticipantBuckets,
    ) -> Self {
        let inputs = FilterInputs {
            events: events.into(),
            state: DiscoverState::default(),
            user_connections: user_connections.into(),
        };
        let mut cache = FilteredEventsCache::new();
        let filtered = cache.get_or_compute(&inputs, &buckets);
        Self {
            inputs,
            buckets,
            cache,
            filtered,
            subscribers: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> &DiscoverState {
        &self.inputs.state
    }

    pub fn selected_categories(&self) -> &CategorySelection {
        &self.inputs.state.selected_categories
    }

    pub fn search_query(&self) -> &str {
        &self.inputs.state.search_query
    }

    pub fn selected_filters(&self) -> &DiscoverFilters {
        &self.inputs.state.selected_filters
    }

    pub fn events(&self) -> &[Event] {
        &self.inputs.events
    }

    pub fn user_connections(&self) -> &[String] {
        &self.inputs.user_connections
    }

    pub fn buckets(&self) -> &ParticipantBuckets {
        &self.buckets
    }

    /// The derived view over the current inputs.
    pub fn filtered_events(&self) -> &[Event] {
        &self.filtered
    }

    /// Shared handle to the derived view; unchanged inputs yield the same
    /// allocation.
    pub fn filtered_handle(&self) -> Arc<[Event]> {
        Arc::clone(&self.filtered)
    }

    /// Number of times the derived view was actually recomputed.
    pub fn recompute_count(&self) -> usize {
        self.cache.recomputations()
    }

    // ------------------------------------------------------------------
    // Selection setters
    // ------------------------------------------------------------------

    pub fn set_selected_categories(&mut self, selection: CategorySelection) {
        self.apply(DiscoverAction::SetSelectedCategories(selection));
    }

    /// Tap a category chip, keeping the `all` invariant.
    pub fn toggle_category(&mut self, category: &str) {
        self.apply(DiscoverAction::ToggleCategory(category.to_string()));
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.apply(DiscoverAction::SetSearchQuery(query.into()));
    }

    pub fn set_selected_filters(&mut self, filters: DiscoverFilters) {
        self.apply(DiscoverAction::SetFilters(filters));
    }

    /// Replace one filter field. On error the state is left as it was.
    pub fn handle_filter_change(&mut self, field: FilterField, value: &str) -> Result<()> {
        self.dispatch(DiscoverAction::ChangeFilter {
            field,
            value: value.to_string(),
        })
    }

    /// Same as [`handle_filter_change`](Self::handle_filter_change), with the
    /// field given by name. Unknown names are rejected without side effects.
    pub fn handle_filter_change_by_name(&mut self, field: &str, value: &str) -> Result<()> {
        let field: FilterField = field.parse()?;
        self.handle_filter_change(field, value)
    }

    /// Reset filters, categories and the search query as one transition.
    pub fn clear_all_filters(&mut self) {
        self.apply(DiscoverAction::ClearAll);
    }

    /// Apply any action through the reducer.
    pub fn dispatch(&mut self, action: DiscoverAction) -> Result<()> {
        let next = reduce(&self.inputs.state, action)?;
        self.publish(next);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Input setters (from the data loader)
    // ------------------------------------------------------------------

    pub fn set_events(&mut self, events: impl Into<Arc<[Event]>>) {
        self.inputs.events = events.into();
        self.refresh();
    }

    pub fn set_user_connections(&mut self, user_connections: impl Into<Arc<[String]>>) {
        self.inputs.user_connections = user_connections.into();
        self.refresh();
    }

    pub fn set_buckets(&mut self, buckets: ParticipantBuckets) {
        if buckets != self.buckets {
            self.buckets = buckets;
            self.cache.invalidate();
            self.refresh();
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a listener for state changes. It is called with each newly
    /// published state, never for transitions that changed nothing.
    pub fn subscribe(&mut self, listener: impl FnMut(&DiscoverState) + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply(&mut self, action: DiscoverAction) {
        // Only ChangeFilter can fail and it goes through `dispatch`.
        if let Err(e) = self.dispatch(action) {
            debug!("Ignoring rejected transition: {}", e);
        }
    }

    fn publish(&mut self, next: DiscoverState) {
        if next == self.inputs.state {
            return;
        }
        self.inputs.state = next;
        self.refresh();
        for listener in &mut self.subscribers {
            listener(&self.inputs.state);
        }
    }

    fn refresh(&mut self) {
        self.filtered = self.cache.get_or_compute(&self.inputs, &self.buckets);
    }
}
