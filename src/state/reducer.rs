//! Pure state transitions for the discovery view.
//!
//! `reduce` maps `(state, action)` to a new state without touching the old
//! one. The owning [`DiscoverSession`](super::DiscoverSession) applies the
//! result and publishes it; nothing here performs I/O.

use crate::core::Result;
use crate::filters::{CategorySelection, DiscoverFilters, FilterField};
use serde::{Deserialize, Serialize};

/// Everything the user has selected on the discovery view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoverState {
    pub selected_categories: CategorySelection,
    pub search_query: String,
    pub selected_filters: DiscoverFilters,
}

impl DiscoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing narrows the event list.
    pub fn is_unfiltered(&self) -> bool {
        self.selected_categories.is_all()
            && self.search_query.trim().is_empty()
            && self.selected_filters.is_identity()
    }
}

/// User intents that change the discovery state.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoverAction {
    /// Replace the chip selection (normalised on construction).
    SetSelectedCategories(CategorySelection),
    /// Tap one category chip.
    ToggleCategory(String),
    SetSearchQuery(String),
    /// Replace the whole structured filter.
    SetFilters(DiscoverFilters),
    /// Replace one named field of the structured filter.
    ChangeFilter { field: FilterField, value: String },
    /// Back to defaults: filters, `["all"]` and an empty query, in one step.
    ClearAll,
}

/// Pure function: apply an action to a state.
///
/// Only `ChangeFilter` can fail, when the value does not parse for the
/// field; the input state is then still the current one.
pub fn reduce(state: &DiscoverState, action: DiscoverAction) -> Result<DiscoverState> {
    let next = match action {
        DiscoverAction::SetSelectedCategories(selection) => DiscoverState {
            selected_categories: selection,
            ..state.clone()
        },
        DiscoverAction::ToggleCategory(category) => DiscoverState {
            selected_categories: state.selected_categories.toggle(&category),
            ..state.clone()
        },
        DiscoverAction::SetSearchQuery(query) => DiscoverState {
            search_query: query,
            ..state.clone()
        },
        DiscoverAction::SetFilters(filters) => DiscoverState {
            selected_filters: filters,
            ..state.clone()
        },
        DiscoverAction::ChangeFilter { field, value } => DiscoverState {
            selected_filters: state.selected_filters.with_field(field, &value)?,
            ..state.clone()
        },
        DiscoverAction::ClearAll => DiscoverState::default(),
    };
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ALL;
    use crate::filters::Availability;

    #[test]
    fn test_default_state_is_unfiltered() {
        assert!(DiscoverState::new().is_unfiltered());
    }

    #[test]
    fn test_change_filter_touches_one_field() {
        let state = DiscoverState {
            search_query: "jazz".to_string(),
            ..DiscoverState::default()
        };
        let next = reduce(
            &state,
            DiscoverAction::ChangeFilter {
                field: FilterField::Availability,
                value: "full".to_string(),
            },
        )
        .unwrap();

        assert_eq!(next.selected_filters.availability, Availability::Full);
        assert_eq!(next.search_query, "jazz");
        assert_eq!(state.selected_filters.availability, Availability::All);
    }

    #[test]
    fn test_change_filter_invalid_value_is_error() {
        let state = DiscoverState::default();
        let result = reduce(
            &state,
            DiscoverAction::ChangeFilter {
                field: FilterField::Availability,
                value: "sometimes".to_string(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle_category() {
        let state = DiscoverState::default();
        let next = reduce(&state, DiscoverAction::ToggleCategory("music".into())).unwrap();
        assert_eq!(next.selected_categories.as_slice(), ["music".to_string()]);
        let back = reduce(&next, DiscoverAction::ToggleCategory(ALL.into())).unwrap();
        assert!(back.selected_categories.is_all());
    }

    #[test]
    fn test_clear_all_resets_every_part() {
        let state = DiscoverState {
            selected_categories: CategorySelection::all().select("art"),
            search_query: "gallery".to_string(),
            selected_filters: DiscoverFilters::default()
                .with_field(FilterField::Radius, "25")
                .unwrap(),
        };
        let cleared = reduce(&state, DiscoverAction::ClearAll).unwrap();
        assert_eq!(cleared, DiscoverState::default());
        assert_eq!(cleared.selected_filters.radius, "500");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn action() -> impl Strategy<Value = DiscoverAction> {
        prop_oneof![
            "[a-z]{3,6}".prop_map(DiscoverAction::ToggleCategory),
            "[a-z ]{0,8}".prop_map(DiscoverAction::SetSearchQuery),
            prop_oneof![Just("open"), Just("full"), Just("all")].prop_map(|v| {
                DiscoverAction::ChangeFilter {
                    field: FilterField::Availability,
                    value: v.to_string(),
                }
            }),
            (0u32..100).prop_map(|r| DiscoverAction::ChangeFilter {
                field: FilterField::Radius,
                value: r.to_string(),
            }),
            Just(DiscoverAction::ClearAll),
        ]
    }

    proptest! {
        /// Property: ClearAll from any reachable state yields the initial state.
        #[test]
        fn clear_all_restores_initial_state(actions in prop::collection::vec(action(), 0..20)) {
            let state = actions
                .into_iter()
                .fold(DiscoverState::default(), |s, a| reduce(&s, a).unwrap_or(s));
            let cleared = reduce(&state, DiscoverAction::ClearAll).unwrap();
            prop_assert_eq!(cleared, DiscoverState::default());
        }

        /// Property: reduce never modifies its input.
        #[test]
        fn reduce_leaves_input_untouched(actions in prop::collection::vec(action(), 1..10)) {
            let mut state = DiscoverState::default();
            for action in actions {
                let before = state.clone();
                let next = reduce(&state, action).unwrap_or_else(|_| state.clone());
                prop_assert_eq!(&state, &before);
                state = next;
            }
        }
    }
}
