//! Discovery view state: pure transitions, the memoised filtered view, and
//! the session that ties them together.
//!
//! # Examples
//!
//! ```rust
//! use event_discovery::core::Event;
//! use event_discovery::filters::FilterField;
//! use event_discovery::state::DiscoverSession;
//!
//! let events = vec![
//!     Event::new("a", "Jazz Night", "music").with_distance_km(2.0),
//!     Event::new("b", "Football", "sports").with_distance_km(20.0),
//! ];
//! let mut session = DiscoverSession::new(events, Vec::<String>::new());
//!
//! session.handle_filter_change(FilterField::Distance, "radius")?;
//! session.handle_filter_change(FilterField::Radius, "10")?;
//! assert_eq!(session.filtered_events().len(), 1);
//!
//! session.clear_all_filters();
//! assert_eq!(session.filtered_events().len(), 2);
//! # Ok::<(), event_discovery::core::DiscoveryError>(())
//! ```

pub mod memo;
pub mod reducer;
pub mod session;

pub use memo::{FilterInputs, FilteredEventsCache};
pub use reducer::{reduce, DiscoverAction, DiscoverState};
pub use session::DiscoverSession;
