//! Event filtering: selections, per-dimension predicates and the composer.
//!
//! ```rust
//! use event_discovery::core::Event;
//! use event_discovery::filters::{filter_events, CategorySelection, DiscoverFilters, ParticipantBuckets};
//!
//! let events = vec![
//!     Event::new("a", "Jazz Night", "music"),
//!     Event::new("b", "Pickup Football", "sports"),
//! ];
//! let music = CategorySelection::all().select("music");
//! let result = filter_events(
//!     &events,
//!     "",
//!     &music,
//!     &DiscoverFilters::default(),
//!     &[],
//!     &ParticipantBuckets::default(),
//! );
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].id, "a");
//! ```

pub mod buckets;
pub mod compose;
pub mod predicates;
pub mod selection;

pub use buckets::{group_size, ParticipantBucket, ParticipantBuckets};
pub use compose::{filter_events, filter_indices};
pub use predicates::{Candidate, Connections, Dimension, EventPredicates};
pub use selection::{
    parse_radius, Availability, CategorySelection, DiscoverFilters, DistanceMode, FilterField,
    DEFAULT_RADIUS_KM,
};
