//! Event discovery filtering engine.
//!
//! Narrows an in-memory event collection by category chips, free-text
//! search, visibility and connection membership, distance radius,
//! availability, group size and date range. The core is pure:
//!
//! - [`filters`]: selections, one predicate per dimension, and the composer
//!   [`filter_events`]
//! - [`state`]: `(state, action) -> state` transitions and the
//!   [`DiscoverSession`] that owns the selections and the memoised view
//! - [`formatting`]: display helpers such as [`format_distance`]
//!
//! Configuration, feed files, logging and the CLI live at the edges.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod filters;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod state;

// Re-export commonly used types
pub use crate::core::{Choice, DiscoveryError, Event, Location, Visibility};

pub use crate::filters::{
    filter_events, Availability, CategorySelection, DiscoverFilters, DistanceMode, FilterField,
    ParticipantBucket, ParticipantBuckets,
};

pub use crate::formatting::{format_distance, DistanceDisplay};

pub use crate::state::{reduce, DiscoverAction, DiscoverSession, DiscoverState};

pub use crate::config::{DiscoveryConfig, OutputFormat};
