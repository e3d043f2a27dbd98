//! One predicate per filter dimension.
//!
//! Each predicate answers "include this event?" for a single dimension and
//! knows nothing about the others, so they compose by logical AND in any
//! order. They are built on stillwater's [`Predicate`] trait.
//!
//! Every predicate is the identity when its dimension is set to `all`. When
//! a dimension is actively constrained, an event lacking the data needed to
//! decide is excluded (fail closed).
//!
//! # Example
//!
//! ```rust
//! use event_discovery::core::Event;
//! use event_discovery::filters::predicates::{DistancePredicate, Radius};
//! use stillwater::predicate::Predicate;
//!
//! let within_ten = DistancePredicate::new(Radius::Km(10.0));
//! assert!(within_ten.check(&Event::new("a", "Jam", "music").with_distance_km(2.0)));
//! // No distance known: excluded while a radius is active
//! assert!(!within_ten.check(&Event::new("b", "Jam", "music")));
//! ```

use super::buckets::{group_size, ParticipantBucket, ParticipantBuckets};
use super::selection::{Availability, CategorySelection, DiscoverFilters};
use crate::core::{Choice, Event, Visibility};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;
use stillwater::predicate::Predicate;

/// The caller's connections, indexed for constant-time membership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections(HashSet<String>);

impl Connections {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a String> for Connections {
    fn from_iter<I: IntoIterator<Item = &'a String>>(iter: I) -> Self {
        Self(iter.into_iter().cloned().collect())
    }
}

impl FromIterator<String> for Connections {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An event paired with the viewer context it is judged in.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub event: &'a Event,
    pub connections: &'a Connections,
}

impl<'a> Candidate<'a> {
    pub fn new(event: &'a Event, connections: &'a Connections) -> Self {
        Self { event, connections }
    }
}

/// The dimensions an event can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Visibility,
    Category,
    Search,
    Distance,
    Availability,
    Participants,
    DateRange,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Visibility => "visibility",
            Dimension::Category => "category",
            Dimension::Search => "search",
            Dimension::Distance => "distance",
            Dimension::Availability => "availability",
            Dimension::Participants => "participants",
            Dimension::DateRange => "date range",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// Visibility predicate.
///
/// Selecting `connections` also requires the organizer to be one of the
/// viewer's connections; an event with no organizer cannot satisfy that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPredicate {
    filter: Option<Visibility>,
}

impl VisibilityPredicate {
    pub fn new(filter: &Choice<Visibility>) -> Self {
        Self {
            filter: filter.as_only().copied(),
        }
    }
}

impl Predicate<Candidate<'_>> for VisibilityPredicate {
    fn check(&self, candidate: &Candidate<'_>) -> bool {
        let Some(wanted) = self.filter else {
            return true;
        };
        let event = candidate.event;
        if event.visibility != wanted {
            return false;
        }
        match wanted {
            Visibility::Connections => event
                .organizer_id
                .as_deref()
                .is_some_and(|organizer| candidate.connections.contains(organizer)),
            Visibility::Public | Visibility::Private => true,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Category predicate: the chip selection and the single-value `category`
/// filter must both admit the event's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPredicate {
    selection: CategorySelection,
    category: Choice<String>,
}

impl CategoryPredicate {
    pub fn new(selection: &CategorySelection, category: &Choice<String>) -> Self {
        Self {
            selection: selection.clone(),
            category: category.clone(),
        }
    }
}

impl Predicate<Event> for CategoryPredicate {
    fn check(&self, event: &Event) -> bool {
        let single = match &self.category {
            Choice::All => true,
            Choice::Only(wanted) => event.category == *wanted,
        };
        single && self.selection.allows(&event.category)
    }
}

// =============================================================================
// Search
// =============================================================================

/// Free-text predicate: case-insensitive substring of title, description,
/// category or location name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    needle: Option<String>,
}

impl SearchPredicate {
    /// Whitespace-only queries count as empty.
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }
}

impl Predicate<Event> for SearchPredicate {
    fn check(&self, event: &Event) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        let haystacks = [
            Some(event.title.as_str()),
            event.description.as_deref(),
            Some(event.category.as_str()),
            event.location_name(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

// =============================================================================
// Distance
// =============================================================================

/// Radius state resolved from the filter selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    Unbounded,
    Km(f64),
    /// A radius is selected but its text is not a usable number.
    Invalid,
}

impl Radius {
    pub fn from_filters(filters: &DiscoverFilters) -> Self {
        match filters.radius_km() {
            None => Radius::Unbounded,
            Some(Some(km)) => Radius::Km(km),
            Some(None) => Radius::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistancePredicate {
    radius: Radius,
}

impl DistancePredicate {
    pub fn new(radius: Radius) -> Self {
        Self { radius }
    }
}

impl Predicate<Event> for DistancePredicate {
    fn check(&self, event: &Event) -> bool {
        match self.radius {
            Radius::Unbounded => true,
            Radius::Km(max) => event.distance_km().is_some_and(|d| d <= max),
            Radius::Invalid => false,
        }
    }
}

// =============================================================================
// Availability
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPredicate(pub Availability);

impl Predicate<Event> for AvailabilityPredicate {
    fn check(&self, event: &Event) -> bool {
        match self.0 {
            Availability::All => true,
            Availability::Open => event.is_open(),
            Availability::Full => event.is_full(),
        }
    }
}

// =============================================================================
// Participants
// =============================================================================

/// Group-size predicate against an injected bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantsPredicate {
    Any,
    Within(ParticipantBucket),
    /// Selected bucket is not configured; nothing matches.
    Unknown(String),
}

impl ParticipantsPredicate {
    pub fn new(selection: &Choice<String>, buckets: &ParticipantBuckets) -> Self {
        match selection {
            Choice::All => Self::Any,
            Choice::Only(name) => buckets
                .get(name)
                .cloned()
                .map(Self::Within)
                .unwrap_or_else(|| Self::Unknown(name.clone())),
        }
    }
}

impl Predicate<Event> for ParticipantsPredicate {
    fn check(&self, event: &Event) -> bool {
        match self {
            Self::Any => true,
            Self::Within(bucket) => bucket.contains(group_size(event)),
            Self::Unknown(_) => false,
        }
    }
}

// =============================================================================
// Date range
// =============================================================================

/// Inclusive date-range predicate; a missing bound is open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangePredicate {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRangePredicate {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl Predicate<Event> for DateRangePredicate {
    fn check(&self, event: &Event) -> bool {
        if self.is_unbounded() {
            return true;
        }
        event.scheduled_date().is_some_and(|date| {
            self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
        })
    }
}

// =============================================================================
// Predicate Set
// =============================================================================

/// All dimension predicates, configured from one filter selection.
#[derive(Debug, Clone)]
pub struct EventPredicates {
    pub visibility: VisibilityPredicate,
    pub category: CategoryPredicate,
    pub search: SearchPredicate,
    pub distance: DistancePredicate,
    pub availability: AvailabilityPredicate,
    pub participants: ParticipantsPredicate,
    pub date_range: DateRangePredicate,
}

impl EventPredicates {
    pub fn new(
        search_query: &str,
        selected_categories: &CategorySelection,
        filters: &DiscoverFilters,
        buckets: &ParticipantBuckets,
    ) -> Self {
        Self {
            visibility: VisibilityPredicate::new(&filters.visibility),
            category: CategoryPredicate::new(selected_categories, &filters.category),
            search: SearchPredicate::new(search_query),
            distance: DistancePredicate::new(Radius::from_filters(filters)),
            availability: AvailabilityPredicate(filters.availability),
            participants: ParticipantsPredicate::new(&filters.participants, buckets),
            date_range: DateRangePredicate::new(filters.date_from, filters.date_to),
        }
    }

    /// Dimensions that reject the candidate, in a fixed order.
    pub fn rejections(&self, candidate: &Candidate<'_>) -> Vec<Dimension> {
        let event = candidate.event;
        [
            (Dimension::Visibility, self.visibility.check(candidate)),
            (Dimension::Category, self.category.check(event)),
            (Dimension::Search, self.search.check(event)),
            (Dimension::Distance, self.distance.check(event)),
            (Dimension::Availability, self.availability.check(event)),
            (Dimension::Participants, self.participants.check(event)),
            (Dimension::DateRange, self.date_range.check(event)),
        ]
        .into_iter()
        .filter(|(_, passed)| !passed)
        .map(|(dimension, _)| dimension)
        .collect()
    }
}

impl Predicate<Candidate<'_>> for EventPredicates {
    fn check(&self, candidate: &Candidate<'_>) -> bool {
        let event = candidate.event;
        self.category.check(event)
            && self.search.check(event)
            && self.visibility.check(candidate)
            && self.distance.check(event)
            && self.availability.check(event)
            && self.participants.check(event)
            && self.date_range.check(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Location;
    use crate::filters::selection::FilterField;
    use chrono::{TimeZone, Utc};

    fn connections(ids: &[&str]) -> Connections {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn on(y: i32, m: u32, d: u32) -> Event {
        Event::new("e", "Dated", "music")
            .with_schedule(Utc.with_ymd_and_hms(y, m, d, 18, 30, 0).unwrap())
    }

    #[test]
    fn test_visibility_all_is_identity() {
        let conns = Connections::default();
        let event = Event::new("a", "A", "music").with_visibility(Visibility::Private);
        let pred = VisibilityPredicate::new(&Choice::All);
        assert!(pred.check(&Candidate::new(&event, &conns)));
    }

    #[test]
    fn test_visibility_connections_requires_membership() {
        let pred = VisibilityPredicate::new(&Choice::Only(Visibility::Connections));
        let event = Event::new("b", "B", "sports")
            .with_visibility(Visibility::Connections)
            .with_organizer("u1");

        assert!(pred.check(&Candidate::new(&event, &connections(&["u1"]))));
        assert!(!pred.check(&Candidate::new(&event, &connections(&["u2"]))));
    }

    #[test]
    fn test_visibility_connections_without_organizer_fails_closed() {
        let pred = VisibilityPredicate::new(&Choice::Only(Visibility::Connections));
        let event = Event::new("b", "B", "sports").with_visibility(Visibility::Connections);
        assert!(!pred.check(&Candidate::new(&event, &connections(&["u1"]))));
    }

    #[test]
    fn test_visibility_mismatch() {
        let pred = VisibilityPredicate::new(&Choice::Only(Visibility::Public));
        let event = Event::new("c", "C", "art").with_visibility(Visibility::Private);
        assert!(!pred.check(&Candidate::new(&event, &Connections::default())));
    }

    #[test]
    fn test_category_selection_and_single_filter() {
        let music = Event::new("a", "A", "music");
        let sports = Event::new("b", "B", "sports");

        let chips = CategoryPredicate::new(&CategorySelection::all().select("music"), &Choice::All);
        assert!(chips.check(&music));
        assert!(!chips.check(&sports));

        let single = CategoryPredicate::new(&CategorySelection::all(), &Choice::Only("sports".into()));
        assert!(!single.check(&music));
        assert!(single.check(&sports));
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let event = Event::new("a", "Sunset Jazz", "music")
            .with_description("Bring a blanket")
            .with_location(Location::new("Riverside Park", None));

        assert!(SearchPredicate::new("jazz").check(&event));
        assert!(SearchPredicate::new("BLANKET").check(&event));
        assert!(SearchPredicate::new("Music").check(&event));
        assert!(SearchPredicate::new("riverside").check(&event));
        assert!(!SearchPredicate::new("techno").check(&event));
    }

    #[test]
    fn test_search_empty_or_blank_is_identity() {
        let event = Event::new("a", "A", "music");
        assert!(SearchPredicate::new("").check(&event));
        assert!(SearchPredicate::new("   ").check(&event));
    }

    #[test]
    fn test_distance_threshold_inclusive() {
        let pred = DistancePredicate::new(Radius::Km(10.0));
        assert!(pred.check(&Event::new("a", "A", "m").with_distance_km(10.0)));
        assert!(!pred.check(&Event::new("b", "B", "m").with_distance_km(10.01)));
    }

    #[test]
    fn test_distance_missing_fails_closed() {
        let pred = DistancePredicate::new(Radius::Km(10.0));
        assert!(!pred.check(&Event::new("a", "A", "m")));
        assert!(DistancePredicate::new(Radius::Unbounded).check(&Event::new("a", "A", "m")));
    }

    #[test]
    fn test_invalid_radius_excludes_everything() {
        let pred = DistancePredicate::new(Radius::Invalid);
        assert!(!pred.check(&Event::new("a", "A", "m").with_distance_km(0.1)));
    }

    #[test]
    fn test_radius_from_filters() {
        let filters = DiscoverFilters::default();
        assert_eq!(Radius::from_filters(&filters), Radius::Unbounded);
        let filters = filters.with_field(FilterField::Distance, "radius").unwrap();
        assert_eq!(Radius::from_filters(&filters), Radius::Km(500.0));
        let broken = DiscoverFilters {
            radius: "far".to_string(),
            ..filters
        };
        assert_eq!(Radius::from_filters(&broken), Radius::Invalid);
    }

    #[test]
    fn test_availability() {
        let open = Event::new("a", "A", "m").with_attendance(2, Some(5));
        let full = Event::new("b", "B", "m").with_attendance(5, Some(5));
        let unlimited = Event::new("c", "C", "m").with_attendance(5, None);

        let want_open = AvailabilityPredicate(Availability::Open);
        assert!(want_open.check(&open));
        assert!(!want_open.check(&full));
        assert!(want_open.check(&unlimited));

        let want_full = AvailabilityPredicate(Availability::Full);
        assert!(!want_full.check(&open));
        assert!(want_full.check(&full));
        assert!(!want_full.check(&unlimited));
    }

    #[test]
    fn test_participants_uses_injected_buckets() {
        let buckets = ParticipantBuckets::new(vec![
            ParticipantBucket::new("small", 1, Some(10)),
            ParticipantBucket::new("large", 11, None),
        ])
        .unwrap();
        let small = ParticipantsPredicate::new(&Choice::Only("small".into()), &buckets);
        assert!(small.check(&Event::new("a", "A", "m").with_attendance(4, Some(8))));
        assert!(!small.check(&Event::new("b", "B", "m").with_attendance(4, Some(80))));

        let unknown = ParticipantsPredicate::new(&Choice::Only("medium".into()), &buckets);
        assert_eq!(unknown, ParticipantsPredicate::Unknown("medium".into()));
        assert!(!unknown.check(&Event::new("c", "C", "m").with_attendance(4, None)));
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let from = NaiveDate::from_ymd_opt(2026, 11, 1);
        let to = NaiveDate::from_ymd_opt(2026, 11, 30);
        let pred = DateRangePredicate::new(from, to);

        assert!(pred.check(&on(2026, 11, 1)));
        assert!(pred.check(&on(2026, 11, 30)));
        assert!(!pred.check(&on(2026, 10, 31)));
        assert!(!pred.check(&on(2026, 12, 1)));
    }

    #[test]
    fn test_date_range_half_open() {
        let pred = DateRangePredicate::new(NaiveDate::from_ymd_opt(2026, 11, 1), None);
        assert!(pred.check(&on(2030, 1, 1)));
        assert!(!pred.check(&on(2026, 10, 31)));
    }

    #[test]
    fn test_date_range_missing_schedule_fails_closed() {
        let pred = DateRangePredicate::new(None, NaiveDate::from_ymd_opt(2026, 11, 30));
        assert!(!pred.check(&Event::new("a", "A", "m")));
        assert!(DateRangePredicate::new(None, None).check(&Event::new("a", "A", "m")));
    }

    #[test]
    fn test_rejections_lists_failing_dimensions() {
        let filters = DiscoverFilters::default()
            .with_field(FilterField::Distance, "radius")
            .unwrap()
            .with_field(FilterField::Radius, "10")
            .unwrap();
        let predicates = EventPredicates::new(
            "",
            &CategorySelection::all().select("music"),
            &filters,
            &ParticipantBuckets::default(),
        );
        let conns = Connections::default();
        let far_sports = Event::new("b", "B", "sports").with_distance_km(20.0);

        assert_eq!(
            predicates.rejections(&Candidate::new(&far_sports, &conns)),
            vec![Dimension::Category, Dimension::Distance]
        );
        assert!(!predicates.check(&Candidate::new(&far_sports, &conns)));
    }
}
