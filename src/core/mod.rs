pub mod errors;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use errors::{DiscoveryError, Result};

/// Sentinel used wherever a selection means "no restriction".
pub const ALL: &str = "all";

/// Audience an event is published to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    /// Only visible to people connected with the organizer.
    Connections,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Connections => "connections",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "connections" | "connections-only" | "connections_only" => {
                Ok(Visibility::Connections)
            }
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility '{}'", other)),
        }
    }
}

/// Where an event takes place, relative to the viewer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    /// Distance from the viewer in kilometers, when it could be computed.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl Location {
    pub fn new(name: impl Into<String>, distance_km: Option<f64>) -> Self {
        Self {
            name: Some(name.into()),
            distance_km,
        }
    }
}

/// An event as supplied by the data loader.
///
/// Only the fields the filtering engine reads are modelled; everything else
/// the loader knows about an event is opaque to this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub attendees: u32,
    /// `None` means unlimited capacity.
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub organizer_id: Option<String>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

impl Event {
    /// Create a public event with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: category.into(),
            visibility: Visibility::Public,
            location: None,
            attendees: 0,
            max_attendees: None,
            scheduled_at: None,
            organizer_id: None,
            participant_ids: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_distance_km(mut self, km: f64) -> Self {
        let mut location = self.location.take().unwrap_or_default();
        location.distance_km = Some(km);
        self.location = Some(location);
        self
    }

    pub fn with_attendance(mut self, attendees: u32, max_attendees: Option<u32>) -> Self {
        self.attendees = attendees;
        self.max_attendees = max_attendees;
        self
    }

    pub fn with_schedule(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    pub fn with_organizer(mut self, organizer_id: impl Into<String>) -> Self {
        self.organizer_id = Some(organizer_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Distance from the viewer, if the location carries one.
    pub fn distance_km(&self) -> Option<f64> {
        self.location.as_ref().and_then(|l| l.distance_km)
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.name.as_deref())
    }

    /// Calendar day the event is scheduled on (UTC).
    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.scheduled_at.map(|at| at.date_naive())
    }

    /// Whether the event still has room. Unlimited capacity is always open.
    pub fn is_open(&self) -> bool {
        self.max_attendees.is_none_or(|max| self.attendees < max)
    }

    /// Whether the event reached capacity. Unlimited capacity is never full.
    pub fn is_full(&self) -> bool {
        self.max_attendees.is_some_and(|max| self.attendees >= max)
    }
}

/// A selection that is either unrestricted (`all`) or one concrete value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: FromStr> Choice<T> {
    /// Parse `all` (case-insensitive) as [`Choice::All`], anything else as a value.
    pub fn parse(s: &str) -> std::result::Result<Self, T::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Choice::All)
        } else {
            trimmed.parse().map(Choice::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Choice<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Choice<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Choice::parse(&raw).map_err(serde::de::Error::custom)
    }
}
