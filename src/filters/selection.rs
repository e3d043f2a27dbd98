//! Filter selection state: what the user has picked on each dimension.
//!
//! Every value here is immutable from the outside. Changes go through
//! [`DiscoverFilters::with_field`] and the [`CategorySelection`] operations,
//! all of which return a new value and leave the original untouched.

use crate::core::{Choice, DiscoveryError, Result, Visibility, ALL};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Radius applied when the distance filter is switched on without a value.
pub const DEFAULT_RADIUS_KM: &str = "500";

/// Whether the distance dimension is constrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    #[default]
    All,
    /// Only events within `radius` kilometers.
    Radius,
}

impl FromStr for DistanceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ALL => Ok(DistanceMode::All),
            "radius" | "nearby" => Ok(DistanceMode::Radius),
            other => Err(format!("expected 'all' or 'radius', got '{}'", other)),
        }
    }
}

impl fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMode::All => f.write_str(ALL),
            DistanceMode::Radius => f.write_str("radius"),
        }
    }
}

/// Attendance fill state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    All,
    /// Attendees below capacity, or no capacity set.
    Open,
    /// Attendees at or above a set capacity.
    Full,
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ALL => Ok(Availability::All),
            "open" | "available" => Ok(Availability::Open),
            "full" => Ok(Availability::Full),
            other => Err(format!("expected 'all', 'open' or 'full', got '{}'", other)),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::All => f.write_str(ALL),
            Availability::Open => f.write_str("open"),
            Availability::Full => f.write_str("full"),
        }
    }
}

/// The recognised fields of [`DiscoverFilters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Visibility,
    Category,
    Distance,
    Radius,
    Availability,
    Participants,
    DateFrom,
    DateTo,
}

impl FilterField {
    pub fn all() -> &'static [FilterField] {
        &[
            FilterField::Visibility,
            FilterField::Category,
            FilterField::Distance,
            FilterField::Radius,
            FilterField::Availability,
            FilterField::Participants,
            FilterField::DateFrom,
            FilterField::DateTo,
        ]
    }

    /// Name used on the wire and in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Visibility => "visibility",
            FilterField::Category => "category",
            FilterField::Distance => "distance",
            FilterField::Radius => "radius",
            FilterField::Availability => "availability",
            FilterField::Participants => "participants",
            FilterField::DateFrom => "dateFrom",
            FilterField::DateTo => "dateTo",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterField {
    type Err = DiscoveryError;

    /// Accepts the camelCase wire names and their snake_case spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('_', "").to_lowercase();
        FilterField::all()
            .iter()
            .copied()
            .find(|field| field.name().to_lowercase() == normalized)
            .ok_or_else(|| DiscoveryError::UnknownField(s.to_string()))
    }
}

/// The structured filter selection.
///
/// `Default` is the identity filter: nothing is excluded. `radius` only takes
/// effect once `distance` is switched to [`DistanceMode::Radius`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoverFilters {
    pub visibility: Choice<Visibility>,
    pub category: Choice<String>,
    pub distance: DistanceMode,
    /// Kilometers, kept in the string form the user typed.
    pub radius: String,
    pub availability: Availability,
    /// Name of a configured participant bucket.
    pub participants: Choice<String>,
    #[serde(with = "optional_date")]
    pub date_from: Option<NaiveDate>,
    #[serde(with = "optional_date")]
    pub date_to: Option<NaiveDate>,
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self {
            visibility: Choice::All,
            category: Choice::All,
            distance: DistanceMode::All,
            radius: DEFAULT_RADIUS_KM.to_string(),
            availability: Availability::All,
            participants: Choice::All,
            date_from: None,
            date_to: None,
        }
    }
}

impl DiscoverFilters {
    /// Return a copy with exactly one field replaced.
    ///
    /// The value is parsed for the field; on failure the error names the
    /// field and nothing is returned, so no partially updated value exists.
    pub fn with_field(&self, field: FilterField, value: &str) -> Result<Self> {
        let invalid = |reason: String| DiscoveryError::invalid_value(field.name(), value, reason);
        let mut next = self.clone();

        match field {
            FilterField::Visibility => {
                next.visibility = Choice::parse(value).map_err(invalid)?;
            }
            FilterField::Category => {
                next.category = parse_named_choice(value).map_err(invalid)?;
            }
            FilterField::Distance => {
                next.distance = value.parse().map_err(invalid)?;
            }
            FilterField::Radius => {
                parse_radius(value).ok_or_else(|| {
                    invalid("expected a non-negative number of kilometers".to_string())
                })?;
                next.radius = value.trim().to_string();
            }
            FilterField::Availability => {
                next.availability = value.parse().map_err(invalid)?;
            }
            FilterField::Participants => {
                next.participants = parse_named_choice(value).map_err(invalid)?;
            }
            FilterField::DateFrom => {
                next.date_from = parse_optional_date(value).map_err(invalid)?;
            }
            FilterField::DateTo => {
                next.date_to = parse_optional_date(value).map_err(invalid)?;
            }
        }

        Ok(next)
    }

    /// Current value of a field in its string form.
    pub fn field_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Visibility => self.visibility.to_string(),
            FilterField::Category => self.category.to_string(),
            FilterField::Distance => self.distance.to_string(),
            FilterField::Radius => self.radius.clone(),
            FilterField::Availability => self.availability.to_string(),
            FilterField::Participants => self.participants.to_string(),
            FilterField::DateFrom => format_optional_date(self.date_from),
            FilterField::DateTo => format_optional_date(self.date_to),
        }
    }

    /// Effective radius threshold, or `None` when distance is unconstrained.
    ///
    /// `Some(None)` means a radius is active but unusable; the distance
    /// predicate fails closed on it.
    pub fn radius_km(&self) -> Option<Option<f64>> {
        match self.distance {
            DistanceMode::All => None,
            DistanceMode::Radius => Some(parse_radius(&self.radius)),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.visibility.is_all()
            && self.category.is_all()
            && self.distance == DistanceMode::All
            && self.availability == Availability::All
            && self.participants.is_all()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Number of dimensions currently constraining results.
    pub fn active_count(&self) -> usize {
        [
            !self.visibility.is_all(),
            !self.category.is_all(),
            self.distance != DistanceMode::All,
            self.availability != Availability::All,
            !self.participants.is_all(),
            self.date_from.is_some() || self.date_to.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

fn parse_named_choice(value: &str) -> std::result::Result<Choice<String>, String> {
    if value.trim().is_empty() {
        return Err("expected 'all' or a name".to_string());
    }
    Ok(Choice::parse(value).unwrap_or(Choice::All))
}

/// Pure function: radius text to kilometers.
pub fn parse_radius(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|km| km.is_finite() && *km >= 0.0)
}

fn parse_optional_date(value: &str) -> std::result::Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("expected YYYY-MM-DD ({})", e))
}

fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Serde adapter: empty string <-> `None`, ISO date <-> `Some`.
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_optional_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_optional_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Multi-select category chips.
///
/// Invariant: never empty, no duplicates, and the `all` sentinel only ever
/// appears as the sole entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategorySelection(Vec<String>);

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all()
    }
}

impl CategorySelection {
    /// The unrestricted selection, `["all"]`.
    pub fn all() -> Self {
        Self(vec![ALL.to_string()])
    }

    pub fn is_all(&self) -> bool {
        self.0.len() == 1 && self.0[0] == ALL
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|c| c == category)
    }

    /// Whether an event of this category passes the selection.
    pub fn allows(&self, category: &str) -> bool {
        self.is_all() || self.contains(category)
    }

    /// Select a chip. Selecting `all` clears everything else; selecting a
    /// concrete category drops `all`. Already-selected categories are kept.
    /// Names are trimmed, `all` matches ignoring case, and blank names are
    /// ignored.
    pub fn select(&self, category: &str) -> Self {
        let category = category.trim();
        if category.is_empty() {
            return self.clone();
        }
        if is_all_name(category) {
            return Self::all();
        }
        if self.is_all() {
            return Self(vec![category.to_string()]);
        }
        if self.contains(category) {
            return self.clone();
        }
        let mut next = self.0.clone();
        next.push(category.to_string());
        Self(next)
    }

    /// Tap a chip: selects it, or deselects it when already selected.
    /// Deselecting the last concrete category falls back to `all`.
    pub fn toggle(&self, category: &str) -> Self {
        let category = category.trim();
        if is_all_name(category) || !self.contains(category) {
            return self.select(category);
        }
        let remaining: Vec<String> = self.0.iter().filter(|c| *c != category).cloned().collect();
        if remaining.is_empty() {
            Self::all()
        } else {
            Self(remaining)
        }
    }
}

fn is_all_name(category: &str) -> bool {
    category.eq_ignore_ascii_case(ALL)
}

impl<S: Into<String>> FromIterator<S> for CategorySelection {
    /// Normalises arbitrary input into a valid selection.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selected: Vec<String> = Vec::new();
        for category in iter.into_iter().map(Into::into) {
            let category = category.trim().to_string();
            if category.is_empty() {
                continue;
            }
            if is_all_name(&category) {
                return Self::all();
            }
            if !selected.contains(&category) {
                selected.push(category);
            }
        }
        if selected.is_empty() {
            Self::all()
        } else {
            Self(selected)
        }
    }
}

impl<'de> Deserialize<'de> for CategorySelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
