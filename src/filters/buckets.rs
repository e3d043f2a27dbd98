//! Participant-count buckets ("small group", "large group", ...).
//!
//! Bucket boundaries are configuration, not code: the engine ships with no
//! built-in thresholds and a bucket name it does not know matches nothing.

use crate::core::{DiscoveryError, Event, Result};
use serde::{Deserialize, Serialize};

/// A named, inclusive range of group sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantBucket {
    pub name: String,
    #[serde(default)]
    pub min: u32,
    /// `None` leaves the range open-ended.
    #[serde(default)]
    pub max: Option<u32>,
}

impl ParticipantBucket {
    pub fn new(name: impl Into<String>, min: u32, max: Option<u32>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, size: u32) -> bool {
        size >= self.min && self.max.is_none_or(|max| size <= max)
    }
}

/// Group size an event is bucketed by: its capacity when one is set,
/// otherwise how many people have joined.
pub fn group_size(event: &Event) -> u32 {
    event.max_attendees.unwrap_or(event.attendees)
}

/// The configured bucket set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantBuckets {
    #[serde(default)]
    pub buckets: Vec<ParticipantBucket>,
}

impl ParticipantBuckets {
    /// Build a bucket set, rejecting inverted ranges and duplicate names.
    pub fn new(buckets: Vec<ParticipantBucket>) -> Result<Self> {
        let set = Self { buckets };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, bucket) in self.buckets.iter().enumerate() {
            if bucket.name.trim().is_empty() {
                return Err(DiscoveryError::configuration(
                    "participant bucket names must not be empty",
                ));
            }
            if let Some(max) = bucket.max {
                if bucket.min > max {
                    return Err(DiscoveryError::configuration(format!(
                        "participant bucket '{}' has min {} > max {}",
                        bucket.name, bucket.min, max
                    )));
                }
            }
            if self.buckets[..i].iter().any(|b| b.name == bucket.name) {
                return Err(DiscoveryError::configuration(format!(
                    "duplicate participant bucket '{}'",
                    bucket.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParticipantBucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantBucket> {
        self.buckets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParticipantBuckets {
        ParticipantBuckets::new(vec![
            ParticipantBucket::new("small", 1, Some(10)),
            ParticipantBucket::new("large", 11, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let small = ParticipantBucket::new("small", 1, Some(10));
        assert!(small.contains(1));
        assert!(small.contains(10));
        assert!(!small.contains(0));
        assert!(!small.contains(11));
    }

    #[test]
    fn test_open_ended_bucket() {
        let buckets = sample();
        let large = buckets.get("large").unwrap();
        assert!(large.contains(11));
        assert!(large.contains(u32::MAX));
    }

    #[test]
    fn test_group_size_prefers_capacity() {
        let capped = Event::new("a", "A", "music").with_attendance(3, Some(40));
        assert_eq!(group_size(&capped), 40);
        let uncapped = Event::new("b", "B", "music").with_attendance(3, None);
        assert_eq!(group_size(&uncapped), 3);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = ParticipantBuckets::new(vec![ParticipantBucket::new("odd", 10, Some(2))])
            .unwrap_err();
        assert!(err.to_string().contains("min 10 > max 2"));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = ParticipantBuckets::new(vec![
            ParticipantBucket::new("small", 1, Some(5)),
            ParticipantBucket::new("small", 6, Some(9)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_unknown_name() {
        assert!(sample().get("medium").is_none());
    }
}
