//! Event feed files: the JSON snapshot a data loader hands to the engine.
//!
//! ```json
//! {
//!   "events": [ { "id": "a", "title": "Jazz Night", "category": "music", "visibility": "public" } ],
//!   "connections": ["u1", "u2"]
//! }
//! ```
//!
//! A bare JSON array of events is accepted as a feed without connections.

use crate::core::{DiscoveryError, Event, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFeed {
    pub events: Vec<Event>,
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedShape {
    Full(EventFeed),
    Bare(Vec<Event>),
}

/// Pure function: parse feed JSON.
pub fn parse_feed(contents: &str) -> Result<EventFeed> {
    let shape: FeedShape = serde_json::from_str(contents)?;
    Ok(match shape {
        FeedShape::Full(feed) => feed,
        FeedShape::Bare(events) => EventFeed {
            events,
            connections: Vec::new(),
        },
    })
}

/// Read and parse a feed file.
pub fn read_feed(path: &Path) -> Result<EventFeed> {
    let contents = fs::read_to_string(path).map_err(|source| DiscoveryError::Feed {
        path: path.to_path_buf(),
        source,
    })?;
    let feed = parse_feed(&contents)?;
    debug!(
        events = feed.events.len(),
        connections = feed.connections.len(),
        "Read event feed {}",
        path.display()
    );
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_full_feed() {
        let feed = parse_feed(indoc! {r#"
            {
              "events": [
                { "id": "a", "title": "Jazz", "category": "music", "visibility": "public" }
              ],
              "connections": ["u1"]
            }
        "#})
        .unwrap();
        assert_eq!(feed.events.len(), 1);
        assert_eq!(feed.connections, vec!["u1".to_string()]);
    }

    #[test]
    fn test_parse_bare_array() {
        let feed = parse_feed(
            r#"[{ "id": "a", "title": "Jazz", "category": "music", "visibility": "private" }]"#,
        )
        .unwrap();
        assert_eq!(feed.events.len(), 1);
        assert!(feed.connections.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(parse_feed("{ not json").is_err());
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = read_feed(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
