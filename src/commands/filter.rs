//! `event-discovery filter`: load a feed, apply the flags through a
//! [`DiscoverSession`], print the result.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

use crate::cli::FilterArgs;
use crate::config::{load_config, load_config_from, DiscoveryConfig, OutputFormat};
use crate::filters::{Candidate, CategorySelection, Connections, EventPredicates, FilterField};
use crate::formatting::{ColoredFormatter, FormattingConfig};
use crate::io::{read_feed, EventFeed, FilterReport, JsonWriter, OutputWriter, TerminalWriter};
use crate::state::DiscoverSession;

pub fn handle_filter(args: FilterArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };

    let feed = read_feed(&args.feed)
        .with_context(|| format!("Failed to load feed {}", args.feed.display()))?;
    info!("Loaded {} events from {}", feed.events.len(), args.feed.display());

    let session = build_session(&args, feed, &config)?;
    let format = args.format.unwrap_or_else(|| config.default_format());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = FilterReport {
        state: session.state(),
        total: session.events().len(),
        events: session.filtered_events(),
    };

    match format {
        OutputFormat::Json => JsonWriter::new(&mut out).write_report(&report)?,
        OutputFormat::Terminal => {
            let formatting = if args.plain {
                FormattingConfig::plain()
            } else {
                FormattingConfig::from_env(config.color_mode())
            };
            TerminalWriter::new(&mut out, ColoredFormatter::new(formatting)).write_report(&report)?;
            if args.explain {
                write_exclusions(&mut out, &session)?;
            }
        }
    }
    Ok(())
}

/// Turn the feed and flags into a session, one transition per flag.
pub fn build_session(args: &FilterArgs, feed: EventFeed, config: &DiscoveryConfig) -> Result<DiscoverSession> {
    let mut connections = feed.connections;
    for extra in &args.connections {
        if !connections.contains(extra) {
            connections.push(extra.clone());
        }
    }

    let mut session =
        DiscoverSession::with_buckets(feed.events, connections, config.participants.clone());

    session.set_selected_categories(CategorySelection::from_iter(&args.categories));
    if let Some(query) = &args.query {
        session.set_search_query(query.as_str());
    }

    let mut changes: Vec<(FilterField, &str)> = Vec::new();
    if let Some(visibility) = &args.visibility {
        changes.push((FilterField::Visibility, visibility.as_str()));
    }
    if let Some(radius) = &args.radius {
        changes.push((FilterField::Distance, "radius"));
        changes.push((FilterField::Radius, radius.as_str()));
    }
    if let Some(availability) = &args.availability {
        changes.push((FilterField::Availability, availability.as_str()));
    }
    if let Some(participants) = &args.participants {
        changes.push((FilterField::Participants, participants.as_str()));
    }
    if let Some(from) = &args.date_from {
        changes.push((FilterField::DateFrom, from.as_str()));
    }
    if let Some(to) = &args.date_to {
        changes.push((FilterField::DateTo, to.as_str()));
    }

    for (field, value) in changes {
        session
            .handle_filter_change(field, value)
            .with_context(|| format!("Invalid --{} value", flag_name(field)))?;
    }

    debug!(
        matched = session.filtered_events().len(),
        recomputations = session.recompute_count(),
        "Applied command-line filters"
    );
    Ok(session)
}

fn flag_name(field: FilterField) -> &'static str {
    match field {
        FilterField::Visibility => "visibility",
        FilterField::Category => "category",
        FilterField::Distance | FilterField::Radius => "radius",
        FilterField::Availability => "availability",
        FilterField::Participants => "participants",
        FilterField::DateFrom => "date-from",
        FilterField::DateTo => "date-to",
    }
}

fn write_exclusions<W: Write>(out: &mut W, session: &DiscoverSession) -> Result<()> {
    let state = session.state();
    let predicates = EventPredicates::new(
        &state.search_query,
        &state.selected_categories,
        &state.selected_filters,
        session.buckets(),
    );
    let connections: Connections = session.user_connections().iter().collect();

    for event in session.events() {
        let rejected = predicates.rejections(&Candidate::new(event, &connections));
        if rejected.is_empty() {
            continue;
        }
        let reasons: Vec<String> = rejected.iter().map(ToString::to_string).collect();
        writeln!(out, "excluded {} ({}): {}", event.id, event.title, reasons.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, Visibility};
    use crate::filters::{ParticipantBucket, ParticipantBuckets};
    use std::path::PathBuf;

    fn feed() -> EventFeed {
        EventFeed {
            events: vec![
                Event::new("a", "Jazz Night", "music")
                    .with_distance_km(2.0)
                    .with_attendance(4, Some(8)),
                Event::new("b", "Pickup Football", "sports")
                    .with_distance_km(20.0)
                    .with_visibility(Visibility::Connections)
                    .with_organizer("u9"),
                Event::new("c", "Choir", "music")
                    .with_distance_km(5.0)
                    .with_attendance(60, None),
            ],
            connections: vec!["u1".to_string()],
        }
    }

    fn args() -> FilterArgs {
        FilterArgs {
            feed: PathBuf::from("unused.json"),
            ..FilterArgs::default()
        }
    }

    fn ids(session: &DiscoverSession) -> Vec<&str> {
        session.filtered_events().iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_no_flags_keeps_everything() {
        let session = build_session(&args(), feed(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_radius_flag_switches_distance_on() {
        let args = FilterArgs {
            radius: Some("10".to_string()),
            ..args()
        };
        let session = build_session(&args, feed(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(ids(&session), vec!["a", "c"]);
    }

    #[test]
    fn test_extra_connection_admits_connection_event() {
        let args = FilterArgs {
            visibility: Some("connections".to_string()),
            connections: vec!["u9".to_string()],
            ..args()
        };
        let session = build_session(&args, feed(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(ids(&session), vec!["b"]);
        assert_eq!(session.user_connections().len(), 2);
    }

    fn with_categories(categories: &[&str]) -> FilterArgs {
        FilterArgs {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            ..args()
        }
    }

    #[test]
    fn test_repeated_category_flag_stays_selected() {
        let session =
            build_session(&with_categories(&["music", "music"]), feed(), &DiscoveryConfig::default())
                .unwrap();
        assert_eq!(session.selected_categories().as_slice(), ["music".to_string()]);
        assert_eq!(ids(&session), vec!["a", "c"]);
    }

    #[test]
    fn test_category_flag_all_ignores_case() {
        let session =
            build_session(&with_categories(&["ALL"]), feed(), &DiscoveryConfig::default()).unwrap();
        assert!(session.selected_categories().is_all());
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_category_flag_is_ignored() {
        let session =
            build_session(&with_categories(&[""]), feed(), &DiscoveryConfig::default()).unwrap();
        assert!(session.selected_categories().is_all());
        assert_eq!(ids(&session), vec!["a", "b", "c"]);

        let session =
            build_session(&with_categories(&["", "sports"]), feed(), &DiscoveryConfig::default())
                .unwrap();
        assert_eq!(ids(&session), vec!["b"]);
    }

    #[test]
    fn test_participants_uses_config_buckets() {
        let config = DiscoveryConfig {
            participants: ParticipantBuckets::new(vec![ParticipantBucket::new("small", 1, Some(10))])
                .unwrap(),
            ..DiscoveryConfig::default()
        };
        let args = FilterArgs {
            participants: Some("small".to_string()),
            ..args()
        };
        let session = build_session(&args, feed(), &config).unwrap();
        assert_eq!(ids(&session), vec!["a"]);
    }

    #[test]
    fn test_bad_flag_value_is_error() {
        let args = FilterArgs {
            date_from: Some("soon".to_string()),
            ..args()
        };
        let err = build_session(&args, feed(), &DiscoveryConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--date-from"));
    }

    #[test]
    fn test_explain_lists_rejections() {
        let args = FilterArgs {
            categories: vec!["music".to_string()],
            radius: Some("3".to_string()),
            ..args()
        };
        let session = build_session(&args, feed(), &DiscoveryConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_exclusions(&mut buf, &session).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("excluded b (Pickup Football): category, distance"));
        assert!(out.contains("excluded c (Choir): distance"));
        assert!(!out.contains("excluded a"));
    }
}
