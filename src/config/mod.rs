//! Configuration for the discovery engine and CLI.
//!
//! ```toml
//! [[participants.buckets]]
//! name = "small"
//! min = 1
//! max = 10
//!
//! [output]
//! default_format = "terminal"
//! color = "auto"
//! ```

mod core;
mod loader;

pub use self::core::{DiscoveryConfig, OutputConfig, OutputFormat};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Commented sample written by `event-discovery init`.
pub const SAMPLE_CONFIG: &str = r#"# Event discovery configuration

# Participant buckets selectable with `--participants <name>`.
# Bounds are inclusive; omit `max` for an open-ended bucket. An event is
# bucketed by its capacity, or by its attendee count when it has none.
[[participants.buckets]]
name = "small"
min = 1
max = 10

[[participants.buckets]]
name = "medium"
min = 11
max = 50

[[participants.buckets]]
name = "large"
min = 51

[output]
default_format = "terminal"
color = "auto"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_is_valid() {
        let config = parse_and_validate_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.participants.buckets.len(), 3);
        assert_eq!(config.default_format(), OutputFormat::Terminal);
    }
}
