use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "event-discovery")]
#[command(about = "Filter and search event feeds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter an event feed and print the matching events
    Filter(FilterArgs),

    /// Write a sample .discovery.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// JSON feed: `{ "events": [...], "connections": [...] }` or a bare array
    pub feed: PathBuf,

    /// Free-text search over title, description, category and location
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category chip to select (repeatable); `all` clears the selection
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// all, public, connections or private
    #[arg(long)]
    pub visibility: Option<String>,

    /// Only events within this many kilometers
    #[arg(long)]
    pub radius: Option<String>,

    /// all, open or full
    #[arg(long)]
    pub availability: Option<String>,

    /// Participant bucket name from the configuration
    #[arg(long)]
    pub participants: Option<String>,

    /// Earliest event date, YYYY-MM-DD (inclusive)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Latest event date, YYYY-MM-DD (inclusive)
    #[arg(long)]
    pub date_to: Option<String>,

    /// Extra connection id (repeatable), added to the feed's connections
    #[arg(long = "connection")]
    pub connections: Vec<String>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to the nearest .discovery.toml)
    #[arg(long, env = "EVENT_DISCOVERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub plain: bool,

    /// List excluded events with the filters that rejected them
    #[arg(long)]
    pub explain: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_flags() {
        let cli = Cli::try_parse_from([
            "event-discovery",
            "-v",
            "filter",
            "feed.json",
            "--category",
            "music",
            "-c",
            "art",
            "--radius",
            "10",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Filter(args) => {
                assert_eq!(args.feed, PathBuf::from("feed.json"));
                assert_eq!(args.categories, vec!["music", "art"]);
                assert_eq!(args.radius.as_deref(), Some("10"));
                assert_eq!(args.format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["event-discovery", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
