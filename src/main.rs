use anyhow::Result;
use clap::Parser;
use event_discovery::cli::{Cli, Commands};
use event_discovery::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Filter(args) => event_discovery::commands::handle_filter(args),
        Commands::Init { force } => event_discovery::commands::init_config(force),
    }
}
