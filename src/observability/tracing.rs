//! Logging setup for the binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. Output goes to stderr so JSON on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Default directive for a `-v` count. `RUST_LOG` takes precedence.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,event_discovery=debug",
        _ => "debug,event_discovery=trace",
    }
}

/// Install the global fmt subscriber. Calling it twice is harmless.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
