//! CLI command implementations.
//!
//! Available commands:
//! - **filter**: Filter an event feed and print the matching events
//! - **init**: Initialize a new `.discovery.toml` configuration file

pub mod filter;
pub mod init;

pub use filter::{build_session, handle_filter};
pub use init::init_config;
