//! File and terminal edges: reading event feeds, writing results.

pub mod feed;
pub mod output;

pub use feed::{parse_feed, read_feed, EventFeed};
pub use output::{render_table, FilterReport, JsonWriter, OutputWriter, TerminalWriter};
