//! Observability infrastructure: structured logging via `tracing`.
//!
//! ```ignore
//! use event_discovery::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(0);
//!     // ... rest of application
//! }
//! ```

pub mod tracing;

pub use self::tracing::init_tracing;
