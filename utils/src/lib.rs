//! Shared utilities for the Helix protocol.

pub mod logging;
pub mod time;

pub use logging::{init_test_logging, init_tracing};
pub use time::format_duration;
