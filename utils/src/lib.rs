//! Shared utilities for the Agora governance engine.

pub mod logging;
pub mod time;

pub use logging::{try_init_logging, LogFormat, LoggingError};
pub use time::format_duration;
