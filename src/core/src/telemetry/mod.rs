//! Telemetry: structured logging for the console tooling.
//!
//! The authorization checks themselves are silent; logging is initialised by
//! the binaries and used by the session loader and [`explain`](crate::rbac::explain).

pub mod logging;

pub use logging::{build_filter, filter_directive, init_logging, LogFormat, LoggingConfig};
