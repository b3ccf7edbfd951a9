//! # nxprof common
//!
//! Types shared by every crate of the workspace: the per-host result model,
//! the run configuration and the logging macros used for terminal output.

pub mod config;
pub mod device;
pub mod log;

pub use tracing;
