//! # Device Models
//!
//! * [`host::HostResult`]: outcome of collecting one switch.
//! * [`profile::ProfileInfo`]: what is known about a profile on one interface.
//! * [`credentials::Credentials`]: login shared by every host of a run.

pub mod credentials;
pub mod host;
pub mod profile;

/// Placeholder for any value the device did not report.
pub const NOT_AVAILABLE: &str = "N/A";
