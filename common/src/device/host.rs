use std::fmt;

use super::profile::ProfileMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostStatus {
    Success,
    Failed,
}

impl HostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostStatus::Success => "Success",
            HostStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of collecting port profiles from a single switch.
///
/// A successful result always carries a map (possibly empty) and no error; a
/// failed one carries an error message and no map.
#[derive(Debug, Clone, PartialEq)]
pub struct HostResult {
    /// Inventory name, e.g. `sw1_example_com`.
    pub host: String,
    /// Address the session was opened against.
    pub hostname: String,
    pub status: HostStatus,
    pub error: Option<String>,
    pub port_profiles: Option<ProfileMap>,
}

impl HostResult {
    pub fn success(
        host: impl Into<String>,
        hostname: impl Into<String>,
        port_profiles: ProfileMap,
    ) -> Self {
        Self {
            host: host.into(),
            hostname: hostname.into(),
            status: HostStatus::Success,
            error: None,
            port_profiles: Some(port_profiles),
        }
    }

    pub fn failed(
        host: impl Into<String>,
        hostname: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let error: String = error.into();
        Self {
            host: host.into(),
            hostname: hostname.into(),
            status: HostStatus::Failed,
            error: Some(if error.is_empty() { "Unknown error".to_string() } else { error }),
            port_profiles: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == HostStatus::Success
    }
}
