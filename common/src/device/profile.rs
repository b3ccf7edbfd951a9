use std::collections::BTreeMap;
use std::fmt;

use super::NOT_AVAILABLE;

/// Prefix of the map key used for a profile that no interface inherits.
pub const UNUSED_KEY_PREFIX: &str = "unused:";

/// Interface name (or `unused:<profile>`) to profile details.
pub type ProfileMap = BTreeMap<String, ProfileInfo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileState {
    Applied,
    Unused,
}

impl ProfileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileState::Applied => "applied",
            ProfileState::Unused => "unused",
        }
    }
}

impl fmt::Display for ProfileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub profile: String,
    pub vlan: String,
    pub description: String,
    pub state: ProfileState,
}

impl ProfileInfo {
    pub fn applied(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            vlan: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            state: ProfileState::Applied,
        }
    }

    pub fn unused(profile: impl Into<String>) -> Self {
        Self {
            state: ProfileState::Unused,
            ..Self::applied(profile)
        }
    }

    /// Empty or missing values keep the `N/A` placeholder.
    pub fn with_vlan(mut self, vlan: Option<&str>) -> Self {
        if let Some(vlan) = vlan.map(str::trim).filter(|v| !v.is_empty()) {
            self.vlan = vlan.to_string();
        }
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        if let Some(desc) = description.map(str::trim).filter(|d| !d.is_empty()) {
            self.description = desc.to_string();
        }
        self
    }

    pub fn is_applied(&self) -> bool {
        self.state == ProfileState::Applied
    }
}

pub fn unused_key(profile: &str) -> String {
    format!("{UNUSED_KEY_PREFIX}{profile}")
}

/// True for keys that do not name a real interface.
pub fn is_synthetic_key(key: &str) -> bool {
    key.starts_with(UNUSED_KEY_PREFIX)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
