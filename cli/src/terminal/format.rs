use std::collections::BTreeMap;

use colored::*;

use nxprof_common::device::host::{HostResult, HostStatus};
use nxprof_common::device::profile::{ProfileState, is_synthetic_key};

use crate::terminal::colors;

/// Key/value lines shown under a host in the result tree.
pub fn host_details(result: &HostResult, detailed: bool) -> Vec<(String, ColoredString)> {
    let mut details: Vec<(String, ColoredString)> = Vec::new();

    let status = match result.status {
        HostStatus::Success => result.status.as_str().color(colors::SUCCESS),
        HostStatus::Failed => result.status.as_str().color(colors::FAILURE),
    };
    details.push(("Status".to_string(), status));

    if result.hostname != result.host {
        details.push((
            "Address".to_string(),
            result.hostname.color(colors::TEXT_DEFAULT),
        ));
    }

    if let Some(err) = &result.error {
        details.push(("Error".to_string(), err.color(colors::FAILURE)));
    }

    let Some(profiles) = &result.port_profiles else {
        return details;
    };

    let mut applied: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut unused: Vec<&str> = Vec::new();
    for (key, info) in profiles {
        match info.state {
            ProfileState::Applied if !is_synthetic_key(key) => {
                applied.entry(info.profile.as_str()).or_default().push(key.as_str());
            }
            _ => unused.push(info.profile.as_str()),
        }
    }

    details.push((
        "Applied".to_string(),
        applied.len().to_string().color(colors::ACCENT),
    ));
    details.push((
        "Unused".to_string(),
        unused.len().to_string().color(colors::UNUSED),
    ));

    if detailed {
        for (profile, interfaces) in &applied {
            details.push((
                profile.to_string(),
                interfaces.join(", ").color(colors::TEXT_DEFAULT),
            ));
        }
    }

    if !unused.is_empty() {
        details.push((
            "Not applied".to_string(),
            unused.join(", ").color(colors::UNUSED),
        ));
    }

    details
}
