//! Merges both `show` outputs of one switch into a [`ProfileMap`].
//!
//! Usage output says which interfaces inherit which profile; definitions carry
//! the VLAN, the description and sometimes their own list of assigned
//! interfaces. A profile nobody inherits still gets one `unused:<name>` entry so
//! it shows up in the report.

use std::collections::{HashMap, HashSet};

use nxprof_common::device::profile::{ProfileInfo, ProfileMap, unused_key};
use nxprof_common::warn;
use nxprof_protocols::{ProfileDefinition, ProfileUsage};

pub fn reconcile(usage: &[ProfileUsage], definitions: &[ProfileDefinition]) -> ProfileMap {
    let by_name: HashMap<&str, &ProfileDefinition> =
        definitions.iter().map(|d| (d.name.as_str(), d)).collect();

    let mut map = ProfileMap::new();
    let mut in_use: HashSet<&str> = HashSet::new();

    let usage_pairs = usage
        .iter()
        .flat_map(|u| u.interfaces.iter().map(move |i| (u.profile.as_str(), i)));
    let assigned_pairs = definitions
        .iter()
        .flat_map(|d| d.assigned.iter().map(move |i| (d.name.as_str(), i)));

    for (profile, interface) in usage_pairs.chain(assigned_pairs) {
        if let Some(existing) = map.get(interface) {
            if existing.profile != profile {
                warn!(
                    "{interface} listed under both {} and {profile}, keeping {}",
                    existing.profile, existing.profile
                );
            }
            continue;
        }
        map.insert(interface.clone(), describe(ProfileInfo::applied(profile), &by_name));
        in_use.insert(profile);
    }

    let known = usage
        .iter()
        .map(|u| u.profile.as_str())
        .chain(definitions.iter().map(|d| d.name.as_str()));
    for profile in known {
        if in_use.contains(profile) {
            continue;
        }
        map.entry(unused_key(profile))
            .or_insert_with(|| describe(ProfileInfo::unused(profile), &by_name));
    }

    map
}

fn describe(info: ProfileInfo, by_name: &HashMap<&str, &ProfileDefinition>) -> ProfileInfo {
    match by_name.get(info.profile.as_str()) {
        Some(def) => info
            .with_vlan(def.vlan().as_deref())
            .with_description(def.description.as_deref()),
        None => info,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
