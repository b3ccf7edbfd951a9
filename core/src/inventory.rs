//! # Inventory
//!
//! The hostname list is the only thing operators maintain. From it the tool
//! writes a three-file YAML inventory (`hosts.yaml`, `groups.yaml`,
//! `defaults.yaml`) and later loads it back, resolving each host's platform and
//! SSH port through host, group and default values in that order.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use nxprof_common::{debug, warn};

pub const HOSTS_FILE: &str = "hosts.yaml";
pub const GROUPS_FILE: &str = "groups.yaml";
pub const DEFAULTS_FILE: &str = "defaults.yaml";

pub const DEVICE_GROUP: &str = "nxos_devices";
pub const PLATFORM: &str = "nxos";
pub const SSH_PLATFORM: &str = "cisco_nxos";
const SSH_OPTIONS_KEY: &str = "ssh";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct HostEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
    #[serde(default)]
    groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ConnectionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct GroupEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default)]
    connection_options: BTreeMap<String, ConnectionOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

/// A switch with every inventory value resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Inventory key, e.g. `sw1_example_com`.
    pub name: String,
    pub hostname: String,
    pub platform: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub hosts: Vec<Host>,
}

/// Inventory key for a hostname. Dots are not allowed in keys.
pub fn host_key(hostname: &str) -> String {
    hostname.replace('.', "_")
}

/// Hostnames from a newline-delimited list.
///
/// Blank lines and `#` comments are dropped; a hostname whose key was already
/// seen is dropped with a warning.
pub fn parse_hostnames(content: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut hostnames: Vec<String> = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !seen.insert(host_key(line)) {
            warn!("Duplicate host '{line}' ignored");
            continue;
        }
        hostnames.push(line.to_string());
    }
    hostnames
}

pub fn read_hostnames(path: &Path) -> anyhow::Result<Vec<String>> {
    let content: String = fs::read_to_string(path)
        .with_context(|| format!("reading hostname list {}", path.display()))?;
    Ok(parse_hostnames(&content))
}

/// Writes the YAML inventory for every hostname in `hosts_file` into `dir`.
///
/// Returns the number of hosts written.
pub fn create_inventory_files(hosts_file: &Path, dir: &Path) -> anyhow::Result<usize> {
    let hostnames: Vec<String> = read_hostnames(hosts_file)?;
    write_inventory(&hostnames, dir)?;
    Ok(hostnames.len())
}

pub fn write_inventory(hostnames: &[String], dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating inventory directory {}", dir.display()))?;

    let hosts: BTreeMap<String, HostEntry> = hostnames
        .iter()
        .map(|hostname| {
            let entry = HostEntry {
                hostname: Some(hostname.clone()),
                groups: vec![DEVICE_GROUP.to_string()],
                ..HostEntry::default()
            };
            (host_key(hostname), entry)
        })
        .collect();

    let ssh_options = ConnectionOptions {
        platform: Some(SSH_PLATFORM.to_string()),
        port: None,
    };
    let groups: BTreeMap<String, GroupEntry> = BTreeMap::from([(
        DEVICE_GROUP.to_string(),
        GroupEntry {
            platform: Some(PLATFORM.to_string()),
            connection_options: BTreeMap::from([(SSH_OPTIONS_KEY.to_string(), ssh_options)]),
        },
    )]);

    let defaults = Defaults {
        platform: Some(PLATFORM.to_string()),
        port: None,
    };

    write_yaml(&dir.join(HOSTS_FILE), &hosts)?;
    write_yaml(&dir.join(GROUPS_FILE), &groups)?;
    write_yaml(&dir.join(DEFAULTS_FILE), &defaults)?;
    debug!("Inventory written to {}", dir.display());
    Ok(())
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let yaml: String = serde_yaml::to_string(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))
}

fn read_yaml<T: DeserializeOwned + Default>(path: &Path, required: bool) -> anyhow::Result<T> {
    if !required && !path.exists() {
        return Ok(T::default());
    }
    let content: String =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

impl Inventory {
    /// Loads the three inventory files from `dir`.
    ///
    /// `hosts.yaml` is required; missing group or default files count as empty.
    /// `default_port` applies when no level of the inventory sets a port.
    pub fn load(dir: &Path, default_port: u16) -> anyhow::Result<Self> {
        let hosts: BTreeMap<String, HostEntry> = read_yaml(&dir.join(HOSTS_FILE), true)?;
        let groups: BTreeMap<String, GroupEntry> = read_yaml(&dir.join(GROUPS_FILE), false)?;
        let defaults: Defaults = read_yaml(&dir.join(DEFAULTS_FILE), false)?;

        let mut resolved: Vec<Host> = Vec::with_capacity(hosts.len());
        for (name, entry) in hosts {
            let mut member_of: Vec<&GroupEntry> = Vec::with_capacity(entry.groups.len());
            for group in &entry.groups {
                match groups.get(group) {
                    Some(g) => member_of.push(g),
                    None => bail!("host '{name}' references unknown group '{group}'"),
                }
            }

            let platform: String = entry
                .platform
                .clone()
                .or_else(|| member_of.iter().find_map(|g| g.platform.clone()))
                .or_else(|| defaults.platform.clone())
                .unwrap_or_else(|| PLATFORM.to_string());

            let port: u16 = entry
                .port
                .or_else(|| {
                    member_of.iter().find_map(|g| {
                        g.connection_options
                            .get(SSH_OPTIONS_KEY)
                            .and_then(|opts| opts.port)
                    })
                })
                .or(defaults.port)
                .unwrap_or(default_port);

            resolved.push(Host {
                hostname: entry.hostname.clone().unwrap_or_else(|| name.clone()),
                name,
                platform,
                port,
            });
        }

        Ok(Self { hosts: resolved })
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
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
