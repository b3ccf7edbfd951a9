//! Parser for `show port-profile`.
//!
//! Every profile starts with an unindented `port-profile NAME` line followed by
//! indented `key: value` fields. A few fields open a list whose items are indented
//! one level deeper:
//!
//! ```text
//! port-profile UPLINK
//!  type: Ethernet
//!  description: Uplink to core
//!  status: enabled
//!  max-ports: 512
//!  inherit:
//!  config attributes:
//!   switchport mode trunk
//!   switchport trunk allowed vlan 10-20
//!  evaluated config attributes:
//!   switchport mode trunk
//!   switchport trunk allowed vlan 10-20
//!  assigned interfaces:
//!   Ethernet1/1
//! ```

use nxprof_common::debug;

use crate::interface::{canonical, looks_like_interface};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDefinition {
    pub name: String,
    /// `Ethernet`, `Interface-vlan`, `port-channel`...
    pub kind: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub max_ports: Option<u32>,
    pub inherit: Vec<String>,
    pub config: Vec<String>,
    pub evaluated: Vec<String>,
    pub assigned: Vec<String>,
}

impl ProfileDefinition {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// VLAN carried by the profile configuration, if any.
    ///
    /// An access VLAN wins over a trunk allowed list, which wins over a native
    /// VLAN. Evaluated attributes are consulted only when the configured ones
    /// name no VLAN at all.
    pub fn vlan(&self) -> Option<String> {
        vlan_from(&self.config).or_else(|| vlan_from(&self.evaluated))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Inherit,
    Config,
    Evaluated,
    Assigned,
}

pub fn parse_definitions(output: &str) -> Vec<ProfileDefinition> {
    let mut profiles: Vec<ProfileDefinition> = Vec::new();
    let mut section = Section::None;
    let mut field_indent: Option<usize> = None;

    for raw in output.lines() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || crate::is_prompt_echo(trimmed) {
            continue;
        }
        let indent = line.len() - trimmed.len();

        if indent == 0 {
            if let Some(name) = crate::port_profile_name(trimmed) {
                profiles.push(ProfileDefinition::new(name));
                section = Section::None;
                field_indent = None;
            } else {
                debug!("skipping line outside a port-profile: {trimmed}");
            }
            continue;
        }

        let Some(profile) = profiles.last_mut() else {
            continue;
        };

        if let Some((key, value)) = known_field(trimmed) {
            field_indent.get_or_insert(indent);
            section = apply_field(profile, key, value);
            continue;
        }

        let is_item = field_indent.is_none_or(|fi| indent > fi);
        if !is_item {
            // Unknown field such as `port-group:`; it closes any open list.
            section = Section::None;
            continue;
        }

        match section {
            Section::None => debug!("skipping stray line in {}: {trimmed}", profile.name),
            Section::Inherit => profile.inherit.push(strip_profile_keyword(trimmed)),
            Section::Config => profile.config.push(trimmed.to_string()),
            Section::Evaluated => profile.evaluated.push(trimmed.to_string()),
            Section::Assigned => push_interfaces(&mut profile.assigned, trimmed),
        }
    }

    profiles
}

const FIELDS: &[&str] = &[
    "type",
    "description",
    "status",
    "max-ports",
    "min-ports",
    "inherit",
    "config attributes",
    "evaluated config attributes",
    "assigned interfaces",
];

fn known_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    FIELDS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(key))
        .then_some((key, value.trim()))
}

fn apply_field(profile: &mut ProfileDefinition, key: &str, value: &str) -> Section {
    let non_empty = (!value.is_empty()).then(|| value.to_string());
    match key.to_ascii_lowercase().as_str() {
        "type" => profile.kind = non_empty,
        "description" => profile.description = non_empty,
        "status" => {
            profile.enabled = match value.to_ascii_lowercase().as_str() {
                "enabled" => Some(true),
                "disabled" => Some(false),
                _ => None,
            }
        }
        "max-ports" => profile.max_ports = value.parse().ok(),
        "inherit" => {
            if !value.is_empty() {
                profile.inherit.push(strip_profile_keyword(value));
            }
            return Section::Inherit;
        }
        "config attributes" => return Section::Config,
        "evaluated config attributes" => return Section::Evaluated,
        "assigned interfaces" => {
            push_interfaces(&mut profile.assigned, value);
            return Section::Assigned;
        }
        _ => {}
    }
    Section::None
}

fn strip_profile_keyword(value: &str) -> String {
    crate::port_profile_name(value).unwrap_or(value).to_string()
}

fn push_interfaces(assigned: &mut Vec<String>, line: &str) {
    for token in line.split(|c: char| c.is_whitespace() || c == ',') {
        if !looks_like_interface(token) {
            continue;
        }
        let interface = canonical(token);
        if !assigned.contains(&interface) {
            assigned.push(interface);
        }
    }
}

fn vlan_from(lines: &[String]) -> Option<String> {
    let mut allowed: Option<String> = None;
    let mut native: Option<String> = None;

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["switchport", "access", "vlan", vlan] => return Some(vlan.to_string()),
            ["switchport", "trunk", "allowed", "vlan", "add", vlans] => {
                allowed = Some(match allowed.take() {
                    Some(prev) => format!("{prev},{vlans}"),
                    None => vlans.to_string(),
                });
            }
            ["switchport", "trunk", "allowed", "vlan", rest @ ..] if !rest.is_empty() => {
                allowed = Some(rest.join(" "));
            }
            ["switchport", "trunk", "native", "vlan", vlan] => native = Some(vlan.to_string()),
            _ => {}
        }
    }

    allowed.or(native)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "\
port-profile UPLINK
 type: Ethernet
 description: Uplink to core
 status: enabled
 max-ports: 512
 min-ports: 1
 inherit:
 config attributes:
  switchport mode trunk
  switchport trunk allowed vlan 10-20
  switchport trunk allowed vlan add 30
  no shutdown
 evaluated config attributes:
  switchport mode trunk
  switchport trunk allowed vlan 10-20,30
  no shutdown
 assigned interfaces:
  Ethernet1/1
  Ethernet1/2
 port-group: UPLINK
 system vlans: none
port-profile SERVERS
 type: Ethernet
 description:
 status: disabled
 max-ports: 512
 inherit:
  port-profile BASE
 config attributes:
  switchport access vlan 100
 evaluated config attributes:
  switchport access vlan 100
 assigned interfaces:
";

    #[test]
    fn parses_fields_and_sections() {
        let profiles = parse_definitions(OUTPUT);
        assert_eq!(profiles.len(), 2);

        let uplink = &profiles[0];
        assert_eq!(uplink.name, "UPLINK");
        assert_eq!(uplink.kind.as_deref(), Some("Ethernet"));
        assert_eq!(uplink.description.as_deref(), Some("Uplink to core"));
        assert_eq!(uplink.enabled, Some(true));
        assert_eq!(uplink.max_ports, Some(512));
        assert!(uplink.inherit.is_empty());
        assert_eq!(uplink.config.len(), 4);
        assert_eq!(uplink.evaluated.len(), 3);
        assert_eq!(uplink.assigned, vec!["Ethernet1/1", "Ethernet1/2"]);

        let servers = &profiles[1];
        assert_eq!(servers.description, None);
        assert_eq!(servers.enabled, Some(false));
        assert_eq!(servers.inherit, vec!["BASE"]);
        assert!(servers.assigned.is_empty());
    }

    #[test]
    fn derives_vlans() {
        let profiles = parse_definitions(OUTPUT);
        assert_eq!(profiles[0].vlan().as_deref(), Some("10-20,30"));
        assert_eq!(profiles[1].vlan().as_deref(), Some("100"));
    }

    #[test]
    fn native_vlan_is_last_resort() {
        let profile = ProfileDefinition {
            config: vec!["switchport trunk native vlan 99".into()],
            ..ProfileDefinition::new("X")
        };
        assert_eq!(profile.vlan().as_deref(), Some("99"));

        let profile = ProfileDefinition {
            evaluated: vec!["switchport access vlan 5".into()],
            ..ProfileDefinition::new("Y")
        };
        assert_eq!(profile.vlan().as_deref(), Some("5"));
        assert_eq!(ProfileDefinition::new("Z").vlan(), None);
    }

    #[test]
    fn ignores_text_before_first_profile() {
        let output = "n5k# show port-profile\nsome banner\n description: orphan\nport-profile A\n type: Ethernet\n";
        let profiles = parse_definitions(output);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "A");
        assert_eq!(profiles[0].description, None);
    }

    #[test]
    fn inline_assigned_interfaces() {
        let output = "port-profile A\n assigned interfaces: Eth1/5, Po7\n";
        let profiles = parse_definitions(output);
        assert_eq!(profiles[0].assigned, vec!["Ethernet1/5", "port-channel7"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse_definitions(OUTPUT), parse_definitions(OUTPUT));
    }
}
