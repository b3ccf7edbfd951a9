//! Interface naming.
//!
//! `show port-profile usage` abbreviates interface names (`Eth1/1`, `Po10`) while
//! `show port-profile` spells them out (`Ethernet1/1`, `port-channel10`). Both are
//! folded to the long form so results from the two commands line up.

/// Known prefixes, lowercase, mapped to the long form NX-OS prints.
const PREFIXES: &[(&str, &str)] = &[
    ("ethernet", "Ethernet"),
    ("eth", "Ethernet"),
    ("et", "Ethernet"),
    ("e", "Ethernet"),
    ("port-channel", "port-channel"),
    ("portchannel", "port-channel"),
    ("po", "port-channel"),
    ("vlan", "Vlan"),
    ("vl", "Vlan"),
    ("loopback", "loopback"),
    ("lo", "loopback"),
    ("mgmt", "mgmt"),
    ("vethernet", "Vethernet"),
    ("veth", "Vethernet"),
    ("tunnel", "Tunnel"),
    ("tu", "Tunnel"),
    ("nve", "nve"),
];

fn split_name(name: &str) -> (&str, &str) {
    let idx = name
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .unwrap_or(name.len());
    name.split_at(idx)
}

fn long_prefix(prefix: &str) -> Option<&'static str> {
    let lower = prefix.to_ascii_lowercase();
    PREFIXES
        .iter()
        .find(|(short, _)| *short == lower)
        .map(|(_, long)| *long)
}

fn is_numbering(suffix: &str) -> bool {
    suffix.starts_with(|c: char| c.is_ascii_digit())
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '/' | '.' | ':'))
}

/// True when `token` reads as an NX-OS interface name, short or long form.
pub fn looks_like_interface(token: &str) -> bool {
    let (prefix, suffix) = split_name(token);
    !prefix.is_empty() && long_prefix(prefix).is_some() && is_numbering(suffix)
}

/// Long form of an interface name. Unknown names are returned unchanged.
pub fn canonical(name: &str) -> String {
    let name = name.trim();
    let (prefix, suffix) = split_name(name);
    match long_prefix(prefix) {
        Some(long) if is_numbering(suffix) => format!("{long}{suffix}"),
        _ => name.to_string(),
    }
}
