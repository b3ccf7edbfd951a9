//! Parser for `show port-profile usage`.
//!
//! NX-OS releases disagree on the layout of this command, so the parser is a
//! small line-driven state machine that understands three of them:
//!
//! ```text
//! Port Profile               Port        Adm Status  Oper Status      (profile first)
//! UPLINK                     Eth1/1      up          up
//!                            Eth1/2      up          down
//!
//! port-profile UPLINK                                                 (block)
//!  Ethernet1/1
//!
//! Interface    Profile                                                (interface first)
//! Eth1/1       UPLINK
//! ```
//!
//! Lines that fit none of them are skipped.

use std::collections::HashMap;

use nxprof_common::debug;

use crate::interface::{canonical, looks_like_interface};

/// Interfaces inheriting one port-profile, in the order the device listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUsage {
    pub profile: String,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Unknown,
    ProfileFirst,
    InterfaceFirst,
    Block,
}

struct UsageParser {
    entries: Vec<ProfileUsage>,
    index: HashMap<String, usize>,
    current: Option<usize>,
    layout: Layout,
}

/// Parses the raw command output. Pure: the same input always yields the same list.
pub fn parse_usage(output: &str) -> Vec<ProfileUsage> {
    let mut parser = UsageParser::new();
    for line in output.lines() {
        parser.feed(line);
    }
    parser.entries
}

impl UsageParser {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            current: None,
            layout: Layout::Unknown,
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('-') || crate::is_prompt_echo(trimmed) {
            return;
        }

        let indented = line.len() != trimmed.len();
        let tokens: Vec<&str> = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            debug!("skipping separator-only port-profile usage line: {trimmed}");
            return;
        }

        if let Some(name) = crate::port_profile_name(trimmed).filter(|_| !indented) {
            self.layout = Layout::Block;
            self.current = Some(self.open(name));
            return;
        }

        if let Some(layout) = header_layout(&tokens) {
            self.layout = layout;
            self.current = None;
            return;
        }

        if self.is_continuation(indented, &tokens) {
            self.continue_current(&tokens);
            return;
        }

        self.parse_row(trimmed, &tokens);
    }

    fn is_continuation(&self, indented: bool, tokens: &[&str]) -> bool {
        if self.current.is_none() || !looks_like_interface(tokens[0]) {
            return false;
        }
        match self.layout {
            Layout::Block => true,
            Layout::InterfaceFirst => false,
            Layout::ProfileFirst | Layout::Unknown => indented,
        }
    }

    fn continue_current(&mut self, tokens: &[&str]) {
        let Some(idx) = self.current else {
            return;
        };
        let interfaces: Vec<String> = match self.layout {
            // Block listings may put several members on one line.
            Layout::Block => tokens
                .iter()
                .filter(|t| looks_like_interface(t))
                .map(|t| canonical(t))
                .collect(),
            _ => vec![canonical(tokens[0])],
        };
        for interface in interfaces {
            self.add_interface(idx, interface);
        }
    }

    fn parse_row(&mut self, line: &str, tokens: &[&str]) {
        if tokens.len() < 2 {
            debug!("skipping malformed port-profile usage line: {line}");
            return;
        }

        let (first, second) = (tokens[0], tokens[1]);
        let (profile, interface) = if looks_like_interface(first) && !looks_like_interface(second) {
            self.layout = Layout::InterfaceFirst;
            (second, first)
        } else if looks_like_interface(second) {
            if self.layout == Layout::Unknown {
                self.layout = Layout::ProfileFirst;
            }
            (first, second)
        } else {
            debug!("skipping malformed port-profile usage line: {line}");
            return;
        };

        let idx = self.open(profile);
        self.add_interface(idx, canonical(interface));
        self.current = Some(idx);
    }

    fn open(&mut self, profile: &str) -> usize {
        if let Some(idx) = self.index.get(profile) {
            return *idx;
        }
        self.entries.push(ProfileUsage {
            profile: profile.to_string(),
            interfaces: Vec::new(),
        });
        let idx = self.entries.len() - 1;
        self.index.insert(profile.to_string(), idx);
        idx
    }

    fn add_interface(&mut self, idx: usize, interface: String) {
        let entry = &mut self.entries[idx];
        if !entry.interfaces.contains(&interface) {
            entry.interfaces.push(interface);
        }
    }
}

/// Column headers. The first word tells which column comes first.
fn header_layout(tokens: &[&str]) -> Option<Layout> {
    if tokens.iter().any(|t| looks_like_interface(t)) {
        return None;
    }
    match tokens.first().copied() {
        Some("Port") if tokens.get(1) == Some(&"Profile") => Some(Layout::ProfileFirst),
        Some("Profile") | Some("Port-profile") => Some(Layout::ProfileFirst),
        Some("Interface") | Some("Port") => Some(Layout::InterfaceFirst),
        _ => None,
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
