//! # NX-OS CLI output parsing
//!
//! Turns the text printed by `show port-profile usage` ([`usage`]) and
//! `show port-profile` ([`definition`]) into plain structs. Nothing here talks to
//! a device; callers hand in the captured output.

pub mod definition;
pub mod error;
pub mod interface;
pub mod usage;

pub use definition::{ProfileDefinition, parse_definitions};
pub use error::{CliError, check_cli_error};
pub use usage::{ProfileUsage, parse_usage};

pub const SHOW_PORT_PROFILE_USAGE: &str = "show port-profile usage";
pub const SHOW_PORT_PROFILE: &str = "show port-profile";

/// Name from a `port-profile NAME` or `port-profile type ethernet NAME` line.
pub(crate) fn port_profile_name(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    if !tokens.next()?.eq_ignore_ascii_case("port-profile") {
        return None;
    }
    let name = tokens.next()?;
    if name.eq_ignore_ascii_case("type") {
        tokens.next()?;
        return tokens.next();
    }
    Some(name)
}

/// Prompt lines and command echoes some terminals leave in captured output.
pub(crate) fn is_prompt_echo(line: &str) -> bool {
    line.ends_with('#') || line.contains("# show ") || line.starts_with("show ")
}
