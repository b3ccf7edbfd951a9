use nxprof_common::device::profile::{ProfileState, unused_key};
use nxprof_core::tasks;
use nxprof_protocols::{SHOW_PORT_PROFILE, SHOW_PORT_PROFILE_USAGE};

use crate::fixtures::{DEFINITIONS, FakeSession, INVALID_COMMAND, USAGE};

#[tokio::test]
async fn runs_usage_then_definitions() {
    let mut session = FakeSession::answering(USAGE, DEFINITIONS);
    let profiles = tasks::check_port_profiles("sw1", &mut session).await.unwrap();

    assert_eq!(session.commands, vec![SHOW_PORT_PROFILE_USAGE, SHOW_PORT_PROFILE]);
    assert_eq!(profiles["Ethernet1/2"].state, ProfileState::Applied);
    assert_eq!(profiles["Ethernet1/2"].description, "Server access ports");
    assert!(profiles.contains_key(&unused_key("SPARE")));
}

#[tokio::test]
async fn usage_alone_still_classifies() {
    let mut session = FakeSession::answering(USAGE, "");
    let profiles = tasks::check_port_profiles("sw1", &mut session).await.unwrap();

    assert_eq!(profiles.len(), 3);
    assert!(profiles.values().all(|p| p.is_applied()));
    assert_eq!(profiles["Ethernet1/49"].vlan, "N/A");
}

#[tokio::test]
async fn invalid_command_is_an_error() {
    let mut session = FakeSession::failing(INVALID_COMMAND);
    let err = tasks::check_port_profiles("sw1", &mut session).await.unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("show port-profile usage"));
    assert!(message.contains("Invalid command"));
    assert_eq!(session.commands.len(), 1);
}

#[tokio::test]
async fn no_profiles_yields_empty_map() {
    let mut session = FakeSession::answering("", "");
    let profiles = tasks::check_port_profiles("sw1", &mut session).await.unwrap();
    assert!(profiles.is_empty());
}
