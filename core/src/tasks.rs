use anyhow::Context;

use nxprof_common::device::profile::ProfileMap;
use nxprof_common::{debug, error};
use nxprof_protocols::{
    self as protocols, SHOW_PORT_PROFILE, SHOW_PORT_PROFILE_USAGE, check_cli_error,
};

use crate::reconcile::reconcile;
use crate::session::DeviceSession;

/// Collects port-profile usage and definitions from one switch.
pub async fn check_port_profiles(
    host: &str,
    session: &mut dyn DeviceSession,
) -> anyhow::Result<ProfileMap> {
    let result = collect(session).await;
    if let Err(e) = &result {
        error!("Error checking port profiles on {host}: {e:#}");
    }
    result
}

async fn collect(session: &mut dyn DeviceSession) -> anyhow::Result<ProfileMap> {
    let usage_output = run(session, SHOW_PORT_PROFILE_USAGE).await?;
    let usage = protocols::parse_usage(&usage_output);

    let definition_output = run(session, SHOW_PORT_PROFILE).await?;
    let definitions = protocols::parse_definitions(&definition_output);

    debug!(
        "Parsed {} profiles in use and {} definitions",
        usage.len(),
        definitions.len()
    );
    Ok(reconcile(&usage, &definitions))
}

async fn run(session: &mut dyn DeviceSession, command: &str) -> anyhow::Result<String> {
    let output = session
        .send_command(command)
        .await
        .with_context(|| format!("running '{command}'"))?;
    check_cli_error(&output).with_context(|| format!("running '{command}'"))?;
    Ok(output)
}
