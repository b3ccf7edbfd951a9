//! # Device sessions
//!
//! The collection task only needs to send a command and read back its output.
//! [`Connector`] and [`DeviceSession`] capture exactly that, so the runner can be
//! driven by the SSH implementation in [`ssh`] or by an in-memory fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use nxprof_common::device::credentials::Credentials;

use crate::inventory::Host;

pub mod ssh;

pub use ssh::SshConnector;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },
    #[error("authentication rejected for user '{0}'")]
    AuthenticationRejected(String),
    #[error("{0} timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("channel error while running '{command}': {reason}")]
    Channel { command: String, reason: String },
    #[error("'{command}' exited with status {status}: {stderr}")]
    ExitStatus {
        command: String,
        status: u32,
        stderr: String,
    },
    #[error("ssh transport error: {0}")]
    Transport(#[from] russh::Error),
}

/// An open, authenticated session on one device.
#[async_trait]
pub trait DeviceSession: Send {
    /// Runs `command` and returns everything it printed on stdout.
    async fn send_command(&mut self, command: &str) -> Result<String, SessionError>;

    /// Ends the session. Errors while closing are not interesting to callers.
    async fn close(self: Box<Self>);
}

/// Opens sessions. Shared by every worker of a run.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        host: &Host,
        credentials: &Credentials,
    ) -> Result<Box<dyn DeviceSession>, SessionError>;
}
