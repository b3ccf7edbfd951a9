//! SSH sessions over `russh`, one exec channel per command.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, AuthResult, Handle};
use russh::{ChannelMsg, Disconnect};
use tokio::time::timeout;

use nxprof_common::{config::Config, debug, device::credentials::Credentials};

use super::{Connector, DeviceSession, SessionError};
use crate::inventory::Host;

/// Accepts any host key. Switch inventories rarely come with known_hosts entries.
#[derive(Clone, Debug, Default)]
struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh::keys::ssh_key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

pub struct SshConnector {
    config: Arc<client::Config>,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl SshConnector {
    pub fn new(connect_timeout: Duration, command_timeout: Duration) -> Self {
        let config = client::Config {
            inactivity_timeout: Some(command_timeout.saturating_mul(2)),
            ..Default::default()
        };
        Self {
            config: Arc::new(config),
            connect_timeout,
            command_timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.connect_timeout, cfg.command_timeout)
    }

    async fn open(
        &self,
        host: &Host,
        credentials: &Credentials,
    ) -> Result<Handle<ClientHandler>, SessionError> {
        let addr = format!("{}:{}", host.hostname, host.port);
        let mut handle = client::connect(
            self.config.clone(),
            (host.hostname.as_str(), host.port),
            ClientHandler,
        )
        .await
        .map_err(|e| SessionError::Connect {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;
        debug!("Connected to {addr}, authenticating as {}", credentials.username);

        let auth = handle
            .authenticate_password(credentials.username.clone(), credentials.password.clone())
            .await?;
        match auth {
            AuthResult::Success => Ok(handle),
            AuthResult::Failure { .. } => Err(SessionError::AuthenticationRejected(
                credentials.username.clone(),
            )),
        }
    }
}

#[async_trait]
impl Connector for SshConnector {
    async fn connect(
        &self,
        host: &Host,
        credentials: &Credentials,
    ) -> Result<Box<dyn DeviceSession>, SessionError> {
        let handle = timeout(self.connect_timeout, self.open(host, credentials))
            .await
            .map_err(|_| {
                SessionError::Timeout(format!("connecting to {}", host.hostname), self.connect_timeout)
            })??;

        Ok(Box::new(SshSession {
            handle,
            command_timeout: self.command_timeout,
        }))
    }
}

struct SshSession {
    handle: Handle<ClientHandler>,
    command_timeout: Duration,
}

#[derive(Default)]
struct Captured {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    status: Option<u32>,
}

/// Folds one channel message into `captured`. Returns true once the channel closed.
fn capture(msg: &ChannelMsg, captured: &mut Captured) -> bool {
    match msg {
        ChannelMsg::Data { data } => {
            captured.stdout.extend_from_slice(data);
            false
        }
        ChannelMsg::ExtendedData { data, ext: 1 } => {
            captured.stderr.extend_from_slice(data);
            false
        }
        ChannelMsg::ExitStatus { exit_status } => {
            captured.status = Some(*exit_status);
            false
        }
        ChannelMsg::Close => true,
        _ => false,
    }
}

impl SshSession {
    async fn exec(&self, command: &str) -> Result<Captured, SessionError> {
        let channel_err = |e: russh::Error| SessionError::Channel {
            command: command.to_string(),
            reason: e.to_string(),
        };

        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(channel_err)?;
        channel.exec(true, command).await.map_err(channel_err)?;

        let mut captured = Captured::default();
        while let Some(msg) = channel.wait().await {
            if capture(&msg, &mut captured) {
                break;
            }
        }

        let _ = channel.close().await;
        Ok(captured)
    }
}

#[async_trait]
impl DeviceSession for SshSession {
    async fn send_command(&mut self, command: &str) -> Result<String, SessionError> {
        debug!("Executing '{command}'");
        let captured = timeout(self.command_timeout, self.exec(command))
            .await
            .map_err(|_| SessionError::Timeout(format!("'{command}'"), self.command_timeout))??;

        match captured.status {
            Some(status) if status != 0 => {
                let stderr = if captured.stderr.is_empty() {
                    &captured.stdout
                } else {
                    &captured.stderr
                };
                Err(SessionError::ExitStatus {
                    command: command.to_string(),
                    status,
                    stderr: String::from_utf8_lossy(stderr).trim().to_string(),
                })
            }
            _ => Ok(String::from_utf8_lossy(&captured.stdout).into_owned()),
        }
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            debug!("Error while disconnecting: {e}");
        }
    }
}
