use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use nxprof_common::device::credentials::Credentials;
use nxprof_core::inventory::{Host, PLATFORM};
use nxprof_core::session::{Connector, DeviceSession, SessionError};
use nxprof_protocols::{SHOW_PORT_PROFILE, SHOW_PORT_PROFILE_USAGE};

pub const USAGE: &str = "
-------------------------------------------------------------------------------
Port Profile               Port        Adm Status  Oper Status
-------------------------------------------------------------------------------
SERVERS                    Eth1/1      up          up
                           Eth1/2      up          down
UPLINK                     Eth1/49     up          up
";

pub const DEFINITIONS: &str = "
port-profile SERVERS
 type: Ethernet
 description: Server access ports
 status: enabled
 max-ports: 512
 inherit:
 config attributes:
  switchport mode access
  switchport access vlan 100
 evaluated config attributes:
  switchport mode access
  switchport access vlan 100
 assigned interfaces:
  Ethernet1/1
  Ethernet1/2
port-profile UPLINK
 type: Ethernet
 description: Uplink to core
 status: enabled
 max-ports: 512
 inherit:
 config attributes:
  switchport mode trunk
  switchport trunk allowed vlan 10-20
 evaluated config attributes:
  switchport mode trunk
  switchport trunk allowed vlan 10-20
 assigned interfaces:
  Ethernet1/49
port-profile SPARE
 type: Ethernet
 description: Spare ports
 status: disabled
 max-ports: 512
 inherit:
 config attributes:
  switchport access vlan 999
 evaluated config attributes:
 assigned interfaces:
";

pub const INVALID_COMMAND: &str = "
% Invalid command at '^' marker.
";

#[derive(Clone)]
pub enum Behavior {
    /// Answers both show commands with the given outputs.
    Answer { usage: String, definitions: String },
    RefuseConnection,
    RejectLogin,
    /// Connects, then answers every command with an error message.
    CliError(String),
    /// Panics inside the connector, before any session is opened.
    Panic,
}

impl Behavior {
    pub fn healthy() -> Self {
        Behavior::Answer {
            usage: USAGE.to_string(),
            definitions: DEFINITIONS.to_string(),
        }
    }
}

/// Connector that never touches the network. Tracks how many sessions are open
/// at once so tests can check the worker bound.
pub struct FakeConnector {
    behaviors: HashMap<String, Behavior>,
    delay: Duration,
    open: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new(delay: Duration) -> Self {
        Self {
            behaviors: HashMap::new(),
            delay,
            open: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with(mut self, host: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(host.to_string(), behavior);
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(
        &self,
        host: &Host,
        credentials: &Credentials,
    ) -> Result<Box<dyn DeviceSession>, SessionError> {
        let behavior = self
            .behaviors
            .get(&host.name)
            .cloned()
            .unwrap_or_else(Behavior::healthy);
        if let Behavior::Panic = behavior {
            panic!("driver crashed on {}", host.name);
        }

        let now_open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_open, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let refused = match behavior {
            Behavior::RefuseConnection => Some(SessionError::Connect {
                addr: format!("{}:{}", host.hostname, host.port),
                reason: "connection refused".to_string(),
            }),
            Behavior::RejectLogin => Some(SessionError::AuthenticationRejected(
                credentials.username.clone(),
            )),
            _ => None,
        };
        if let Some(e) = refused {
            self.open.fetch_sub(1, Ordering::SeqCst);
            return Err(e);
        }

        Ok(Box::new(FakeSession {
            behavior,
            open: self.open.clone(),
            commands: Vec::new(),
        }))
    }
}

pub struct FakeSession {
    behavior: Behavior,
    open: Arc<AtomicUsize>,
    pub commands: Vec<String>,
}

impl FakeSession {
    pub fn answering(usage: &str, definitions: &str) -> Self {
        Self {
            behavior: Behavior::Answer {
                usage: usage.to_string(),
                definitions: definitions.to_string(),
            },
            open: Arc::new(AtomicUsize::new(1)),
            commands: Vec::new(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: Behavior::CliError(message.to_string()),
            open: Arc::new(AtomicUsize::new(1)),
            commands: Vec::new(),
        }
    }
}

#[async_trait]
impl DeviceSession for FakeSession {
    async fn send_command(&mut self, command: &str) -> Result<String, SessionError> {
        self.commands.push(command.to_string());
        match &self.behavior {
            Behavior::Answer { usage, .. } if command == SHOW_PORT_PROFILE_USAGE => {
                Ok(usage.clone())
            }
            Behavior::Answer { definitions, .. } if command == SHOW_PORT_PROFILE => {
                Ok(definitions.clone())
            }
            Behavior::CliError(message) => Ok(message.clone()),
            _ => Err(SessionError::Channel {
                command: command.to_string(),
                reason: "unexpected command".to_string(),
            }),
        }
    }

    async fn close(self: Box<Self>) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn host(name: &str) -> Host {
    Host {
        name: name.to_string(),
        hostname: format!("{name}.lab"),
        platform: PLATFORM.to_string(),
        port: 22,
    }
}

pub fn hosts(names: &[&str]) -> Vec<Host> {
    names.iter().map(|n| host(n)).collect()
}

pub fn credentials() -> Credentials {
    Credentials::new("admin", "secret")
}
