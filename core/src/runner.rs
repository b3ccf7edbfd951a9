//! # Runner
//!
//! Runs the port-profile collection against every inventory host on a fixed
//! number of workers. A host that fails is recorded and logged; it never stops
//! the others.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{Instrument, info_span};

use nxprof_common::device::{credentials::Credentials, host::HostResult};
use nxprof_common::{error, info, success, warn};

use crate::inventory::{Host, PLATFORM};
use crate::session::Connector;
use crate::tasks;

/// Called with the number of hosts finished so far.
pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

pub struct Runner {
    connector: Arc<dyn Connector>,
    workers: usize,
}

impl Runner {
    pub fn new(connector: Arc<dyn Connector>, workers: usize) -> Self {
        Self {
            connector,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Collects every host and returns one result per host, in inventory order.
    ///
    /// `on_progress` fires once per host, including hosts whose task panicked.
    pub async fn run(
        &self,
        hosts: &[Host],
        credentials: &Credentials,
        on_progress: Option<ProgressCallback>,
    ) -> Vec<HostResult> {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let credentials = Arc::new(credentials.clone());

        let mut set: JoinSet<HostResult> = JoinSet::new();
        let mut spawned: HashMap<Id, usize> = HashMap::with_capacity(hosts.len());
        for (idx, host) in hosts.iter().cloned().enumerate() {
            let connector = self.connector.clone();
            let semaphore = semaphore.clone();
            let credentials = credentials.clone();
            let span = info_span!("host", name = %host.name);

            let handle = set.spawn(
                async move {
                    match semaphore.acquire_owned().await {
                        Ok(_permit) => collect_host(connector.as_ref(), &host, &credentials).await,
                        Err(_) => HostResult::failed(&host.name, &host.hostname, "worker pool closed"),
                    }
                }
                .instrument(span),
            );
            spawned.insert(handle.id(), idx);
        }

        let mut slots: Vec<Option<HostResult>> = (0..hosts.len()).map(|_| None).collect();
        let mut done: usize = 0;
        while let Some(joined) = set.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, result)) => (id, Ok(result)),
                Err(e) => (e.id(), Err(e)),
            };
            let Some(&idx) = spawned.get(&id) else {
                continue;
            };
            let host = &hosts[idx];

            slots[idx] = Some(match outcome {
                Ok(result) => result,
                Err(e) => {
                    error!("Collection task for {} did not finish: {e}", host.name);
                    HostResult::failed(&host.name, &host.hostname, join_failure(e))
                }
            });

            done += 1;
            if let Some(cb) = &on_progress {
                cb(done);
            }
        }

        slots
            .into_iter()
            .zip(hosts)
            .map(|(slot, host)| {
                slot.unwrap_or_else(|| {
                    HostResult::failed(&host.name, &host.hostname, "collection task did not finish")
                })
            })
            .collect()
    }
}

fn join_failure(e: JoinError) -> String {
    if !e.is_panic() {
        return "collection task cancelled".to_string();
    }
    let payload = e.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("collection task panicked: {message}")
}

async fn collect_host(connector: &dyn Connector, host: &Host, credentials: &Credentials) -> HostResult {
    if host.platform != PLATFORM {
        warn!("{} has platform '{}', skipping", host.name, host.platform);
        return HostResult::failed(
            &host.name,
            &host.hostname,
            format!("unsupported platform '{}'", host.platform),
        );
    }

    info!("Connecting to {} ({}:{})", host.name, host.hostname, host.port);
    let mut session = match connector.connect(host, credentials).await {
        Ok(session) => session,
        Err(e) => {
            error!("{}: {e}", host.name);
            return HostResult::failed(&host.name, &host.hostname, e.to_string());
        }
    };

    let outcome = tasks::check_port_profiles(&host.name, session.as_mut()).await;
    session.close().await;

    match outcome {
        Ok(profiles) => {
            success!("{}: {} port-profile entries collected", host.name, profiles.len());
            HostResult::success(&host.name, &host.hostname, profiles)
        }
        Err(e) => HostResult::failed(&host.name, &host.hostname, format!("{e:#}")),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} successful, {} failed", self.successful, self.failed)
    }
}

pub fn summarize(results: &[HostResult]) -> RunSummary {
    let successful = results.iter().filter(|r| r.is_success()).count();
    RunSummary {
        successful,
        failed: results.len() - successful,
    }
}
