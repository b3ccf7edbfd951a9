use std::sync::{Arc, Mutex};
use std::time::Duration;

use nxprof_common::device::host::HostStatus;
use nxprof_common::device::profile::{ProfileState, unused_key};
use nxprof_core::runner::{self, Runner, RunSummary};

use crate::fixtures::{self, Behavior, FakeConnector, INVALID_COMMAND};

#[tokio::test]
async fn every_host_gets_a_result_in_inventory_order() {
    let connector = FakeConnector::new(Duration::from_millis(5))
        .with("sw2", Behavior::RefuseConnection)
        .with("sw4", Behavior::RejectLogin);
    let runner = Runner::new(Arc::new(connector), 5);
    let hosts = fixtures::hosts(&["sw1", "sw2", "sw3", "sw4", "sw5"]);

    let results = runner.run(&hosts, &fixtures::credentials(), None).await;

    let names: Vec<&str> = results.iter().map(|r| r.host.as_str()).collect();
    assert_eq!(names, vec!["sw1", "sw2", "sw3", "sw4", "sw5"]);
    assert_eq!(
        runner::summarize(&results),
        RunSummary {
            successful: 3,
            failed: 2
        }
    );

    let refused = &results[1];
    assert_eq!(refused.status, HostStatus::Failed);
    assert!(refused.port_profiles.is_none());
    assert!(refused.error.as_deref().unwrap().contains("connection refused"));

    let rejected = &results[3];
    assert!(rejected.error.as_deref().unwrap().contains("admin"));
}

#[tokio::test]
async fn successful_host_carries_reconciled_profiles() {
    let runner = Runner::new(Arc::new(FakeConnector::new(Duration::ZERO)), 5);
    let results = runner
        .run(&fixtures::hosts(&["sw1"]), &fixtures::credentials(), None)
        .await;

    let result = &results[0];
    assert!(result.is_success());
    assert!(result.error.is_none());

    let profiles = result.port_profiles.as_ref().unwrap();
    assert_eq!(profiles.len(), 4);
    assert_eq!(profiles["Ethernet1/1"].profile, "SERVERS");
    assert_eq!(profiles["Ethernet1/1"].vlan, "100");
    assert_eq!(profiles["Ethernet1/49"].vlan, "10-20");
    assert_eq!(profiles[&unused_key("SPARE")].state, ProfileState::Unused);
    assert_eq!(profiles[&unused_key("SPARE")].description, "Spare ports");
}

#[tokio::test]
async fn cli_error_fails_only_that_host() {
    let connector =
        FakeConnector::new(Duration::ZERO).with("sw2", Behavior::CliError(INVALID_COMMAND.into()));
    let runner = Runner::new(Arc::new(connector), 2);
    let results = runner
        .run(&fixtures::hosts(&["sw1", "sw2", "sw3"]), &fixtures::credentials(), None)
        .await;

    assert!(results[0].is_success());
    assert!(results[2].is_success());
    assert_eq!(results[1].status, HostStatus::Failed);
    assert!(results[1].error.as_deref().unwrap().contains("show port-profile usage"));
}

#[tokio::test]
async fn unsupported_platform_is_not_contacted() {
    let mut hosts = fixtures::hosts(&["sw1", "ios1"]);
    hosts[1].platform = "ios".to_string();

    let runner = Runner::new(Arc::new(FakeConnector::new(Duration::ZERO)), 5);
    let results = runner.run(&hosts, &fixtures::credentials(), None).await;

    assert!(results[0].is_success());
    assert!(results[1].error.as_deref().unwrap().contains("unsupported platform"));
}

#[tokio::test]
async fn never_more_sessions_than_workers() {
    let connector = Arc::new(FakeConnector::new(Duration::from_millis(20)));
    let runner = Runner::new(connector.clone(), 5);
    let names: Vec<String> = (0..12).map(|i| format!("sw{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    let results = runner
        .run(&fixtures::hosts(&names), &fixtures::credentials(), None)
        .await;

    assert_eq!(results.len(), 12);
    assert!(connector.peak() <= 5, "peak was {}", connector.peak());
    assert!(connector.peak() > 1);
}

#[tokio::test]
async fn progress_reports_each_host_once() {
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let runner = Runner::new(Arc::new(FakeConnector::new(Duration::ZERO)), 3);

    runner
        .run(
            &fixtures::hosts(&["a", "b", "c", "d"]),
            &fixtures::credentials(),
            Some(Box::new(move |done: usize| sink.lock().unwrap().push(done))),
        )
        .await;

    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn panicking_host_is_recorded_and_counted() {
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let connector = FakeConnector::new(Duration::ZERO).with("sw2", Behavior::Panic);
    let runner = Runner::new(Arc::new(connector), 2);

    let results = runner
        .run(
            &fixtures::hosts(&["sw1", "sw2", "sw3"]),
            &fixtures::credentials(),
            Some(Box::new(move |done: usize| sink.lock().unwrap().push(done))),
        )
        .await;

    assert!(results[0].is_success());
    assert!(results[2].is_success());
    assert_eq!(results[1].host, "sw2");
    assert_eq!(results[1].status, HostStatus::Failed);
    let error = results[1].error.as_deref().unwrap();
    assert!(error.contains("panicked"), "{error}");
    assert!(error.contains("driver crashed on sw2"), "{error}");

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_inventory_runs_nothing() {
    let runner = Runner::new(Arc::new(FakeConnector::new(Duration::ZERO)), 0);
    assert_eq!(runner.workers(), 1);
    let results = runner.run(&[], &fixtures::credentials(), None).await;
    assert!(results.is_empty());
}
