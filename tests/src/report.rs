use std::sync::Arc;
use std::time::Duration;

use nxprof_common::device::host::HostResult;
use nxprof_core::report::{self, ReportMode};
use nxprof_core::runner::Runner;

use crate::fixtures::{self, Behavior, FakeConnector};

async fn collected() -> Vec<HostResult> {
    let connector = FakeConnector::new(Duration::ZERO).with("sw2", Behavior::RefuseConnection);
    Runner::new(Arc::new(connector), 5)
        .run(&fixtures::hosts(&["sw1", "sw2"]), &fixtures::credentials(), None)
        .await
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn summary_report_has_one_row_per_profile() {
    let results = collected().await;
    let dir = tempfile::tempdir().unwrap();

    let path = report::write_csv(&results, dir.path(), ReportMode::Summary).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("port_profiles_summary_"));
    assert!(name.ends_with(".csv"));

    let (headers, rows) = read_rows(&path);
    assert_eq!(headers[0], "Host");
    assert_eq!(headers.len(), 9);
    // SERVERS, SPARE, UPLINK for sw1 and one error row for sw2.
    assert_eq!(rows.len(), 4);

    let servers = rows.iter().find(|r| r[2] == "SERVERS").unwrap();
    assert_eq!(servers[3], "applied");
    assert_eq!(servers[4], "2");
    assert_eq!(servers[5], "Ethernet1/1 Ethernet1/2");

    let spare = rows.iter().find(|r| r[2] == "SPARE").unwrap();
    assert_eq!(spare[3], "unused");
    assert_eq!(spare[4], "0");

    let failed = rows.iter().find(|r| r[0] == "sw2").unwrap();
    assert_eq!(failed[1], "Failed");
    assert!(failed[8].contains("connection refused"));
}

#[tokio::test]
async fn detailed_report_has_one_row_per_interface() {
    let results = collected().await;
    let dir = tempfile::tempdir().unwrap();

    let path = report::write_csv(&results, dir.path(), ReportMode::Detailed).unwrap();
    let (headers, rows) = read_rows(&path);
    assert_eq!(headers[2], "Interface");

    // Three interfaces plus the unused profile for sw1, one error row for sw2.
    assert_eq!(rows.len(), 5);
    let interfaces: Vec<&str> = rows
        .iter()
        .filter(|r| r[0] == "sw1")
        .map(|r| r[2].as_str())
        .collect();
    assert_eq!(
        interfaces,
        vec!["Ethernet1/1", "Ethernet1/2", "Ethernet1/49", "N/A"]
    );
}

#[test]
fn all_failed_run_still_writes_a_report() {
    let results = vec![HostResult::failed("sw1", "sw1", "")];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    let written = report::write_csv_to(&results, &path, ReportMode::Summary).unwrap();
    assert_eq!(written, 1);

    let (_, rows) = read_rows(&path);
    assert_eq!(rows[0][8], "Unknown error");
}

#[test]
fn empty_run_writes_only_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    assert_eq!(report::write_csv_to(&[], &path, ReportMode::Detailed).unwrap(), 0);
    let (headers, rows) = read_rows(&path);
    assert_eq!(headers.len(), 8);
    assert!(rows.is_empty());
}
