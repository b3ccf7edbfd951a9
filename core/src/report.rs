//! # CSV report
//!
//! Two layouts, picked with `--detailed`:
//!
//! * **summary**: one row per port-profile per host;
//! * **detailed**: one row per interface (and per unused profile) per host.
//!
//! A host that failed, or returned no data, is always a single row carrying the
//! error message.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use serde::Serialize;

use nxprof_common::device::NOT_AVAILABLE;
use nxprof_common::device::host::HostResult;
use nxprof_common::device::profile::{ProfileInfo, ProfileState, is_synthetic_key};
use nxprof_common::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Summary,
    Detailed,
}

impl ReportMode {
    pub fn from_detailed(detailed: bool) -> Self {
        if detailed {
            ReportMode::Detailed
        } else {
            ReportMode::Summary
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            ReportMode::Summary => "port_profiles_summary",
            ReportMode::Detailed => "port_profiles_detailed",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportMode::Summary => &[
                "Host",
                "Status",
                "Port_Profile",
                "Profile_Status",
                "Interface_Count",
                "Interfaces",
                "VLAN",
                "Description",
                "Error",
            ],
            ReportMode::Detailed => &[
                "Host",
                "Status",
                "Interface",
                "Port_Profile",
                "VLAN",
                "Description",
                "Profile_Status",
                "Error",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRow {
    pub host: String,
    pub status: String,
    pub interface: String,
    pub port_profile: String,
    pub vlan: String,
    pub description: String,
    pub profile_status: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub host: String,
    pub status: String,
    pub port_profile: String,
    pub profile_status: String,
    pub interface_count: String,
    pub interfaces: String,
    pub vlan: String,
    pub description: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRows {
    Summary(Vec<SummaryRow>),
    Detailed(Vec<DetailedRow>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Summary(rows) => rows.len(),
            ReportRows::Detailed(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

pub fn rows_for(results: &[HostResult], mode: ReportMode) -> ReportRows {
    match mode {
        ReportMode::Detailed => ReportRows::Detailed(results.iter().flat_map(detailed_rows).collect()),
        ReportMode::Summary => ReportRows::Summary(results.iter().flat_map(summary_rows).collect()),
    }
}

fn detailed_rows(result: &HostResult) -> Vec<DetailedRow> {
    let status = result.status.to_string();
    let profiles = match &result.port_profiles {
        Some(map) if result.is_success() && !map.is_empty() => map,
        _ => {
            return vec![DetailedRow {
                host: result.host.clone(),
                status,
                interface: na(),
                port_profile: na(),
                vlan: na(),
                description: na(),
                profile_status: na(),
                error: result.error.clone().unwrap_or_default(),
            }];
        }
    };

    profiles
        .iter()
        .map(|(key, info)| DetailedRow {
            host: result.host.clone(),
            status: status.clone(),
            interface: if is_synthetic_key(key) { na() } else { key.clone() },
            port_profile: info.profile.clone(),
            vlan: info.vlan.clone(),
            description: info.description.clone(),
            profile_status: info.state.to_string(),
            error: String::new(),
        })
        .collect()
}

fn summary_rows(result: &HostResult) -> Vec<SummaryRow> {
    let status = result.status.to_string();
    let profiles = match &result.port_profiles {
        Some(map) if result.is_success() && !map.is_empty() => map,
        _ => {
            return vec![SummaryRow {
                host: result.host.clone(),
                status,
                port_profile: na(),
                profile_status: na(),
                interface_count: na(),
                interfaces: na(),
                vlan: na(),
                description: na(),
                error: result.error.clone().unwrap_or_default(),
            }];
        }
    };

    let mut grouped: BTreeMap<&str, (&ProfileInfo, Vec<&str>)> = BTreeMap::new();
    for (key, info) in profiles {
        let (_, interfaces) = grouped
            .entry(info.profile.as_str())
            .or_insert_with(|| (info, Vec::new()));
        if info.state == ProfileState::Applied && !is_synthetic_key(key) {
            interfaces.push(key.as_str());
        }
    }

    grouped
        .into_iter()
        .map(|(profile, (info, interfaces))| {
            let state = if interfaces.is_empty() {
                ProfileState::Unused
            } else {
                ProfileState::Applied
            };
            SummaryRow {
                host: result.host.clone(),
                status: status.clone(),
                port_profile: profile.to_string(),
                profile_status: state.to_string(),
                interface_count: interfaces.len().to_string(),
                interfaces: interfaces.join(" "),
                vlan: info.vlan.clone(),
                description: info.description.clone(),
                error: String::new(),
            }
        })
        .collect()
}

pub fn report_file_name(mode: ReportMode, at: DateTime<Local>) -> String {
    format!("{}_{}.csv", mode.file_prefix(), at.format("%Y%m%d_%H%M%S"))
}

/// Writes the report into `output_dir` under a timestamped name.
pub fn write_csv(
    results: &[HostResult],
    output_dir: &Path,
    mode: ReportMode,
) -> anyhow::Result<PathBuf> {
    let outcome = fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))
        .and_then(|_| {
            let path = output_dir.join(report_file_name(mode, Local::now()));
            write_csv_to(results, &path, mode).map(|rows| (path, rows))
        });

    match outcome {
        Ok((path, rows)) => {
            info!("CSV report saved to: {}", path.display());
            info!("Total rows: {rows}");
            Ok(path)
        }
        Err(e) => {
            error!("Error writing CSV file: {e:#}");
            Err(e)
        }
    }
}

/// Writes the report to `path` and returns the number of data rows.
pub fn write_csv_to(results: &[HostResult], path: &Path, mode: ReportMode) -> anyhow::Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writer.write_record(mode.headers())?;

    let rows = rows_for(results, mode);
    if rows.is_empty() {
        warn!("No hosts were checked, {} holds only the header", path.display());
    }
    match &rows {
        ReportRows::Summary(rows) => rows.iter().try_for_each(|row| writer.serialize(row))?,
        ReportRows::Detailed(rows) => rows.iter().try_for_each(|row| writer.serialize(row))?,
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(rows.len())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
