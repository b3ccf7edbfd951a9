use std::fs;
use std::path::Path;

use anyhow::Context;

use nxprof_common::device::host::HostResult;
use nxprof_common::{config::Config, info, success};
use nxprof_core::reconcile::reconcile;
use nxprof_core::report::{self, ReportMode};
use nxprof_protocols::{self as protocols, ProfileDefinition, check_cli_error};

use crate::commands::check::print_results;
use crate::terminal::print;

/// Reconciles saved command output the same way a live run would.
pub fn parse(
    usage_file: &Path,
    profiles_file: Option<&Path>,
    host: &str,
    write_csv: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let usage_output = read_output(usage_file)?;
    let usage = protocols::parse_usage(&usage_output);

    let definitions: Vec<ProfileDefinition> = match profiles_file {
        Some(path) => protocols::parse_definitions(&read_output(path)?),
        None => Vec::new(),
    };
    info!(
        "Parsed {} profiles in use and {} definitions",
        usage.len(),
        definitions.len()
    );

    let results = vec![HostResult::success(host, host, reconcile(&usage, &definitions))];

    print::header("Port Profile Results", cfg.quiet);
    print_results(&results, cfg);

    if write_csv {
        let path = report::write_csv(
            &results,
            &cfg.output_dir,
            ReportMode::from_detailed(cfg.detailed),
        )?;
        success!("CSV report generated: {}", path.display());
    }
    Ok(())
}

fn read_output(path: &Path) -> anyhow::Result<String> {
    let output =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    check_cli_error(&output).with_context(|| format!("checking {}", path.display()))?;
    Ok(output)
}
