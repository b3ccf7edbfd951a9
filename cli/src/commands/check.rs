use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::Instrument;

use crate::{
    mprint,
    terminal::{colors, format, print, progress},
};
use nxprof_common::device::{credentials::Credentials, host::HostResult};
use nxprof_common::{config::Config, info, success, warn};
use nxprof_core::inventory::{self, Inventory};
use nxprof_core::report::{self, ReportMode};
use nxprof_core::runner::{self, Runner};
use nxprof_core::session::SshConnector;

pub async fn check(credentials: &Credentials, cfg: &Config) -> anyhow::Result<()> {
    let created = inventory::create_inventory_files(&cfg.hosts_file, &cfg.inventory_dir)?;
    info!("Created inventory for {created} hosts");

    let inventory = Inventory::load(&cfg.inventory_dir, cfg.port)?;
    if inventory.is_empty() {
        warn!("No hosts found in {}", cfg.hosts_file.display());
    }
    info!("Initialized inventory with {} devices", inventory.len());

    let runner = Runner::new(Arc::new(SshConnector::from_config(cfg)), cfg.worker_count());
    info!("Querying switches with {} workers", runner.workers());

    let start_time: Instant = Instant::now();
    let span = progress::collection_span(inventory.len());
    let results: Vec<HostResult> = runner
        .run(
            &inventory.hosts,
            credentials,
            Some(progress::tracker(span.clone())),
        )
        .instrument(span)
        .await;

    check_ends(&results, start_time.elapsed(), cfg);

    let path = report::write_csv(
        &results,
        &cfg.output_dir,
        ReportMode::from_detailed(cfg.detailed),
    )?;
    success!("CSV report generated: {}", path.display());
    Ok(())
}

fn check_ends(results: &[HostResult], total_time: Duration, cfg: &Config) {
    if results.is_empty() {
        print::header("zero hosts checked", cfg.quiet);
        print::no_results();
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("Port Profile Results", cfg.quiet);
    print_results(results, cfg);
    print_summary(results, total_time, cfg);
}

pub(crate) fn print_results(results: &[HostResult], cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    for (idx, result) in results.iter().enumerate() {
        print::tree_head(idx, &result.host);
        print::as_tree_one_level(format::host_details(result, cfg.detailed));
        if idx + 1 != results.len() {
            mprint!();
        }
    }
}

fn print_summary(results: &[HostResult], total_time: Duration, cfg: &Config) {
    let summary = runner::summarize(results);
    let successful: ColoredString = format!("{} successful", summary.successful).bold().green();
    let failed: ColoredString = format!("{} failed", summary.failed).bold().red();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString =
        &format!("Summary: {successful}, {failed} in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
