use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::{IndicatifFilter, hide_indicatif_span_fields};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, DefaultFields, Writer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use nxprof_common::log::{PRINT_TARGET, SUCCESS_TARGET};

const LOG_ENV: &str = "NXPROF_LOG";

pub struct NxprofFormatter;

impl<S, N> FormatEvent<S, N> for NxprofFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            if meta.target() == SUCCESS_TARGET {
                ("[+]", |s| s.green().bold())
            } else {
                match *meta.level() {
                    Level::TRACE => ("[ ]", |s| s.dimmed()),
                    Level::DEBUG => ("[?]", |s| s.blue()),
                    Level::INFO => ("[*]", |s| s.bright_blue().bold()),
                    Level::WARN => ("[!]", |s| s.yellow().bold()),
                    Level::ERROR => ("[-]", |s| s.red().bold()),
                }
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Pulls the `raw_msg` field out of a terminal print event.
#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

fn build_filter(verbose: bool) -> anyhow::Result<EnvFilter> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("info"),
    };
    // Terminal output is routed through the logger and must survive any filter.
    Ok(filter.add_directive(format!("{PRINT_TARGET}=info").parse()?))
}

/// Installs the console, progress bar and log file layers.
///
/// The returned guard flushes the log file on drop and must live until exit.
pub fn init_logging(log_file: &Path, verbose: bool) -> anyhow::Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", log_file.display()))?;
    fs::create_dir_all(dir).with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let indicatif_layer = IndicatifLayer::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(NxprofFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .fmt_fields(hide_indicatif_span_fields(DefaultFields::new()))
        .with_writer(file_writer)
        .with_filter(filter_fn(|meta| meta.target() != PRINT_TARGET));

    tracing_subscriber::registry()
        .with(build_filter(verbose)?)
        .with(console_layer)
        .with(file_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .try_init()
        .context("installing the log subscriber")?;

    Ok(guard)
}
