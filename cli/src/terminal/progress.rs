use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use nxprof_core::runner::ProgressCallback;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸ ")
        .tick_strings(TICKS)
}

/// Span that owns the progress bar for a collection run.
pub fn collection_span(total: usize) -> Span {
    let span = info_span!("collection", indicatif.pb_show = true);
    span.pb_set_style(&style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Checking switches");
    span
}

/// Advances the bar on `span` once per finished host.
pub fn tracker(span: Span) -> ProgressCallback {
    Box::new(move |_done: usize| span.pb_inc(1))
}
