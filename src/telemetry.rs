//! Structured trace logging: the widget's diagnostic sink.
//!
//! Selection and panic events carry their own targets so a trace file can be
//! grepped for one stream. Stdout belongs to the UI, so the subscriber writes JSON
//! lines to a file. Only this crate's events are kept; `--log-debug` adds the
//! timer and gating chatter.

use crate::config::AppConfig;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

const TRACE_LOG_ENV: &str = "SPONSORTERM_TRACE_LOG";
const CRATE_TARGET: &str = "sponsorterm";

/// Target of the per-selection `{category, response, used_count, total_in_pool}` event.
pub(crate) const SELECTION_TARGET: &str = "sponsorterm::selection";
/// Target of the per-panic `{action, response, next_index}` event.
pub(crate) const PANIC_TARGET: &str = "sponsorterm::panic";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// File the JSON trace subscriber appends to.
pub fn tracing_log_path() -> PathBuf {
    env::var(TRACE_LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("sponsorterm_trace.jsonl"))
}

#[inline]
fn tracing_enabled(config: &AppConfig) -> bool {
    config.logs && !config.no_logs
}

fn trace_targets(config: &AppConfig) -> Targets {
    let level = if config.log_debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_target(SELECTION_TARGET, Level::INFO)
        .with_target(PANIC_TARGET, Level::INFO)
}

fn init_tracing_once(config: &AppConfig, once: &OnceLock<()>) {
    if !tracing_enabled(config) {
        return;
    }

    let _ = once.get_or_init(|| {
        let path = tracing_log_path();
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .with_filter(trace_targets(config));
        let subscriber = tracing_subscriber::registry().with(json_layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Install the process-wide subscriber when `--logs` is on. Safe to call twice.
pub fn init_tracing(config: &AppConfig) {
    init_tracing_once(config, &TRACING_INIT);
}
