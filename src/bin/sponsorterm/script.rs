//! Headless runner: applies scripted presses on a virtual clock and prints each outcome.
//!
//! Every step waits for all pending timers of the previous one, so the reveal and
//! the avatar settle always land before the next press. No real time passes.

use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use sponsorterm::{Dispatch, InteractionController, UsageSnapshot, WidgetState};

use crate::session_stats::SessionStats;

const PANIC_STEP: &str = "panic";

#[derive(Debug, Serialize)]
pub(crate) struct StepRecord {
    pub(crate) step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) thought: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) diagnostic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) usage: Option<UsageSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) next_panic_index: Option<usize>,
    pub(crate) elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl StepRecord {
    fn new(step: &str) -> Self {
        Self {
            step: step.to_string(),
            thought: None,
            response: None,
            diagnostic: None,
            usage: None,
            next_panic_index: None,
            elapsed_ms: 0,
            error: None,
        }
    }

    fn text_lines(&self) -> Vec<String> {
        let tag = &self.step;
        if let Some(error) = &self.error {
            return vec![format!("[{tag}] error: {error}")];
        }
        let mut lines = Vec::new();
        if let Some(thought) = &self.thought {
            lines.push(format!("[{tag}] thinking: {thought}"));
        }
        if let Some(response) = &self.response {
            lines.push(format!("[{tag}] sponsor: {response}"));
        }
        if let Some(diagnostic) = &self.diagnostic {
            lines.push(format!("[{tag}] diagnostic: {diagnostic}"));
        }
        lines
    }
}

/// Split a script into trimmed, non-empty steps.
pub(crate) fn parse_steps(script: &str) -> Vec<&str> {
    script
        .split([',', ';'])
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .collect()
}

/// Run one step to quiescence and describe what the widget ended up showing.
pub(crate) fn run_step<R: Rng>(
    controller: &mut InteractionController<WidgetState, R>,
    step: &str,
    clock: &mut Instant,
    stats: &mut SessionStats,
) -> StepRecord {
    let mut record = StepRecord::new(step);
    let started = *clock;

    if step.eq_ignore_ascii_case(PANIC_STEP) {
        controller.panic(started);
        stats.record_panic();
        record.next_panic_index = Some(controller.selector().panic_cursor());
    } else {
        match controller.select_category(step, started) {
            Ok(Dispatch::Accepted) => {
                if let Some(pool) = controller.selector().categories().find(|p| p.key == step) {
                    stats.record_pick(pool.key);
                }
                record.thought = controller.presenter().thought.clone();
                record.usage = controller.selector().usage(step);
            }
            Ok(Dispatch::Ignored) => stats.record_ignored(),
            Err(err) => {
                stats.record_rejected();
                record.error = Some(err.to_string());
                return record;
            }
        }
    }

    *clock = controller.drain_timers(started);
    let view = controller.presenter();
    record.response = view.response.clone();
    record.diagnostic = view.diagnostic.clone();
    record.elapsed_ms = clock.saturating_duration_since(started).as_millis() as u64;
    record
}

/// Run every step of `script`, writing text or JSON lines to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` or serializing a record fails.
pub(crate) fn run_script<R: Rng>(
    controller: &mut InteractionController<WidgetState, R>,
    script: &str,
    json: bool,
    stats: &mut SessionStats,
    out: &mut impl Write,
) -> Result<()> {
    let mut clock = Instant::now();
    for step in parse_steps(script) {
        let record = run_step(controller, step, &mut clock, stats);
        if json {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            for line in record.text_lines() {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
