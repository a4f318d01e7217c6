//! CLI flag schema so widget timing, seeding, and logging are explicit at startup.

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};

use crate::timers::{Timing, SETTLE_MS, THINK_MAX_MS, THINK_MIN_MS};

/// Longest thinking delay accepted from the command line.
pub const MAX_THINK_MS: u64 = 60_000;
/// Longest avatar settle delay accepted from the command line.
pub const MAX_SETTLE_MS: u64 = 10_000;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sponsorterm",
    about = "SponsorTerm: did you call your sponsor first?",
    version
)]
pub struct AppConfig {
    /// Print the configured categories and exit
    #[arg(long = "list-categories", action = ArgAction::SetTrue)]
    pub list_categories: bool,

    /// Run without a terminal UI: comma or semicolon separated category keys or "panic"
    #[arg(long = "script", value_name = "STEPS")]
    pub script: Option<String>,

    /// Emit one JSON object per script step instead of text
    #[arg(long = "json", action = ArgAction::SetTrue, requires = "script")]
    pub json: bool,

    /// Seed for reproducible picks and delays
    #[arg(long = "seed", env = "SPONSORTERM_SEED")]
    pub seed: Option<u64>,

    /// Shortest simulated thinking delay in milliseconds (inclusive)
    #[arg(long = "think-min-ms", default_value_t = THINK_MIN_MS)]
    pub think_min_ms: u64,

    /// Longest simulated thinking delay in milliseconds (exclusive)
    #[arg(long = "think-max-ms", default_value_t = THINK_MAX_MS)]
    pub think_max_ms: u64,

    /// How long the avatar holds its responding pose, in milliseconds
    #[arg(long = "settle-ms", default_value_t = SETTLE_MS)]
    pub settle_ms: u64,

    /// Write structured JSON trace events to the trace log
    #[arg(long = "logs", action = ArgAction::SetTrue)]
    pub logs: bool,

    /// Include debug-level timer and input-gating events in the trace log
    #[arg(long = "log-debug", action = ArgAction::SetTrue)]
    pub log_debug: bool,

    /// Disable all logging (overrides --logs)
    #[arg(long = "no-logs", action = ArgAction::SetTrue)]
    pub no_logs: bool,

    /// Print a session summary on exit
    #[arg(long = "print-stats", action = ArgAction::SetTrue)]
    pub print_stats: bool,
}

impl AppConfig {
    /// Reject timing combinations the controller cannot honor.
    ///
    /// # Errors
    ///
    /// Returns an error when the thinking window is empty or a delay exceeds its cap.
    pub fn validate(&self) -> Result<()> {
        if self.think_min_ms >= self.think_max_ms {
            bail!(
                "--think-min-ms ({}) must be lower than --think-max-ms ({})",
                self.think_min_ms,
                self.think_max_ms
            );
        }
        if self.think_max_ms > MAX_THINK_MS {
            bail!("--think-max-ms must be at most {MAX_THINK_MS}");
        }
        if self.settle_ms > MAX_SETTLE_MS {
            bail!("--settle-ms must be at most {MAX_SETTLE_MS}");
        }
        Ok(())
    }

    #[must_use]
    pub fn timing(&self) -> Timing {
        Timing {
            think_min_ms: self.think_min_ms,
            think_max_ms: self.think_max_ms,
            settle_ms: self.settle_ms,
        }
    }
}
