//! SponsorTerm entrypoint: a terminal frontend for the sarcastic sponsor widget.
//!
//! # Architecture
//!
//! - Input thread: reads terminal key events and forwards semantic `InputEvent`s
//! - Event loop: owns the interaction controller, fires timers, redraws on change
//! - Script mode: drives the same controller on a virtual clock without a terminal

mod buttons;
mod event_loop;
mod input;
mod render;
mod script;
mod session_stats;

use anyhow::{bail, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Write};

use sponsorterm::config::AppConfig;
use sponsorterm::terminal_restore::TerminalRestoreGuard;
use sponsorterm::{init_tracing, InteractionController, ResponseSelector, WidgetState};

use crate::event_loop::{run_event_loop, EventLoopState};
use crate::input::spawn_input_thread;
use crate::session_stats::{format_session_stats, SessionStats};

/// Max pending input events before the input thread blocks.
const INPUT_CHANNEL_CAPACITY: usize = 64;

fn list_categories(out: &mut impl Write) -> io::Result<()> {
    let selector = ResponseSelector::seeded(0);
    writeln!(out, "Available categories:")?;
    for (idx, pool) in selector.categories().enumerate() {
        writeln!(
            out,
            "  {}. {:<10} {} ({} responses)",
            idx + 1,
            pool.key,
            pool.label,
            pool.responses.len()
        )?;
    }
    writeln!(out, "  p. panic      round-robin, no waiting")?;
    Ok(())
}

fn run_terminal_ui(
    controller: InteractionController<WidgetState, rand::rngs::StdRng>,
) -> Result<SessionStats> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        bail!("sponsorterm needs an interactive terminal; use --script for headless runs");
    }

    let terminal_guard = TerminalRestoreGuard::new();
    terminal_guard.enable_raw_mode()?;
    let mut stdout = io::stdout();
    terminal_guard.enter_alt_screen(&mut stdout)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    // The input thread blocks on terminal reads; it ends with the process.
    let _input_handle = spawn_input_thread(input_tx);

    let mut state = EventLoopState::new(controller);
    let result = run_event_loop(&mut terminal, &mut state, &input_rx);

    drop(terminal);
    terminal_guard.restore();
    result.map(|()| state.stats)
}

fn main() -> Result<()> {
    let config = AppConfig::parse();
    config.validate()?;
    init_tracing(&config);

    if config.list_categories {
        list_categories(&mut io::stdout().lock())?;
        return Ok(());
    }

    let selector = match config.seed {
        Some(seed) => ResponseSelector::seeded(seed),
        None => ResponseSelector::from_os_rng(),
    };
    let mut controller =
        InteractionController::new(selector, WidgetState::default(), config.timing());
    tracing::info!(seed = ?config.seed, timing = ?config.timing(), "sponsorterm starting");

    let stats = match config.script.as_deref() {
        Some(script_text) => {
            let mut stats = SessionStats::new();
            let mut out = io::stdout().lock();
            script::run_script(&mut controller, script_text, config.json, &mut stats, &mut out)?;
            stats
        }
        None => run_terminal_ui(controller)?,
    };

    if config.print_stats {
        let summary = format_session_stats(&stats);
        if !summary.is_empty() {
            println!("{summary}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_categories_names_every_key_and_panic() {
        let mut out = Vec::new();
        list_categories(&mut out).expect("list categories");
        let text = String::from_utf8(out).expect("utf8");
        for key in [
            "backfired",
            "god",
            "unwilling",
            "okiwill",
            "whatdoido",
            "stupid",
            "angry",
        ] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.contains("7. angry"));
        assert!(text.contains("panic"));
    }
}
