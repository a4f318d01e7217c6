//! Core runtime loop: input events and timer deadlines on one thread.
//!
//! The input thread only forwards semantic events; the controller, its timers, and
//! the view model are touched exclusively here.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{select, Receiver};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use sponsorterm::{Dispatch, InteractionController, WidgetState};

use crate::buttons::{ButtonAction, ButtonRow};
use crate::input::InputEvent;
use crate::render::draw;
use crate::session_stats::SessionStats;

/// Longest the loop sleeps when no timer is pending.
const EVENT_LOOP_IDLE_MS: u64 = 250;

pub(crate) struct EventLoopState<R> {
    pub(crate) controller: InteractionController<WidgetState, R>,
    pub(crate) buttons: ButtonRow,
    pub(crate) stats: SessionStats,
    drawn_revision: Option<u64>,
    force_redraw: bool,
}

impl<R: Rng> EventLoopState<R> {
    pub(crate) fn new(controller: InteractionController<WidgetState, R>) -> Self {
        let buttons = ButtonRow::new(controller.selector().categories());
        Self {
            controller,
            buttons,
            stats: SessionStats::new(),
            drawn_revision: None,
            force_redraw: true,
        }
    }

    fn needs_redraw(&self) -> bool {
        self.force_redraw || self.drawn_revision != Some(self.controller.presenter().revision)
    }

    fn press(&mut self, action: ButtonAction, now: Instant) {
        match action {
            ButtonAction::Panic => {
                self.controller.panic(now);
                self.stats.record_panic();
            }
            ButtonAction::Category(key) => match self.controller.select_category(key, now) {
                Ok(Dispatch::Accepted) => self.stats.record_pick(key),
                Ok(Dispatch::Ignored) => self.stats.record_ignored(),
                Err(err) => {
                    // Keys come from the configured pools, so this means the pools changed.
                    tracing::error!(%err, "button mapped to an unknown category");
                    self.stats.record_rejected();
                }
            },
        }
    }

    /// Apply one input event. Returns `false` when the loop should stop.
    pub(crate) fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::Category(position) => {
                if let Some(key) = self.buttons.category_at(position) {
                    self.press(ButtonAction::Category(key), now);
                }
            }
            InputEvent::Panic => self.press(ButtonAction::Panic, now),
            InputEvent::FocusNext => {
                self.buttons.move_focus(1);
                self.force_redraw = true;
            }
            InputEvent::FocusPrev => {
                self.buttons.move_focus(-1);
                self.force_redraw = true;
            }
            InputEvent::Activate => {
                if let Some(action) = self.buttons.focused_action() {
                    self.press(action, now);
                }
            }
            InputEvent::Redraw => self.force_redraw = true,
            InputEvent::Exit => return false,
        }
        true
    }

    /// How long to block before the next timer is due.
    pub(crate) fn wait_budget(&self, now: Instant) -> Duration {
        let idle = Duration::from_millis(EVENT_LOOP_IDLE_MS);
        self.controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(idle))
            .unwrap_or(idle)
    }
}

pub(crate) fn run_event_loop<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    state: &mut EventLoopState<R>,
    input_rx: &Receiver<InputEvent>,
) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut running = true;
    while running {
        let now = Instant::now();
        state.controller.fire_due(now);

        if state.needs_redraw() {
            terminal.draw(|frame| draw(frame, state.controller.presenter(), &state.buttons))?;
            state.drawn_revision = Some(state.controller.presenter().revision);
            state.force_redraw = false;
        }

        select! {
            recv(input_rx) -> event => {
                match event {
                    Ok(evt) => running = state.handle_input(evt, Instant::now()),
                    Err(_) => running = false,
                }
            }
            default(state.wait_budget(now)) => {}
        }
    }
    Ok(())
}
