//! Interaction state machine: idle → processing → responding, plus the panic bypass.
//!
//! The controller owns the selector, the timer queue, and the presenter. Every
//! accepted category selection and every panic bumps a generation counter; timer
//! events carry the generation they were scheduled under and are dropped when it
//! no longer matches, so a superseded reveal can never overwrite newer content.

use std::time::Instant;

use rand::Rng;

use crate::error::SelectError;
use crate::presenter::{AvatarState, Presenter};
use crate::selector::ResponseSelector;
use crate::timers::{deadline_after, draw_think_delay, TimerEvent, TimerQueue, Timing};

/// Where the widget is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Processing(String),
    Responding,
}

/// Whether an inbound call changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Accepted,
    /// Category inputs are disabled while processing.
    Ignored,
}

pub struct InteractionController<P, R> {
    selector: ResponseSelector<R>,
    presenter: P,
    timers: TimerQueue,
    timing: Timing,
    state: InteractionState,
    generation: u64,
    pending_response: Option<&'static str>,
    inputs_enabled: bool,
}

impl<P: Presenter, R: Rng> InteractionController<P, R> {
    pub fn new(selector: ResponseSelector<R>, presenter: P, timing: Timing) -> Self {
        Self {
            selector,
            presenter,
            timers: TimerQueue::new(),
            timing,
            state: InteractionState::Idle,
            generation: 0,
            pending_response: None,
            inputs_enabled: true,
        }
    }

    /// Handle a category button press.
    ///
    /// The response is chosen (and its usage recorded) immediately; it is only
    /// shown once the thinking delay elapses.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidCategory`] for unknown or empty categories.
    /// State, usage, timers, and the presenter are left untouched.
    pub fn select_category(&mut self, category: &str, now: Instant) -> Result<Dispatch, SelectError> {
        if !self.selector.contains(category) {
            tracing::error!(category, "invalid category");
            return Err(SelectError::InvalidCategory(category.to_string()));
        }
        if !self.inputs_enabled {
            tracing::debug!(category, state = ?self.state, "category ignored while inputs disabled");
            return Ok(Dispatch::Ignored);
        }

        let response = self.selector.select_for_category(category)?;
        let thought = self.selector.pick_random_thought();
        self.generation += 1;
        self.pending_response = Some(response);
        self.state = InteractionState::Processing(category.to_string());

        self.presenter.hide_response();
        self.presenter.hide_diagnostic();
        self.set_inputs_enabled(false);
        self.presenter.set_avatar_state(AvatarState::Processing);
        self.presenter.render_thought(thought);

        let delay = draw_think_delay(self.selector.rng_mut(), &self.timing);
        self.timers.schedule(
            deadline_after(now, delay),
            TimerEvent::Reveal {
                generation: self.generation,
            },
        );
        tracing::debug!(
            category,
            generation = self.generation,
            delay_ms = delay.as_millis() as u64,
            "processing started"
        );
        Ok(Dispatch::Accepted)
    }

    /// Handle the panic button: always accepted, shown immediately.
    pub fn panic(&mut self, now: Instant) -> &'static str {
        let response = self.selector.select_panic_response();
        self.generation += 1;
        self.pending_response = None;
        self.state = InteractionState::Responding;

        self.presenter.hide_thought();
        self.presenter.hide_diagnostic();
        self.presenter.render_response(response);
        self.presenter.set_avatar_state(AvatarState::Responding);
        // A superseded reveal will never re-enable inputs, so panic has to.
        if !self.inputs_enabled {
            self.set_inputs_enabled(true);
        }
        self.schedule_settle(now);
        response
    }

    /// Fire every timer due at or before `now`. Returns how many took effect.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Some(event) = self.timers.pop_due(now) {
            if self.apply_timer(event, now) {
                applied += 1;
            }
        }
        applied
    }

    /// Advance virtual time through every pending timer, returning the final clock.
    pub fn drain_timers(&mut self, mut now: Instant) -> Instant {
        while let Some(deadline) = self.timers.next_deadline() {
            now = now.max(deadline);
            self.fire_due(now);
        }
        now
    }

    fn apply_timer(&mut self, event: TimerEvent, now: Instant) -> bool {
        match event {
            TimerEvent::Reveal { generation } => {
                let processing = matches!(self.state, InteractionState::Processing(_));
                if generation != self.generation || !processing {
                    tracing::debug!(generation, current = self.generation, "stale reveal dropped");
                    return false;
                }
                let Some(response) = self.pending_response.take() else {
                    return false;
                };
                let diagnostic = self.selector.pick_random_diagnostic();
                self.state = InteractionState::Responding;

                self.presenter.hide_thought();
                self.presenter.set_avatar_state(AvatarState::Responding);
                self.presenter.render_response(response);
                self.presenter.render_diagnostic(diagnostic);
                self.set_inputs_enabled(true);
                self.schedule_settle(now);
                true
            }
            TimerEvent::SettleAvatar { generation } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "stale settle dropped");
                    return false;
                }
                self.presenter.set_avatar_state(AvatarState::Idle);
                true
            }
        }
    }
}

impl<P: Presenter, R> InteractionController<P, R> {
    fn set_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
        self.presenter.set_inputs_enabled(enabled);
    }

    fn schedule_settle(&mut self, now: Instant) {
        self.timers.schedule(
            deadline_after(now, self.timing.settle_delay()),
            TimerEvent::SettleAvatar {
                generation: self.generation,
            },
        );
    }
}

impl<P, R> InteractionController<P, R> {
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn inputs_enabled(&self) -> bool {
        self.inputs_enabled
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn selector(&self) -> &ResponseSelector<R> {
        &self.selector
    }

    #[must_use]
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
