//! Interaction-controller scenarios driven on an explicit clock.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sponsorterm::pools::{find_pool, PANIC_RESPONSES};
use sponsorterm::timers::{draw_think_delay, MAX_TIMER_DELAY, THINK_MAX_MS, THINK_MIN_MS};
use sponsorterm::{
    AvatarState, Dispatch, InteractionController, InteractionState, ResponseSelector,
    SelectError, Timing, WidgetState,
};

fn controller(seed: u64) -> InteractionController<WidgetState, StdRng> {
    InteractionController::new(
        ResponseSelector::seeded(seed),
        WidgetState::default(),
        Timing::default(),
    )
}

#[test]
fn full_cycle_idle_processing_responding() {
    let mut ctl = controller(10);
    let start = Instant::now();
    assert_eq!(ctl.state(), &InteractionState::Idle);

    ctl.select_category("whatdoido", start).expect("configured");
    let deadline = ctl.next_deadline().expect("reveal scheduled");
    let delay = deadline - start;
    assert!(delay >= Duration::from_millis(THINK_MIN_MS));
    assert!(delay < Duration::from_millis(THINK_MAX_MS));

    assert_eq!(ctl.fire_due(deadline), 1);
    let view = ctl.presenter();
    let pool = find_pool("whatdoido").expect("pool");
    assert!(pool.responses.contains(&view.response.as_deref().expect("response shown")));
    assert!(view.inputs_enabled);
    assert_eq!(ctl.state(), &InteractionState::Responding);

    // A new question is allowed while the avatar settle timer is pending.
    assert_eq!(
        ctl.select_category("angry", deadline + Duration::from_millis(100)),
        Ok(Dispatch::Accepted)
    );
    assert!(ctl.presenter().response.is_none());
    assert!(ctl.presenter().diagnostic.is_none());
    ctl.fire_due(deadline + Duration::from_millis(600));
    assert_eq!(ctl.presenter().avatar, AvatarState::Processing);
}

#[test]
fn usage_is_committed_at_request_time() {
    let mut ctl = controller(11);
    ctl.select_category("god", Instant::now()).expect("configured");
    assert_eq!(ctl.selector().usage("god").map(|u| u.used_count), Some(1));
    assert!(ctl.presenter().response.is_none());
}

#[test]
fn panic_during_processing_wins_over_stale_reveal() {
    let mut ctl = controller(12);
    let start = Instant::now();
    ctl.select_category("angry", start).expect("configured");
    let reveal_at = ctl.next_deadline().expect("reveal scheduled");

    let panic_at = start + Duration::from_millis(500);
    let panic_text = ctl.panic(panic_at);
    assert_eq!(panic_text, PANIC_RESPONSES[0]);
    assert_eq!(ctl.state(), &InteractionState::Responding);
    assert!(ctl.presenter().thought.is_none());
    assert!(ctl.presenter().diagnostic.is_none());
    assert!(ctl.inputs_enabled());

    let applied = ctl.fire_due(reveal_at + Duration::from_millis(1));
    assert_eq!(applied, 1, "only the panic settle should take effect");
    assert_eq!(ctl.presenter().response.as_deref(), Some(panic_text));
    assert!(ctl.presenter().diagnostic.is_none());
    assert_eq!(ctl.state(), &InteractionState::Responding);
}

#[test]
fn superseded_reveal_is_dropped_while_a_newer_question_is_processing() {
    let timing = Timing {
        think_min_ms: 2_000,
        think_max_ms: 2_001,
        settle_ms: 500,
    };
    let mut ctl = InteractionController::new(
        ResponseSelector::seeded(15),
        WidgetState::default(),
        timing,
    );
    let start = Instant::now();

    ctl.select_category("angry", start).expect("configured");
    let angry_reveal = ctl.next_deadline().expect("reveal scheduled");
    ctl.panic(start + Duration::from_millis(100));
    assert_eq!(
        ctl.select_category("god", start + Duration::from_millis(200)),
        Ok(Dispatch::Accepted)
    );

    ctl.fire_due(angry_reveal);
    assert_eq!(ctl.state(), &InteractionState::Processing("god".to_string()));
    assert!(ctl.presenter().response.is_none());
    assert!(ctl.presenter().diagnostic.is_none());
    assert!(ctl.presenter().thought.is_some());
    assert!(!ctl.inputs_enabled());
    assert!(!ctl.presenter().inputs_enabled);
    assert_eq!(ctl.presenter().avatar, AvatarState::Processing);

    let god_reveal = ctl.next_deadline().expect("god reveal still pending");
    assert_eq!(ctl.fire_due(god_reveal), 1);
    let god = find_pool("god").expect("pool");
    let shown = ctl.presenter().response.as_deref().expect("god response shown");
    assert!(god.responses.contains(&shown));
    assert!(ctl.presenter().diagnostic.is_some());
    assert!(ctl.inputs_enabled());
}

#[test]
fn oversized_timing_is_clamped_instead_of_overflowing() {
    let timing = Timing {
        think_min_ms: u64::MAX - 1,
        think_max_ms: u64::MAX,
        settle_ms: u64::MAX,
    };
    let mut ctl = InteractionController::new(
        ResponseSelector::seeded(16),
        WidgetState::default(),
        timing,
    );
    let start = Instant::now();

    ctl.select_category("backfired", start).expect("configured");
    let reveal_at = ctl.next_deadline().expect("reveal scheduled");
    assert_eq!(reveal_at, start + MAX_TIMER_DELAY);
    ctl.panic(start);
    assert_eq!(ctl.pending_timers(), 2);
}

#[test]
fn panic_is_accepted_in_every_state() {
    let mut ctl = controller(13);
    let mut now = Instant::now();
    let mut panics = Vec::new();

    panics.push(ctl.panic(now));
    ctl.select_category("stupid", now).expect("configured");
    panics.push(ctl.panic(now));
    now = ctl.drain_timers(now);
    ctl.select_category("stupid", now).expect("configured");
    now = ctl.drain_timers(now);
    assert_eq!(ctl.state(), &InteractionState::Responding);
    panics.push(ctl.panic(now));
    panics.push(ctl.panic(now));

    assert_eq!(
        panics,
        vec![
            PANIC_RESPONSES[0],
            PANIC_RESPONSES[1],
            PANIC_RESPONSES[2],
            PANIC_RESPONSES[0]
        ]
    );
}

#[test]
fn invalid_category_keeps_processing_state_and_timers() {
    let mut ctl = controller(14);
    let start = Instant::now();
    ctl.select_category("okiwill", start).expect("configured");
    let before_state = ctl.state().clone();
    let before_view = ctl.presenter().clone();
    let before_timers = ctl.pending_timers();

    assert_eq!(
        ctl.select_category("nonexistent", start),
        Err(SelectError::InvalidCategory("nonexistent".to_string()))
    );
    assert_eq!(ctl.state(), &before_state);
    assert_eq!(ctl.presenter(), &before_view);
    assert_eq!(ctl.pending_timers(), before_timers);
}

#[test]
fn delays_stay_in_window_across_many_draws() {
    let mut rng = StdRng::seed_from_u64(77);
    let timing = Timing::default();
    for _ in 0..10_000 {
        let ms = draw_think_delay(&mut rng, &timing).as_millis();
        assert!((2_000..4_000).contains(&ms), "delay {ms} out of range");
    }
}

proptest! {
    #[test]
    fn custom_timing_windows_are_respected(min in 0u64..5_000, span in 1u64..5_000, seed in any::<u64>()) {
        let timing = Timing { think_min_ms: min, think_max_ms: min + span, settle_ms: 0 };
        let mut rng = StdRng::seed_from_u64(seed);
        let ms = draw_think_delay(&mut rng, &timing).as_millis() as u64;
        prop_assert!(ms >= min && ms < min + span);
    }
}
