//! Deadline queue standing in for UI timeouts on a single-threaded event loop.
//!
//! Entries cannot be cancelled. Consumers tag each entry with a generation and
//! treat stale ones as no-ops when they fire.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use rand::Rng;

/// Lower bound of the simulated thinking delay (inclusive).
pub const THINK_MIN_MS: u64 = 2_000;
/// Upper bound of the simulated thinking delay (exclusive).
pub const THINK_MAX_MS: u64 = 4_000;
/// How long the avatar keeps its "responding" pose after a reveal.
pub const SETTLE_MS: u64 = 500;

/// Longest delay the queue accepts; larger requests are clamped to it.
pub const MAX_TIMER_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Deadline `delay` after `now`, clamped so oversized timings cannot overflow `Instant`.
#[must_use]
pub fn deadline_after(now: Instant, delay: Duration) -> Instant {
    let delay = delay.min(MAX_TIMER_DELAY);
    now.checked_add(delay).unwrap_or(now)
}

/// Timing knobs for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub think_min_ms: u64,
    pub think_max_ms: u64,
    pub settle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            think_min_ms: THINK_MIN_MS,
            think_max_ms: THINK_MAX_MS,
            settle_ms: SETTLE_MS,
        }
    }
}

impl Timing {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Draw an integer-millisecond thinking delay in `[think_min_ms, think_max_ms)`.
///
/// A degenerate range (`min >= max`) yields exactly `think_min_ms`.
pub fn draw_think_delay<R: Rng + ?Sized>(rng: &mut R, timing: &Timing) -> Duration {
    let ms = if timing.think_min_ms < timing.think_max_ms {
        rng.random_range(timing.think_min_ms..timing.think_max_ms)
    } else {
        timing.think_min_ms
    };
    Duration::from_millis(ms)
}

/// Callbacks the controller schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerEvent {
    /// Show the response computed when processing started.
    Reveal { generation: u64 },
    /// Drop the transient "responding" avatar pose.
    SettleAvatar { generation: u64 },
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: Instant,
    seq: u64,
    event: TimerEvent,
}

/// Min-heap of pending timer events ordered by deadline, then insertion order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, event }));
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Remove and return the earliest event whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerEvent> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pop_due_respects_deadline_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(
            start + Duration::from_millis(30),
            TimerEvent::Reveal { generation: 1 },
        );
        queue.schedule(
            start + Duration::from_millis(10),
            TimerEvent::SettleAvatar { generation: 0 },
        );

        assert_eq!(queue.pop_due(start), None);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(10)));
        let later = start + Duration::from_millis(30);
        assert_eq!(
            queue.pop_due(later),
            Some(TimerEvent::SettleAvatar { generation: 0 })
        );
        assert_eq!(
            queue.pop_due(later),
            Some(TimerEvent::Reveal { generation: 1 })
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let due = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(due, TimerEvent::Reveal { generation: 9 });
        queue.schedule(due, TimerEvent::SettleAvatar { generation: 1 });
        assert_eq!(queue.pop_due(due), Some(TimerEvent::Reveal { generation: 9 }));
        assert_eq!(
            queue.pop_due(due),
            Some(TimerEvent::SettleAvatar { generation: 1 })
        );
    }

    #[test]
    fn deadline_after_clamps_huge_delays() {
        let now = Instant::now();
        assert_eq!(
            deadline_after(now, Duration::from_millis(250)),
            now + Duration::from_millis(250)
        );
        assert_eq!(
            deadline_after(now, Duration::from_millis(u64::MAX)),
            now + MAX_TIMER_DELAY
        );
    }

    #[test]
    fn degenerate_range_uses_lower_bound() {
        let mut rng = StdRng::seed_from_u64(5);
        let timing = Timing {
            think_min_ms: 7,
            think_max_ms: 7,
            settle_ms: 0,
        };
        assert_eq!(draw_think_delay(&mut rng, &timing), Duration::from_millis(7));
    }
}
