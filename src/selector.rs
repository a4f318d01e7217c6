//! Response selection: non-repeating picks per category and a strict panic cycle.
//!
//! Each category keeps the set of indices it has already returned. A pick draws
//! uniformly from the indices not yet used; once every index has been used the set
//! is cleared before the next draw, never during it. The panic cycle ignores
//! randomness entirely and walks its list in order.

use std::collections::{BTreeSet, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::cycle_index::step_wrapping;
use crate::error::SelectError;
use crate::pools::{CategoryPool, CATEGORY_POOLS, DIAGNOSTICS, PANIC_RESPONSES, THOUGHTS};
use crate::telemetry::{PANIC_TARGET, SELECTION_TARGET};

/// Indices of one pool returned since the last reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageState {
    used: BTreeSet<usize>,
}

impl UsageState {
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.used.contains(&index)
    }

    /// Indices in `[0, pool_len)` that have not been returned yet.
    fn available(&self, pool_len: usize) -> Vec<usize> {
        (0..pool_len).filter(|idx| !self.used.contains(idx)).collect()
    }

    fn refill_if_exhausted(&mut self, pool_len: usize) -> bool {
        if self.used.len() >= pool_len {
            self.used.clear();
            true
        } else {
            false
        }
    }

    fn mark(&mut self, index: usize) {
        self.used.insert(index);
    }
}

/// Per-category usage counters, as returned by [`ResponseSelector::usage`] and
/// written by the script runner's JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub used_count: usize,
    pub total_in_pool: usize,
}

/// Round-robin cursor over the panic list.
#[derive(Debug, Clone)]
pub struct PanicCycle {
    entries: &'static [&'static str],
    cursor: usize,
}

impl PanicCycle {
    #[must_use]
    pub fn new(entries: &'static [&'static str]) -> Self {
        Self { entries, cursor: 0 }
    }

    /// Index the next call to [`PanicCycle::next_response`] will emit.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Emit the entry under the cursor and advance by one, wrapping at the end.
    pub fn next_response(&mut self) -> &'static str {
        let response = self.entries.get(self.cursor).copied().unwrap_or_default();
        self.cursor = step_wrapping(self.cursor, self.entries.len(), 1);
        response
    }
}

/// Owner of every piece of mutable selection state.
#[derive(Debug)]
pub struct ResponseSelector<R> {
    pools: &'static [CategoryPool],
    usage: HashMap<&'static str, UsageState>,
    panic: PanicCycle,
    thoughts: &'static [&'static str],
    diagnostics: &'static [&'static str],
    rng: R,
}

impl ResponseSelector<StdRng> {
    /// Selector over the built-in pools seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Selector over the built-in pools with a reproducible random sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ResponseSelector<R> {
    /// Selector over the built-in pools using `rng` for every random draw.
    pub fn new(rng: R) -> Self {
        Self::with_pools(CATEGORY_POOLS, PANIC_RESPONSES, THOUGHTS, DIAGNOSTICS, rng)
    }

    /// Selector over caller-supplied pools.
    pub fn with_pools(
        pools: &'static [CategoryPool],
        panic: &'static [&'static str],
        thoughts: &'static [&'static str],
        diagnostics: &'static [&'static str],
        rng: R,
    ) -> Self {
        let usage = pools
            .iter()
            .map(|pool| (pool.key, UsageState::default()))
            .collect();
        Self {
            pools,
            usage,
            panic: PanicCycle::new(panic),
            thoughts,
            diagnostics,
            rng,
        }
    }

    /// Pick a response from `category` that has not been returned since the last reset.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidCategory`] when the key names no pool or an
    /// empty one. Usage state is untouched in that case.
    pub fn select_for_category(&mut self, category: &str) -> Result<&'static str, SelectError> {
        let pool = self
            .pool(category)
            .ok_or_else(|| SelectError::InvalidCategory(category.to_string()))?;
        let total = pool.responses.len();
        let usage = self.usage.entry(pool.key).or_default();

        if usage.refill_if_exhausted(total) {
            tracing::debug!(category = pool.key, "usage exhausted; starting a new cycle");
        }
        let available = usage.available(total);
        let index = available[self.rng.random_range(0..available.len())];
        usage.mark(index);
        let response = pool.responses[index];

        tracing::info!(
            target: SELECTION_TARGET,
            category = pool.key,
            response,
            used_count = usage.used_count(),
            total_in_pool = total,
            "category response selected"
        );
        Ok(response)
    }

    /// Next panic response in strict round-robin order.
    pub fn select_panic_response(&mut self) -> &'static str {
        let response = self.panic.next_response();
        tracing::info!(
            target: PANIC_TARGET,
            action = "panic",
            response,
            next_index = self.panic.cursor(),
            "panic response selected"
        );
        response
    }

    /// Uniform pick, with replacement, from the thought pool.
    pub fn pick_random_thought(&mut self) -> &'static str {
        pick_any(self.thoughts, &mut self.rng)
    }

    /// Uniform pick, with replacement, from the diagnostic pool.
    pub fn pick_random_diagnostic(&mut self) -> &'static str {
        pick_any(self.diagnostics, &mut self.rng)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R> ResponseSelector<R> {
    /// True when `category` names a pool with at least one entry.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.pool(category).is_some()
    }

    /// Configured categories in display order. Empty pools are skipped.
    pub fn categories(&self) -> impl Iterator<Item = &'static CategoryPool> + '_ {
        self.pools.iter().filter(|pool| !pool.responses.is_empty())
    }

    #[must_use]
    pub fn usage(&self, category: &str) -> Option<UsageSnapshot> {
        let pool = self.pool(category)?;
        let used_count = self
            .usage
            .get(pool.key)
            .map(UsageState::used_count)
            .unwrap_or(0);
        Some(UsageSnapshot {
            used_count,
            total_in_pool: pool.responses.len(),
        })
    }

    #[must_use]
    pub fn panic_cursor(&self) -> usize {
        self.panic.cursor()
    }

    fn pool(&self, category: &str) -> Option<&'static CategoryPool> {
        self.pools
            .iter()
            .find(|pool| pool.key == category && !pool.responses.is_empty())
    }
}

fn pick_any<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    if pool.is_empty() {
        return "";
    }
    pool[rng.random_range(0..pool.len())]
}
