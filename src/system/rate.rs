//! Utilization derivation from paired monotonic tick counters.
//!
//! Kernel CPU accounting exposes cumulative tick counters that only ever grow
//! (absent a reset). A utilization ratio is the active-tick delta divided by
//! the total-tick delta between two readings of the *same* entity.

/// One point-in-time reading of an idle/active tick counter pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterPair {
    pub idle: u64,
    pub active: u64,
}

impl CounterPair {
    pub fn new(idle: u64, active: u64) -> Self {
        Self { idle, active }
    }

    pub fn total(&self) -> u64 {
        self.idle + self.active
    }
}

/// Computes the utilization ratio over the window between two readings.
///
/// Degenerate windows (`cur_total <= prev_total`, i.e. no elapsed ticks or a
/// counter reset) yield `0.0` rather than a division by a non-positive
/// denominator. The result is clamped to `[0.0, 1.0]` and is never NaN.
pub fn compute_utilization(
    prev_active: u64,
    prev_total: u64,
    cur_active: u64,
    cur_total: u64,
) -> f64 {
    if cur_total <= prev_total {
        return 0.0;
    }
    let active_delta = cur_active.saturating_sub(prev_active) as f64;
    let total_delta = (cur_total - prev_total) as f64;
    (active_delta / total_delta).clamp(0.0, 1.0)
}
