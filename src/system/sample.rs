use super::rate::{CounterPair, compute_utilization};

/// Delta state for one tracked process.
///
/// Holds exactly one prior counter reading (a sliding window of one) and the
/// utilization derived from the most recent update. Owned exclusively by the
/// [`ProcessTable`](super::table::ProcessTable); created when a pid first
/// appears in a refresh and dropped when it disappears.
#[derive(Clone, Debug)]
pub struct ProcessSample {
    pid: u32,
    prev_active: u64,
    prev_total: u64,
    utilization: f64,
}

impl ProcessSample {
    /// Seeds the sample from a single point-in-time reading. No delta is
    /// possible yet, so utilization starts at zero.
    pub fn new(pid: u32, seed: CounterPair) -> Self {
        Self {
            pid,
            prev_active: seed.active,
            prev_total: seed.total(),
            utilization: 0.0,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// Advances the sliding window: derive utilization from the stored prior
    /// reading and `reading`, then make `reading` the new prior.
    pub fn update(&mut self, reading: CounterPair) {
        self.utilization = compute_utilization(
            self.prev_active,
            self.prev_total,
            reading.active,
            reading.total(),
        );
        self.prev_active = reading.active;
        self.prev_total = reading.total();
    }
}
