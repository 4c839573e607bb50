use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::sample::ProcessSample;
use super::source::CounterSource;

/// The live set of per-process samples.
///
/// Membership is synchronized with the live pid set once per cycle via
/// [`refresh`](ProcessTable::refresh); delta state advances only in
/// [`update_all`](ProcessTable::update_all). The table is mutated in place
/// across cycles so each sample keeps its prior counter reading.
#[derive(Debug, Default)]
pub struct ProcessTable {
    samples: HashMap<u32, ProcessSample>,
}

/// Default ordering: utilization descending, ties broken by ascending pid so
/// repeated views without an intervening update are identical.
pub fn by_utilization(a: &ProcessSample, b: &ProcessSample) -> Ordering {
    b.utilization()
        .total_cmp(&a.utilization())
        .then(a.pid().cmp(&b.pid()))
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.samples.contains_key(&pid)
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessSample> {
        self.samples.get(&pid)
    }

    /// Synchronizes membership with `live_pids`: samples for exited pids are
    /// dropped, new pids get a sample seeded from a single read. A seed read
    /// failing (pid exited between enumeration and read) simply skips the pid;
    /// it will not be tracked this cycle.
    pub fn refresh(&mut self, live_pids: &HashSet<u32>, source: &dyn CounterSource) {
        self.samples.retain(|pid, _| live_pids.contains(pid));
        for &pid in live_pids {
            if !self.samples.contains_key(&pid)
                && let Ok(seed) = source.process_counters(pid)
            {
                self.samples.insert(pid, ProcessSample::new(pid, seed));
            }
        }
    }

    /// Advances every tracked sample's delta window. The only place
    /// per-process utilization changes. A pid whose counters cannot be read
    /// mid-cycle keeps its cached utilization until the next refresh drops it.
    pub fn update_all(&mut self, source: &dyn CounterSource) {
        for sample in self.samples.values_mut() {
            if let Ok(reading) = source.process_counters(sample.pid()) {
                sample.update(reading);
            }
        }
    }

    /// Sorted, non-mutating view of all tracked samples. Ordering policy is
    /// whatever comparator the caller passes; see [`by_utilization`].
    pub fn ordered_view<F>(&self, compare: F) -> Vec<&ProcessSample>
    where
        F: Fn(&ProcessSample, &ProcessSample) -> Ordering,
    {
        let mut view: Vec<&ProcessSample> = self.samples.values().collect();
        view.sort_by(|a, b| compare(a, b));
        view
    }
}
