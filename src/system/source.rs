use std::fmt;

use super::rate::CounterPair;

/// Why a counter read failed.
///
/// Both variants are absorbed into sentinel values at the sampler boundary;
/// a vanishing process or a garbled pseudo-file must never take the monitor
/// down. Only total failure to enumerate pids is treated as fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// Pseudo-file missing or unreadable — the process likely exited mid-read.
    Unavailable,
    /// Unexpected field layout in an otherwise readable file.
    Malformed,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable => write!(f, "counter source unavailable"),
            SourceError::Malformed => write!(f, "counter source data malformed"),
        }
    }
}

impl std::error::Error for SourceError {}

pub type SourceResult<T> = Result<T, SourceError>;

/// Instantaneous memory totals, in KiB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryTotals {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemoryTotals {
    /// `1 - free/total`; memory needs no delta window.
    pub fn utilization(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        1.0 - self.free_kb as f64 / self.total_kb as f64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessCounts {
    pub total: u64,
    pub running: u64,
}

/// Point-in-time readings of monotonic system and per-process counters,
/// abstracted over the underlying OS reader so the sampling engine can be
/// driven by scripted counters in tests.
pub trait CounterSource {
    /// System-wide idle/active tick pair.
    fn system_counters(&self) -> SourceResult<CounterPair>;

    /// Per-process pair: `active` is the ticks the process spent executing
    /// (user + kernel, including reaped children), `total()` is the
    /// system-wide tick count at the same instant.
    fn process_counters(&self, pid: u32) -> SourceResult<CounterPair>;

    /// The set of currently live process ids.
    fn live_pids(&self) -> SourceResult<Vec<u32>>;

    fn memory_totals(&self) -> SourceResult<MemoryTotals>;

    fn uptime_seconds(&self) -> SourceResult<u64>;

    fn process_counts(&self) -> SourceResult<ProcessCounts>;

    // Display-only fields; no derivation happens on these.

    fn process_command(&self, pid: u32) -> SourceResult<String>;

    fn process_owner(&self, pid: u32) -> SourceResult<String>;

    fn process_memory_mb(&self, pid: u32) -> SourceResult<u64>;

    fn process_uptime_seconds(&self, pid: u32) -> SourceResult<u64>;
}
