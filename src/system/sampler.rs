use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use super::rate::compute_utilization;
use super::snapshot::{ProcessRow, SystemSnapshot};
use super::source::{CounterSource, SourceError};
use super::table::{self, ProcessTable};

/// Floor for the pause between the two counter reads of one utilization
/// computation. Kernel tick counters are coarse; a near-zero window yields
/// 0/0 or noisy ratios.
pub const MIN_SAMPLE_DELAY: Duration = Duration::from_millis(50);

/// The one fatal condition: the source cannot enumerate processes at all.
/// Everything else degrades to per-metric sentinels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleError(pub SourceError);

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot enumerate processes: {}", self.0)
    }
}

impl std::error::Error for CycleError {}

/// Drives one refresh cycle per call and owns all long-lived sampling state.
///
/// A cycle is a single sequential pass: enumerate live pids, refresh table
/// membership (seeding new samples), take the first system reading, yield for
/// the sample delay, take the second system reading, advance every process
/// delta, then assemble the snapshot. Seeding happens before the delay and
/// updates after it, so every delta window — including a fresh sample's first
/// — spans at least the delay.
pub struct Sampler<S: CounterSource> {
    source: S,
    table: ProcessTable,
    sample_delay: Duration,
}

impl<S: CounterSource> Sampler<S> {
    /// `sample_delay` is clamped to [`MIN_SAMPLE_DELAY`].
    pub fn new(source: S, sample_delay: Duration) -> Self {
        Self {
            source,
            table: ProcessTable::new(),
            sample_delay: sample_delay.max(MIN_SAMPLE_DELAY),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn sample_delay(&self) -> Duration {
        self.sample_delay
    }

    /// Performs one full refresh+update pass and returns the new snapshot.
    ///
    /// The delay between the paired readings is a cooperative timer, not a
    /// thread block. Any single failed read degrades its metric to a sentinel
    /// zero/empty value; only pid enumeration failure aborts the cycle.
    pub async fn advance_cycle(&mut self) -> Result<SystemSnapshot, CycleError> {
        #[cfg(feature = "sample-tracing")]
        let _cycle_span = tracing::debug_span!("sampler.advance_cycle").entered();

        let live: HashSet<u32> = self
            .source
            .live_pids()
            .map_err(CycleError)?
            .into_iter()
            .collect();

        self.table.refresh(&live, &self.source);
        let first = self.source.system_counters().ok();

        tokio::time::sleep(self.sample_delay).await;

        let second = self.source.system_counters().ok();
        let cpu_utilization = match (first, second) {
            (Some(prev), Some(cur)) => {
                compute_utilization(prev.active, prev.total(), cur.active, cur.total())
            }
            _ => 0.0,
        };

        self.table.update_all(&self.source);

        let memory_utilization = self
            .source
            .memory_totals()
            .map(|m| m.utilization())
            .unwrap_or(0.0);
        let uptime_seconds = self.source.uptime_seconds().unwrap_or(0);
        let counts = self.source.process_counts().unwrap_or_default();

        Ok(SystemSnapshot {
            cpu_utilization,
            memory_utilization,
            uptime_seconds,
            total_processes: counts.total,
            running_processes: counts.running,
            processes: self.build_rows(),
        })
    }

    fn build_rows(&self) -> Vec<ProcessRow> {
        #[cfg(feature = "sample-tracing")]
        let _rows_span = tracing::debug_span!("sampler.build_rows").entered();

        self.table
            .ordered_view(table::by_utilization)
            .into_iter()
            .map(|sample| {
                let pid = sample.pid();
                ProcessRow {
                    pid,
                    user: self.source.process_owner(pid).unwrap_or_default(),
                    cpu_utilization: sample.utilization(),
                    memory_mb: self.source.process_memory_mb(pid).unwrap_or(0),
                    uptime_seconds: self.source.process_uptime_seconds(pid).unwrap_or(0),
                    command: self.source.process_command(pid).unwrap_or_default(),
                }
            })
            .collect()
    }
}
