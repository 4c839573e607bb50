use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ticktop::system::rate::CounterPair;
use ticktop::system::source::{
    CounterSource, MemoryTotals, ProcessCounts, SourceError, SourceResult,
};
use ticktop::system::table::{self, ProcessTable};

/// In-memory source with synthetic monotonic counters, advanced between
/// passes so update_all always sees a fresh window.
struct SyntheticSource {
    state: RefCell<SyntheticState>,
}

struct SyntheticState {
    system_total: u64,
    active: HashMap<u32, u64>,
}

impl SyntheticSource {
    fn new(pids: usize) -> Self {
        let active = (0..pids as u32).map(|pid| (pid, pid as u64)).collect();
        Self {
            state: RefCell::new(SyntheticState {
                system_total: 1_000_000,
                active,
            }),
        }
    }

    fn advance(&self) {
        let mut state = self.state.borrow_mut();
        state.system_total += 10_000;
        for active in state.active.values_mut() {
            *active += 7;
        }
    }

    fn pids(&self) -> HashSet<u32> {
        self.state.borrow().active.keys().copied().collect()
    }
}

impl CounterSource for SyntheticSource {
    fn system_counters(&self) -> SourceResult<CounterPair> {
        let total = self.state.borrow().system_total;
        Ok(CounterPair::new(total, 0))
    }

    fn process_counters(&self, pid: u32) -> SourceResult<CounterPair> {
        let state = self.state.borrow();
        let active = *state.active.get(&pid).ok_or(SourceError::Unavailable)?;
        Ok(CounterPair::new(state.system_total - active, active))
    }

    fn live_pids(&self) -> SourceResult<Vec<u32>> {
        Ok(self.state.borrow().active.keys().copied().collect())
    }

    fn memory_totals(&self) -> SourceResult<MemoryTotals> {
        Ok(MemoryTotals::default())
    }

    fn uptime_seconds(&self) -> SourceResult<u64> {
        Ok(0)
    }

    fn process_counts(&self) -> SourceResult<ProcessCounts> {
        Ok(ProcessCounts::default())
    }

    fn process_command(&self, pid: u32) -> SourceResult<String> {
        Ok(format!("proc_{pid}"))
    }

    fn process_owner(&self, _pid: u32) -> SourceResult<String> {
        Ok("bench".to_string())
    }

    fn process_memory_mb(&self, _pid: u32) -> SourceResult<u64> {
        Ok(0)
    }

    fn process_uptime_seconds(&self, _pid: u32) -> SourceResult<u64> {
        Ok(0)
    }
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_refresh_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let source = SyntheticSource::new(size);
        let pids = source.pids();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut fresh = ProcessTable::new();
                fresh.refresh(black_box(&pids), &source);
                black_box(fresh.len());
            })
        });
    }

    group.finish();
}

fn bench_update_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_update_all_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let source = SyntheticSource::new(size);
        let mut table = ProcessTable::new();
        table.refresh(&source.pids(), &source);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                source.advance();
                table.update_all(black_box(&source));
            })
        });
    }

    group.finish();
}

fn bench_ordered_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_ordered_view_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let source = SyntheticSource::new(size);
        let mut table = ProcessTable::new();
        table.refresh(&source.pids(), &source);
        source.advance();
        table.update_all(&source);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let view = table.ordered_view(table::by_utilization);
                black_box(view.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_refresh, bench_update_all, bench_ordered_view);
criterion_main!(benches);
