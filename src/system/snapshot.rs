/// One display row of the process table, ordered by the sampler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub user: String,
    pub cpu_utilization: f64,
    pub memory_mb: u64,
    pub uptime_seconds: u64,
    pub command: String,
}

/// Read-only view of one refresh cycle, handed to the renderer.
///
/// Rebuilt every cycle; the delta state it derives from lives in the
/// sampler-owned `ProcessTable`, which is mutated in place across cycles.
#[derive(Clone, Debug, Default)]
pub struct SystemSnapshot {
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub uptime_seconds: u64,
    pub total_processes: u64,
    pub running_processes: u64,
    pub processes: Vec<ProcessRow>,
}
