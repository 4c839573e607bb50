//! `/proc` reader backing [`CounterSource`] on Linux.
//!
//! File IO is a thin layer over pure line parsers so the field extraction is
//! testable against string fixtures, and the root directory is overridable so
//! integration tests can point at a fake tree.

use std::path::PathBuf;

use super::rate::CounterPair;
use super::source::{CounterSource, MemoryTotals, ProcessCounts, SourceError, SourceResult};

pub struct ProcSource {
    root: PathBuf,
    ticks_per_second: u64,
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcSource {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ticks_per_second: ticks_per_second(),
        }
    }

    fn read(&self, name: &str) -> SourceResult<String> {
        std::fs::read_to_string(self.root.join(name)).map_err(|_| SourceError::Unavailable)
    }

    fn read_pid(&self, pid: u32, name: &str) -> SourceResult<String> {
        std::fs::read_to_string(self.root.join(pid.to_string()).join(name))
            .map_err(|_| SourceError::Unavailable)
    }

    /// Kernel release from `/proc/version`. Display-only, read once.
    pub fn kernel_version(&self) -> Option<String> {
        parse_kernel_release(&self.read("version").ok()?)
    }

    /// Distribution name from `/etc/os-release`. Display-only, read once.
    pub fn operating_system(&self) -> Option<String> {
        let contents = std::fs::read_to_string("/etc/os-release").ok()?;
        parse_pretty_name(&contents)
    }
}

impl CounterSource for ProcSource {
    fn system_counters(&self) -> SourceResult<CounterPair> {
        parse_cpu_line(&self.read("stat")?).ok_or(SourceError::Malformed)
    }

    fn process_counters(&self, pid: u32) -> SourceResult<CounterPair> {
        let system_total = self.system_counters()?.total();
        let active =
            parse_active_ticks(&self.read_pid(pid, "stat")?).ok_or(SourceError::Malformed)?;
        Ok(CounterPair::new(
            system_total.saturating_sub(active),
            active,
        ))
    }

    fn live_pids(&self) -> SourceResult<Vec<u32>> {
        let entries = std::fs::read_dir(&self.root).map_err(|_| SourceError::Unavailable)?;
        let mut pids = Vec::new();
        for entry in entries.flatten() {
            if let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                pids.push(pid);
            }
        }
        Ok(pids)
    }

    fn memory_totals(&self) -> SourceResult<MemoryTotals> {
        parse_meminfo(&self.read("meminfo")?).ok_or(SourceError::Malformed)
    }

    fn uptime_seconds(&self) -> SourceResult<u64> {
        parse_uptime(&self.read("uptime")?).ok_or(SourceError::Malformed)
    }

    fn process_counts(&self) -> SourceResult<ProcessCounts> {
        parse_process_counts(&self.read("stat")?).ok_or(SourceError::Malformed)
    }

    fn process_command(&self, pid: u32) -> SourceResult<String> {
        Ok(parse_cmdline(&self.read_pid(pid, "cmdline")?))
    }

    fn process_owner(&self, pid: u32) -> SourceResult<String> {
        let uid =
            parse_status_value(&self.read_pid(pid, "status")?, "Uid").ok_or(SourceError::Malformed)?;
        let name = users::get_user_by_uid(uid as u32)
            .map(|u| u.name().to_string_lossy().to_string())
            .unwrap_or_else(|| uid.to_string());
        Ok(name)
    }

    fn process_memory_mb(&self, pid: u32) -> SourceResult<u64> {
        let kb = parse_status_value(&self.read_pid(pid, "status")?, "VmSize")
            .ok_or(SourceError::Malformed)?;
        Ok(kb / 1024)
    }

    fn process_uptime_seconds(&self, pid: u32) -> SourceResult<u64> {
        let start_ticks =
            parse_start_ticks(&self.read_pid(pid, "stat")?).ok_or(SourceError::Malformed)?;
        let uptime = self.uptime_seconds()?;
        Ok(uptime.saturating_sub(start_ticks / self.ticks_per_second))
    }
}

fn ticks_per_second() -> u64 {
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 { ticks as u64 } else { 100 }
}

/// Extracts the aggregate cpu line of `/proc/stat` into a counter pair.
/// Idle covers idle+iowait; active covers user, nice, system, irq, softirq
/// and steal. Guest time is already accounted inside user/nice.
pub fn parse_cpu_line(stat: &str) -> Option<CounterPair> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(8)
        .map(|f| f.parse().ok())
        .collect::<Option<Vec<u64>>>()?;
    if fields.len() < 8 {
        return None;
    }
    let &[user, nice, system, idle, iowait, irq, softirq, steal] = &fields[..8] else {
        return None;
    };
    Some(CounterPair::new(
        idle + iowait,
        user + nice + system + irq + softirq + steal,
    ))
}

/// Fields of `/proc/{pid}/stat` after the comm column. The comm itself may
/// contain spaces and parentheses, so everything up to the last `)` is
/// skipped first.
fn stat_fields_after_comm(stat_line: &str) -> Option<Vec<&str>> {
    let after_comm = stat_line.rfind(')')? + 1;
    Some(stat_line[after_comm..].split_whitespace().collect())
}

/// Active ticks for one process: utime + stime + cutime + cstime
/// (fields 11..=14 after comm).
pub fn parse_active_ticks(stat_line: &str) -> Option<u64> {
    let fields = stat_fields_after_comm(stat_line)?;
    let mut sum = 0u64;
    for field in fields.get(11..=14)? {
        sum += field.parse::<u64>().ok()?;
    }
    Some(sum)
}

/// Process start time in ticks since boot (field 19 after comm).
pub fn parse_start_ticks(stat_line: &str) -> Option<u64> {
    stat_fields_after_comm(stat_line)?.get(19)?.parse().ok()
}

pub fn parse_meminfo(meminfo: &str) -> Option<MemoryTotals> {
    let mut total_kb = None;
    let mut free_kb = None;
    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = rest.split_whitespace().next()?.parse().ok();
        } else if let Some(rest) = line.strip_prefix("MemFree:") {
            free_kb = rest.split_whitespace().next()?.parse().ok();
        }
    }
    Some(MemoryTotals {
        total_kb: total_kb?,
        free_kb: free_kb?,
    })
}

pub fn parse_uptime(uptime: &str) -> Option<u64> {
    let seconds: f64 = uptime.split_whitespace().next()?.parse().ok()?;
    Some(seconds as u64)
}

pub fn parse_process_counts(stat: &str) -> Option<ProcessCounts> {
    let mut total = None;
    let mut running = None;
    for line in stat.lines() {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("processes"), Some(value)) => total = value.parse().ok(),
            (Some("procs_running"), Some(value)) => running = value.parse().ok(),
            _ => {}
        }
    }
    Some(ProcessCounts {
        total: total?,
        running: running?,
    })
}

/// First numeric value of a `Key:\tvalue ...` line in `/proc/{pid}/status`.
pub fn parse_status_value(status: &str, key: &str) -> Option<u64> {
    let line = status
        .lines()
        .find(|l| l.strip_prefix(key).is_some_and(|r| r.starts_with(':')))?;
    line.split(':').nth(1)?.split_whitespace().next()?.parse().ok()
}

/// `/proc/{pid}/cmdline` is NUL-separated; render it as a single line.
pub fn parse_cmdline(raw: &str) -> String {
    raw.replace('\0', " ").trim().to_string()
}

pub fn parse_pretty_name(os_release: &str) -> Option<String> {
    let value = os_release
        .lines()
        .find_map(|l| l.strip_prefix("PRETTY_NAME="))?;
    Some(value.trim_matches('"').to_string())
}

/// Release token of `/proc/version` ("Linux version 6.1.0-x ..." → "6.1.0-x").
pub fn parse_kernel_release(version: &str) -> Option<String> {
    version.split_whitespace().nth(2).map(str::to_string)
}
