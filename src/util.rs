//! Process introspection helpers for benchmark records.
//!
//! Both readings come from procfs and are therefore Linux-only; elsewhere
//! the benchmark record simply omits them.

/// Peak virtual memory size of this process in KiB; unavailable off Linux.
#[cfg(not(target_os = "linux"))]
pub fn mem_used_peak() -> Option<u64> {
    None
}

/// Peak virtual memory size of this process in KiB, from `VmPeak` in
/// `/proc/self/status`.
#[cfg(target_os = "linux")]
pub fn mem_used_peak() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmPeak:"))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

/// CPU time consumed by this process in seconds; unavailable off Linux.
#[cfg(not(target_os = "linux"))]
pub fn cpu_time() -> Option<f64> {
    None
}

/// CPU time (user + system) consumed by this process in seconds, from
/// `/proc/self/stat`.
#[cfg(target_os = "linux")]
pub fn cpu_time() -> Option<f64> {
    let stat = std::fs::read_to_string("/proc/self/stat").ok()?;
    // The comm field may contain spaces; fields are stable after the ')'.
    let after_comm = stat.rsplit_once(')')?.1;
    let fields: Vec<&str> = after_comm.split_whitespace().collect();
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;
    // Ticks are USER_HZ, which is 100 on every mainstream Linux.
    Some((utime + stime) as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_procfs_readings_are_present() {
        assert!(mem_used_peak().is_some_and(|kib| kib > 0));
        assert!(cpu_time().is_some_and(|secs| secs >= 0.0));
    }
}
