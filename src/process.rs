//! Process uptime and memory introspection.

use std::time::Instant;

use serde::Serialize;
use utoipa::ToSchema;

/// Monotonic clock started when the service boots.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    started_at: Instant,
}

impl Uptime {
    /// Start counting from now.
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Seconds elapsed since start, with sub-second precision.
    pub fn seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::start()
    }
}

/// Snapshot of process memory usage, all values in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MemoryUsage {
    /// Resident set size.
    pub rss: u64,
    /// Peak resident set size.
    pub peak_rss: u64,
    /// Total virtual memory.
    pub virtual_size: u64,
    /// Data segment size (heap and other private writable mappings).
    pub data: u64,
}

impl MemoryUsage {
    /// Take a snapshot of the current process.
    ///
    /// Platforms without `/proc` report zeros.
    pub fn snapshot() -> Self {
        std::fs::read_to_string("/proc/self/status")
            .map(|status| Self::from_proc_status(&status))
            .unwrap_or_default()
    }

    /// Parse the `Vm*` lines of a `/proc/<pid>/status` file.
    ///
    /// Missing or malformed lines leave the field at zero.
    pub fn from_proc_status(status: &str) -> Self {
        let mut usage = Self::default();

        for line in status.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let field = match key.trim() {
                "VmRSS" => &mut usage.rss,
                "VmHWM" => &mut usage.peak_rss,
                "VmSize" => &mut usage.virtual_size,
                "VmData" => &mut usage.data,
                _ => continue,
            };
            if let Some(bytes) = parse_kib(value) {
                *field = bytes;
            }
        }

        usage
    }
}

/// Parse a value like `   1234 kB` into bytes.
fn parse_kib(value: &str) -> Option<u64> {
    let mut parts = value.split_whitespace();
    let amount: u64 = parts.next()?.parse().ok()?;
    match parts.next() {
        Some("kB") | None => amount.checked_mul(1024),
        Some(_) => None,
    }
}
