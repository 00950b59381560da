// Per-host reconciled record and OS family tag

use std::collections::BTreeMap;
use std::fmt;

/// Host identifier -> record. Ordered so iteration is ascending by host id.
pub type HostMap = BTreeMap<String, HostRecord>;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
const SECS_PER_HOUR: f64 = 3600.0;

/// OS family of a host; only a CPU-utilization row can set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OsFamily {
    Linux,
    Windows,
    #[default]
    Unknown,
}

impl OsFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Windows => "windows",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One monitored host. Every metric is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostRecord {
    /// Job/pool; set once by the attribution chain, never overwritten.
    pub job: Option<String>,
    pub os_family: OsFamily,
    pub cpu_percent: Option<f64>,
    pub mem_available_bytes: Option<f64>,
    pub mem_total_bytes: Option<f64>,
    /// Raw seconds, whatever the OS family.
    pub uptime_seconds: Option<f64>,
}

impl HostRecord {
    /// (used MiB, total MiB), only when both memory fields are present.
    pub fn memory_mib(&self) -> Option<(f64, f64)> {
        let total = self.mem_total_bytes?;
        let available = self.mem_available_bytes?;
        Some(((total - available) / BYTES_PER_MIB, total / BYTES_PER_MIB))
    }

    pub fn uptime_hours(&self) -> Option<f64> {
        self.uptime_seconds.map(|s| s / SECS_PER_HOUR)
    }
}
