// Merges rows from each metric expression into one HostRecord per host.
// Expressions are applied in QUERY_PLAN order; the attribution chain short-circuits on the
// first row that resolves a job, so the order decides which source wins.

use crate::models::{
    ExpressionKind, HostMap, JOB_LABEL, Labels, MetricQuery, OsFamily, POOL_LABEL, SeriesRow,
    label,
};
use crate::target_directory::{TargetDirectory, UNKNOWN_JOB};
use tracing::debug;

/// Linux families first, each as utilization, memory available, memory total, uptime.
/// Uptime values are stored as the expression returns them; the Windows counter is taken as-is.
pub const QUERY_PLAN: [MetricQuery; 8] = [
    MetricQuery {
        os_family: OsFamily::Linux,
        kind: ExpressionKind::CpuUtilization,
        expr: r#"100 - (avg by (instance) (irate(node_cpu_seconds_total{mode="idle"}[5m])) * 100)"#,
    },
    MetricQuery {
        os_family: OsFamily::Linux,
        kind: ExpressionKind::MemoryAvailable,
        expr: "node_memory_MemAvailable_bytes",
    },
    MetricQuery {
        os_family: OsFamily::Linux,
        kind: ExpressionKind::MemoryTotal,
        expr: "node_memory_MemTotal_bytes",
    },
    MetricQuery {
        os_family: OsFamily::Linux,
        kind: ExpressionKind::Uptime,
        expr: "node_time_seconds - node_boot_time_seconds",
    },
    MetricQuery {
        os_family: OsFamily::Windows,
        kind: ExpressionKind::CpuUtilization,
        expr: r#"100 - (avg by (instance) (irate(windows_cpu_time_total{mode="idle"}[5m])) * 100)"#,
    },
    MetricQuery {
        os_family: OsFamily::Windows,
        kind: ExpressionKind::MemoryAvailable,
        expr: "windows_os_physical_memory_free_bytes",
    },
    MetricQuery {
        os_family: OsFamily::Windows,
        kind: ExpressionKind::MemoryTotal,
        expr: "windows_cs_physical_memory_bytes",
    },
    MetricQuery {
        os_family: OsFamily::Windows,
        kind: ExpressionKind::Uptime,
        expr: "windows_system_system_up_time",
    },
];

/// Attribution chain: the row's `job` label, then its `pool` label, then the target directory.
/// `None` means no source named a job; CPU rows then settle on "unknown", other rows leave it unset.
pub fn resolve_job(row_labels: &Labels, host_id: &str, directory: &TargetDirectory) -> Option<String> {
    label(row_labels, JOB_LABEL)
        .or_else(|| label(row_labels, POOL_LABEL))
        .or_else(|| directory.job_for(host_id))
        .map(str::to_string)
}

/// Merges one expression's rows into `hosts`. Returns the number of rows merged.
///
/// CPU rows set `cpu_percent` and `os_family` (the query's family); the other kinds only set
/// their own field. Any row creates the host if it is missing, and resolves the job only while
/// it is still unset: a CPU row always settles it (falling back to "unknown"), a memory or uptime
/// row only when a label or the directory names one. Rows without an `instance` label are skipped.
pub fn merge_series(
    hosts: &mut HostMap,
    query: &MetricQuery,
    rows: &[SeriesRow],
    directory: &TargetDirectory,
) -> usize {
    let mut merged = 0;
    for row in rows {
        let Some(host_id) = row.instance() else {
            debug!(expression = query.expr, labels = ?row.labels, "row has no instance label, skipped");
            continue;
        };
        let record = hosts.entry(host_id.to_string()).or_default();
        match query.kind {
            ExpressionKind::CpuUtilization => {
                record.cpu_percent = Some(row.value);
                record.os_family = query.os_family;
            }
            ExpressionKind::MemoryAvailable => record.mem_available_bytes = Some(row.value),
            ExpressionKind::MemoryTotal => record.mem_total_bytes = Some(row.value),
            ExpressionKind::Uptime => record.uptime_seconds = Some(row.value),
        }
        if record.job.is_none() {
            let job = resolve_job(&row.labels, host_id, directory);
            record.job = match query.kind {
                ExpressionKind::CpuUtilization => {
                    Some(job.unwrap_or_else(|| UNKNOWN_JOB.to_string()))
                }
                _ => job,
            };
        }
        merged += 1;
    }
    merged
}
