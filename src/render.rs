// Receipt text for a reconciled snapshot. Pure: no I/O, no mutation.

use chrono::NaiveDateTime;

use crate::models::{HostMap, HostRecord};
use crate::target_directory::UNKNOWN_JOB;

pub const TITLE: &str = "METRIC SNAPSHOT";
/// Receipt width in columns.
pub const LINE_WIDTH: usize = 32;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header, then one block per host in ascending host-id order, each closed by a divider.
/// With no hosts the output is the header and a single divider.
pub fn render(hosts: &HostMap, timestamp: NaiveDateTime) -> String {
    let divider = "-".repeat(LINE_WIDTH);
    let mut lines = vec![
        TITLE.to_string(),
        timestamp.format(TIMESTAMP_FORMAT).to_string(),
        divider.clone(),
    ];
    for (host_id, record) in hosts {
        push_host_block(&mut lines, host_id, record);
        lines.push(divider.clone());
    }
    lines.join("\n")
}

fn push_host_block(lines: &mut Vec<String>, host_id: &str, record: &HostRecord) {
    lines.push(host_id.to_string());
    lines.push(format!(" Job:   {}", record.job.as_deref().unwrap_or(UNKNOWN_JOB)));
    lines.push(format!(" Type:  {}", record.os_family));
    // Absent CPU shows 0.0 so the column stays aligned.
    lines.push(format!(" CPU:   {:>5.1}%", record.cpu_percent.unwrap_or(0.0)));
    if let Some((used, total)) = record.memory_mib() {
        lines.push(format!(" RAM:   {:.0}M / {:.0}M", used, total));
    }
    if let Some(hours) = record.uptime_hours() {
        lines.push(format!(" Uptime:{:.1} hrs", hours));
    }
}
