// Rows returned by the metrics backend, target descriptors, and the query plan entry type

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use super::OsFamily;

pub type Labels = BTreeMap<String, String>;

pub const INSTANCE_LABEL: &str = "instance";
pub const JOB_LABEL: &str = "job";
pub const POOL_LABEL: &str = "pool";
/// Discovered (pre-relabel) scrape address of a target.
pub const ADDRESS_LABEL: &str = "__address__";

/// Label value, treating an empty string the same as a missing label.
pub fn label<'a>(labels: &'a Labels, name: &str) -> Option<&'a str> {
    labels
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// One sample of an instant query.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub labels: Labels,
    pub value: f64,
}

impl SeriesRow {
    pub fn new<K, V>(labels: impl IntoIterator<Item = (K, V)>, value: f64) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            value,
        }
    }

    pub fn instance(&self) -> Option<&str> {
        label(&self.labels, INSTANCE_LABEL)
    }
}

/// One active scrape target as reported by target discovery.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    #[serde(default)]
    pub discovered_labels: Labels,
    #[serde(default)]
    pub labels: Labels,
}

/// Fixed metric query categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    CpuUtilization,
    MemoryAvailable,
    MemoryTotal,
    Uptime,
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExpressionKind::CpuUtilization => "cpu_utilization",
            ExpressionKind::MemoryAvailable => "memory_available",
            ExpressionKind::MemoryTotal => "memory_total",
            ExpressionKind::Uptime => "uptime",
        })
    }
}

/// A query expression and how its rows are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricQuery {
    pub os_family: OsFamily,
    pub kind: ExpressionKind,
    pub expr: &'static str,
}
