// Prometheus HTTP API response envelopes (/api/v1/query, /api/v1/targets).

use serde::Deserialize;

use crate::models::{Labels, SeriesRow, TargetDescriptor};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QueryData {
    #[serde(default)]
    pub result: Vec<VectorSample>,
}

/// `{"metric": {...}, "value": [<unix ts>, "<float as string>"]}`
#[derive(Debug, Deserialize)]
pub(super) struct VectorSample {
    #[serde(default)]
    pub metric: Labels,
    pub value: (f64, String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TargetsData {
    #[serde(default)]
    pub active_targets: Vec<TargetDescriptor>,
}

impl VectorSample {
    /// Prometheus encodes sample values as strings ("12.5", "NaN", "+Inf").
    pub fn into_row(self) -> Option<SeriesRow> {
        let value = parse_sample_value(&self.value.1)?;
        Some(SeriesRow {
            labels: self.metric,
            value,
        })
    }
}

pub(super) fn parse_sample_value(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}
