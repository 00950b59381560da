// Shared test helpers
#![allow(dead_code)]

use promreceipt::models::{SeriesRow, TargetDescriptor};
use promreceipt::prom_repo::{FetchError, SeriesSource};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn row(labels: &[(&str, &str)], value: f64) -> SeriesRow {
    SeriesRow::new(labels.iter().copied(), value)
}

pub fn target(labels: &[(&str, &str)], discovered: &[(&str, &str)]) -> TargetDescriptor {
    TargetDescriptor {
        labels: labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        discovered_labels: discovered
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

fn backend_down() -> FetchError {
    FetchError::Api {
        error_type: "unavailable".into(),
        message: "backend down".into(),
    }
}

/// In-memory backend. Unknown expressions return no rows; `failing` ones return an error.
#[derive(Default)]
pub struct FakeSource {
    pub series: HashMap<String, Vec<SeriesRow>>,
    pub failing: Vec<String>,
    pub targets: Option<Vec<TargetDescriptor>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_series(mut self, expr: &str, rows: Vec<SeriesRow>) -> Self {
        self.series.insert(expr.to_string(), rows);
        self
    }

    pub fn with_failing(mut self, expr: &str) -> Self {
        self.failing.push(expr.to_string());
        self
    }

    pub fn with_targets(mut self, targets: Vec<TargetDescriptor>) -> Self {
        self.targets = Some(targets);
        self
    }
}

impl SeriesSource for FakeSource {
    async fn query(&self, expr: &str) -> Result<Vec<SeriesRow>, FetchError> {
        self.calls.borrow_mut().push(expr.to_string());
        if self.failing.iter().any(|f| f == expr) {
            return Err(backend_down());
        }
        Ok(self.series.get(expr).cloned().unwrap_or_default())
    }

    async fn targets(&self) -> Result<Vec<TargetDescriptor>, FetchError> {
        self.calls.borrow_mut().push("targets".to_string());
        self.targets.clone().ok_or_else(backend_down)
    }
}

/// Every query and target discovery fails.
pub struct DownSource;

impl SeriesSource for DownSource {
    async fn query(&self, _expr: &str) -> Result<Vec<SeriesRow>, FetchError> {
        Err(backend_down())
    }

    async fn targets(&self) -> Result<Vec<TargetDescriptor>, FetchError> {
        Err(backend_down())
    }
}
