// Prometheus HTTP API: instant queries and active target discovery

mod error;
mod wire;

pub use error::FetchError;

use crate::config::PrometheusConfig;
use crate::models::{SeriesRow, TargetDescriptor};
use crate::version;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use wire::{Envelope, QueryData, TargetsData};

/// Where series rows and scrape targets come from.
#[allow(async_fn_in_trait)]
pub trait SeriesSource {
    /// Evaluates one instant query expression.
    async fn query(&self, expr: &str) -> Result<Vec<SeriesRow>, FetchError>;

    /// Lists active scrape targets.
    async fn targets(&self) -> Result<Vec<TargetDescriptor>, FetchError>;
}

pub struct PromRepo {
    client: reqwest::Client,
    base_url: String,
}

impl PromRepo {
    pub fn new(config: &PrometheusConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(version::user_agent())
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        // Prometheus reports bad queries as 4xx with an error envelope; prefer that message.
        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(e) => e,
            Err(_) if !status.is_success() => return Err(FetchError::Status(status)),
            Err(e) => return Err(FetchError::Decode(e)),
        };
        if envelope.status != "success" {
            return Err(FetchError::Api {
                error_type: envelope.error_type.unwrap_or_else(|| "unknown".into()),
                message: envelope.error.unwrap_or_default(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        match envelope.data {
            Some(data) => Ok(data),
            None => Err(FetchError::Api {
                error_type: "missing_data".into(),
                message: "success response without data".into(),
            }),
        }
    }
}

impl SeriesSource for PromRepo {
    #[instrument(skip(self), fields(repo = "prometheus", operation = "query"))]
    async fn query(&self, expr: &str) -> Result<Vec<SeriesRow>, FetchError> {
        let data: QueryData = self.get_data("/api/v1/query", &[("query", expr)]).await?;
        let total = data.result.len();
        let rows: Vec<SeriesRow> = data
            .result
            .into_iter()
            .filter_map(wire::VectorSample::into_row)
            .collect();
        if rows.len() != total {
            debug!(dropped = total - rows.len(), "samples with unparsable values dropped");
        }
        Ok(rows)
    }

    #[instrument(skip(self), fields(repo = "prometheus", operation = "targets"))]
    async fn targets(&self) -> Result<Vec<TargetDescriptor>, FetchError> {
        let data: TargetsData = self.get_data("/api/v1/targets", &[]).await?;
        Ok(data.active_targets)
    }
}
