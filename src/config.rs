use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub prometheus: PrometheusConfig,
    #[serde(default)]
    pub printer: PrinterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusConfig {
    #[serde(default = "default_prometheus_url")]
    pub url: String,
    /// Per-request timeout; a request that exceeds it counts as a failed fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            url: default_prometheus_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_prometheus_url() -> String {
    "http://prometheus_server:9090".into()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrinterConfig {
    /// When false the report only goes to stdout.
    #[serde(default)]
    pub enabled: bool,
    /// Raw line-printer device node (e.g. the usblp character device).
    #[serde(default = "default_device")]
    pub device: String,
    /// Lines fed before the cut.
    #[serde(default = "default_feed_lines")]
    pub feed_lines: u8,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            device: default_device(),
            feed_lines: default_feed_lines(),
        }
    }
}

fn default_device() -> String {
    "/dev/usb/lp0".into()
}

fn default_feed_lines() -> u8 {
    5
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.prometheus.url.starts_with("http://") || self.prometheus.url.starts_with("https://"),
            "prometheus.url must start with http:// or https://, got {:?}",
            self.prometheus.url
        );
        anyhow::ensure!(
            self.prometheus.timeout_secs > 0,
            "prometheus.timeout_secs must be > 0, got {}",
            self.prometheus.timeout_secs
        );
        anyhow::ensure!(
            !self.printer.enabled || !self.printer.device.is_empty(),
            "printer.device must be non-empty when printer.enabled is true"
        );
        Ok(())
    }
}
