use anyhow::Result;
use promreceipt::printer::{DeviceSink, StdoutSink};
use promreceipt::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    let repo = prom_repo::PromRepo::new(&app_config.prometheus)?;
    tracing::info!(
        "{} {} collecting from {}",
        version::NAME,
        version::VERSION,
        app_config.prometheus.url
    );

    let hosts = collector::collect(&repo).await;
    let report = render::render(&hosts, chrono::Local::now().naive_local());

    let mut device = app_config
        .printer
        .enabled
        .then(|| DeviceSink::from_config(&app_config.printer));
    if let Err(e) = printer::deliver(&report, &mut StdoutSink, device.as_mut()) {
        tracing::error!(error = %e, "report output failed");
    }

    Ok(())
}
