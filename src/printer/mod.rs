// Output sinks for the rendered report: stdout and a raw receipt-printer device.

mod escpos;

pub use escpos::receipt_bytes;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::PrinterConfig;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("console output: {0}")]
    Console(#[source] std::io::Error),
    #[error("printer device {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Takes a finished report. A failure leaves the text untouched with the caller.
pub trait OutputSink {
    fn write_report(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Plain text to stdout, no printer control codes.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_report(&mut self, text: &str) -> Result<(), SinkError> {
        let mut out = std::io::stdout().lock();
        // a closed pipe surfaces as SinkError::Console
        writeln!(out, "{}", text)
            .and_then(|()| out.flush())
            .map_err(SinkError::Console)
    }
}

/// Line-mode printer reached through a character device (e.g. /dev/usb/lp0).
#[derive(Debug, Clone)]
pub struct DeviceSink {
    path: PathBuf,
    feed_lines: u8,
}

impl DeviceSink {
    pub fn new(path: impl Into<PathBuf>, feed_lines: u8) -> Self {
        Self {
            path: path.into(),
            feed_lines,
        }
    }

    pub fn from_config(config: &PrinterConfig) -> Self {
        Self::new(&config.device, config.feed_lines)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for DeviceSink {
    fn write_report(&mut self, text: &str) -> Result<(), SinkError> {
        let io_err = |source| SinkError::Io {
            path: self.path.clone(),
            source,
        };
        let mut device = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(io_err)?;
        device
            .write_all(&receipt_bytes(text, self.feed_lines))
            .map_err(io_err)?;
        device.flush().map_err(io_err)
    }
}

/// Writes the report to `console` first, then to `printer` when one is configured.
/// The printer is tried even if the console write failed; the first error is returned.
pub fn deliver<C, P>(text: &str, console: &mut C, printer: Option<&mut P>) -> Result<(), SinkError>
where
    C: OutputSink,
    P: OutputSink,
{
    let console_result = console.write_report(text);
    let printer_result = match printer {
        Some(printer) => printer.write_report(text),
        None => {
            tracing::info!("printer disabled, report written to console only");
            Ok(())
        }
    };
    console_result.and(printer_result)
}
