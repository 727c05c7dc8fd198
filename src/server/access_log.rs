use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Append-only request log, one line per request line received.
///
/// Every entry is a single append write, so concurrent connections never
/// interleave within a line. Entry order across connections is not defined.
#[derive(Debug, Clone)]
pub struct AccessLog {
    path: Option<PathBuf>,
}

impl AccessLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends `"<timestamp> - <request line>"`.
    pub async fn record(&self, request_line: &str) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let entry = format_entry(&chrono::Local::now(), request_line);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await
    }
}

fn format_entry<Tz>(at: &chrono::DateTime<Tz>, request_line: &str) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{} - {}\n", at.format("%Y-%m-%d %H:%M:%S"), request_line)
}
