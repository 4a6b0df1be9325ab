//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/patitas/edge | work directory (queue, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | BACKEND_URL | (unset) | cloud sync endpoint; unset = simulated |
//! | TIMEZONE | Europe/Madrid | business timezone |
//! | PRINTER_ADDR | (unset) | receipt printer, `host:9100` |
//! | ENVIRONMENT | development | development \| staging \| production |

use std::path::PathBuf;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for the sync queue and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Cloud endpoint the sync queue replays against; `None` runs the
    /// simulated backend
    pub backend_url: Option<String>,
    /// Business timezone used for "today" in stay billing
    pub timezone: Tz,
    /// Receipt printer socket address (e.g. "192.168.1.50:9100")
    pub printer_addr: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/patitas/edge".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            backend_url: std::env::var("BACKEND_URL").ok().filter(|s| !s.is_empty()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            printer_addr: std::env::var("PRINTER_ADDR").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the bits tests care about.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// `work_dir/sync/queue.json` — the persisted sync queue
    pub fn sync_queue_path(&self) -> PathBuf {
        self.work_dir_path().join("sync").join("queue.json")
    }

    /// `work_dir/logs` — daily-rolling log files
    pub fn logs_dir(&self) -> PathBuf {
        self.work_dir_path().join("logs")
    }

    /// Create the work directory layout if missing.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.work_dir_path().join("sync"))?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
