//! Logging setup.
//!
//! The crate logs through the `log` facade. [`Logger::from_config`] installs a
//! `fern` dispatch that keeps every record in a shared in-memory buffer (for an
//! on-screen log view) and, when logging is enabled in the configuration, also
//! appends to a file in the user's data directory.

use crate::config::LoggingConfig;
use crate::constants::APP_DIR_NAME;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const LOG_FILE_NAME: &str = "stockpanel.log";
const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    file_path: Option<PathBuf>,
    installed: bool,
}

impl Logger {
    /// In-memory logger not attached to the `log` facade
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            file_path: None,
            installed: false,
        }
    }

    /// Build a logger from configuration and install it as the global `log` backend.
    ///
    /// Only the first installation in a process wins; later calls still return
    /// a usable in-memory logger.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut logger = Self::new();
        if config.enabled {
            logger.file_path = Some(Self::get_log_file_path()?);
        }

        let dispatch = logger.dispatch(config)?;
        logger.installed = dispatch.apply().is_ok();
        if logger.installed {
            log::debug!("Logger installed (file: {:?})", logger.file_path);
        }

        Ok(logger)
    }

    fn dispatch(&self, config: &LoggingConfig) -> Result<fern::Dispatch> {
        let buffer = Arc::clone(&self.logs);

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format(TIMESTAMP_FORMAT),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(config.level_filter()?)
            .chain(fern::Output::call(move |record| {
                if let Ok(mut logs) = buffer.lock() {
                    logs.push(record.args().to_string());
                }
            }));

        if let Some(path) = &self.file_path {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Add a log entry directly to the in-memory buffer
    pub fn log(&self, message: impl Into<String>) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let formatted_message = format!("[{}] {}", timestamp, message.into());

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Whether records are also written to a file
    pub fn is_enabled(&self) -> bool {
        self.file_path.is_some()
    }

    /// Whether this logger became the global `log` backend
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Location of the log file, creating its directory if needed
    pub fn get_log_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join(APP_DIR_NAME);

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create log directory: {}", data_dir.display()))?;

        Ok(data_dir.join(LOG_FILE_NAME))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
