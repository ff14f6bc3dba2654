//! Configuration management for Stockpanel
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_CANCEL_LABEL, DEFAULT_CONFIRM_LABEL, DEFAULT_MODAL_ENTRY_DELAY_MS, DEFAULT_TOAST_DURATION_MS, MAX_MODAL_ENTRY_DELAY_MS,
    MAX_TOAST_DURATION_MS,
};
use crate::icons::IconTheme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backends understood by `[api] backend`
pub const SUPPORTED_BACKENDS: [&str; 1] = ["memory"];

/// Log levels understood by `[logging] level`
pub const SUPPORTED_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Icon theme for modal and toast kinds: "ascii", "unicode" or "emoji"
    pub icon_theme: IconTheme,
}

/// Modal and toast defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Lifetime of a toast that does not set its own duration
    pub toast_duration_ms: u64,
    /// Delay before a newly queued modal is reported visible
    pub modal_entry_delay_ms: u64,
    /// Confirm button label when a modal does not set one
    pub confirm_label: String,
    /// Cancel button label when a modal does not set one
    pub cancel_label: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in the data directory
    pub enabled: bool,
    /// Minimum level recorded
    pub level: String,
}

/// Inventory API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Which `InventoryApi` implementation to use
    pub backend: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            modal_entry_delay_ms: DEFAULT_MODAL_ENTRY_DELAY_MS,
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .with_context(|| format!("Invalid log level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let notifications = &self.notifications;

        if notifications.toast_duration_ms == 0 || notifications.toast_duration_ms > MAX_TOAST_DURATION_MS {
            anyhow::bail!(
                "toast_duration_ms must be between 1 and {}, got {}",
                MAX_TOAST_DURATION_MS,
                notifications.toast_duration_ms
            );
        }

        if notifications.modal_entry_delay_ms > MAX_MODAL_ENTRY_DELAY_MS {
            anyhow::bail!(
                "modal_entry_delay_ms cannot exceed {}, got {}",
                MAX_MODAL_ENTRY_DELAY_MS,
                notifications.modal_entry_delay_ms
            );
        }

        if notifications.confirm_label.trim().is_empty() {
            anyhow::bail!("confirm_label cannot be empty");
        }
        if notifications.cancel_label.trim().is_empty() {
            anyhow::bail!("cancel_label cannot be empty");
        }

        if !SUPPORTED_LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Expected one of: {}",
                self.logging.level,
                SUPPORTED_LOG_LEVELS.join(", ")
            );
        }

        if !SUPPORTED_BACKENDS.contains(&self.api.backend.as_str()) {
            anyhow::bail!(
                "unsupported api.backend '{}'. Available backends: {}",
                self.api.backend,
                SUPPORTED_BACKENDS.join(", ")
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Stockpanel Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
