//! Configuration payload and file persistence
//!
//! This module provides:
//! - Serde models for the persisted JSON payload (`deviceScan` + `audio`)
//! - A [`ConfigManager`] that loads and saves the payload on disk
//!
//! The payload schema is a compatibility contract: existing config files must
//! load and save without losing fields, so both sections carry a flattened
//! map for keys this build does not model (the original format had e.g. a
//! `lastDevice` entry).

use crate::domain::catalog::{DeviceListing, DeviceName};
use crate::domain::driver::{DriverApi, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, instrument};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The `audio` section of the persisted payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(rename = "bufferSize", default = "default_buffer_size")]
    pub buffer_size: u32,

    /// Driver API ordinal (0=MME, 1=ASIO, 2=WASAPI)
    #[serde(default)]
    pub api: DriverApi,

    #[serde(rename = "lastInputDevice", default = "empty_device")]
    pub last_input_device: DeviceName,

    #[serde(rename = "lastOutputDevice", default = "empty_device")]
    pub last_output_device: DeviceName,

    /// Unmodeled keys, preserved across load/save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_buffer_size() -> u32 {
    DEFAULT_BUFFER_SIZE
}

fn empty_device() -> DeviceName {
    DeviceName::new("")
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            api: DriverApi::default(),
            last_input_device: empty_device(),
            last_output_device: empty_device(),
            extra: Map::new(),
        }
    }
}

/// Complete persisted configuration payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPayload {
    /// Device names per driver API, written by the enumeration source
    #[serde(rename = "deviceScan", default)]
    pub device_scan: DeviceListing,

    #[serde(default)]
    pub audio: AudioSettings,

    /// Unmodeled top-level sections, preserved across load/save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigPayload {
    /// Load a payload from a JSON file
    #[instrument(skip(path))]
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let contents = fs::read_to_string(path).await?;
        let payload: Self = serde_json::from_str(&contents)?;

        debug!("Configuration loaded successfully");
        Ok(payload)
    }

    /// Save the payload to a JSON file
    #[instrument(skip(self, path))]
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!(path = %path.display(), "Saving configuration");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;

        debug!("Configuration saved successfully");
        Ok(())
    }
}

/// Manager for the configuration file on disk
///
/// Owns the payload's location and the missing/corrupt-file policy. The
/// catalog and store never see this type; they only consume the in-memory
/// payload it produces.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Default config file path
    ///
    /// Returns `~/.config/soundpanel/config.json` on Linux/Mac,
    /// `%APPDATA%\soundpanel\config.json` on Windows.
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("soundpanel").join("config.json"))
            .ok_or_else(|| ConfigError::Invalid("Could not determine config directory".to_string()))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load the payload
    ///
    /// If the file doesn't exist, writes and returns the default payload.
    /// If the file is corrupt, backs it up and returns the default payload.
    #[instrument(skip(self))]
    pub async fn load(&self) -> ConfigPayload {
        if !self.config_path.exists() {
            info!(
                path = %self.config_path.display(),
                "Config file not found, creating default"
            );

            let payload = ConfigPayload::default();

            if let Err(e) = payload.save_to_file(&self.config_path).await {
                error!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to save default config"
                );
            }

            return payload;
        }

        match ConfigPayload::load_from_file(&self.config_path).await {
            Ok(payload) => payload,
            Err(e) => {
                error!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to load config, using default"
                );

                let backup_path = self.config_path.with_extension("json.corrupt");
                if let Err(copy_err) = fs::copy(&self.config_path, &backup_path).await {
                    error!(
                        path = %backup_path.display(),
                        error = %copy_err,
                        "Failed to backup corrupt config"
                    );
                }

                ConfigPayload::default()
            }
        }
    }

    /// Save the payload
    #[instrument(skip(self, payload))]
    pub async fn save(&self, payload: &ConfigPayload) -> Result<()> {
        payload.save_to_file(&self.config_path).await
    }
}
