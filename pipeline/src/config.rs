use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use common::types::{Channel, Destination};
use uploader_rs::{SessionConfig, UploadConfig};

use crate::constants::{BASE_URL_ENV, DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
use crate::errors::PipelineError;

/// What `start()` does when the staging directory cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagingPolicy {
    /// Log a warning and keep uploading from memory.
    #[default]
    Degrade,
    /// Fail `start()` and stay stopped.
    Refuse,
}

/// Logical batch name of each channel on the collector side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchNames {
    pub accel: String,
    pub gyro: String,
}

impl Default for BatchNames {
    fn default() -> Self {
        Self {
            accel: Channel::Accel.default_batch_name().to_string(),
            gyro: Channel::Gyro.default_batch_name().to_string(),
        }
    }
}

impl BatchNames {
    pub fn for_channel(&self, channel: Channel) -> &str {
        match channel {
            Channel::Accel => &self.accel,
            Channel::Gyro => &self.gyro,
        }
    }
}

/// Pipeline configuration, usually read from a TOML file.
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tick_interval_ms: u64,
    /// Export a final batch per channel when the session stops.
    pub flush_on_stop: bool,
    /// Upload header-only batches for channels with nothing buffered.
    pub upload_empty_batches: bool,
    /// Directory for staging files. None uploads straight from memory.
    pub staging_dir: Option<PathBuf>,
    pub staging_policy: StagingPolicy,
    pub upload: UploadConfig,
    pub session: SessionConfig,
    pub batch_names: BatchNames,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            flush_on_stop: false,
            upload_empty_batches: false,
            staging_dir: None,
            staging_policy: StagingPolicy::default(),
            upload: UploadConfig::default(),
            session: SessionConfig::default(),
            batch_names: BatchNames::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = toml::from_str(content)
            .map_err(|e| PipelineError::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, applies environment overrides and validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = toml::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("Invalid TOML: {}", e)))?;
        let config = config.with_base_url(std::env::var(BASE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replaces `upload.base_url` when `base_url` is set.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            log::info!("Using collector {} from {}", base_url, BASE_URL_ENV);
            self.upload.base_url = base_url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(PipelineError::Config(format!(
                "tick_interval_ms must be at least {} ms, got {}",
                MIN_TICK_INTERVAL_MS, self.tick_interval_ms
            )));
        }
        if Channel::ALL
            .iter()
            .any(|channel| self.batch_names.for_channel(*channel).is_empty())
        {
            return Err(PipelineError::Config(
                "batch names must not be empty".to_string(),
            ));
        }
        if self.batch_names.accel == self.batch_names.gyro {
            return Err(PipelineError::Config(format!(
                "channels must use distinct batch names, both are {}",
                self.batch_names.accel
            )));
        }
        self.upload.validate().map_err(PipelineError::Config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn destination(&self) -> Destination {
        self.upload.destination()
    }
}
