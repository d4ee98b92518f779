//! Tool Configuration Module
//!
//! Loads configuration for netpuncher tools from an optional TOML file with
//! `PUNCHER__`-prefixed environment overrides. Every section has defaults, so
//! an empty or missing file is a valid configuration.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use codec::MAX_PACKET_SIZE;
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::{
    DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LEVEL, DEFAULT_RECV_BUFFER_SIZE, ENV_PREFIX, ENV_SEPARATOR,
};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PuncherConfig {
    pub logging: LoggingConfig,
    pub codec: CodecSettings,
    pub listen: ListenConfig,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Codec settings for tools that receive messages
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CodecSettings {
    /// Bytes handed to each UDP receive; at least `MAX_PACKET_SIZE`
    pub recv_buffer_size: usize,
}

/// Listener settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListenConfig {
    pub bind_address: SocketAddr,
    /// Stop listening after this long without a datagram
    pub read_timeout_ms: Option<u64>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0u16; 8], 11113))),
            read_timeout_ms: None,
        }
    }
}

impl ListenConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

impl PuncherConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Loading config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (PUNCHER__ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    pub fn validate(&self) -> Result<()> {
        if self.codec.recv_buffer_size < MAX_PACKET_SIZE {
            bail!(
                "codec.recv_buffer_size {} is below the largest message ({} bytes)",
                self.codec.recv_buffer_size,
                MAX_PACKET_SIZE
            );
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<PuncherConfig> {
    PuncherConfig::load(path)
}
