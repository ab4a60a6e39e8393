//! PartiGraph Configuration Management
//!
//! Provides configuration loading for partition views with support for:
//! - Global config: `~/.partigraph/config.toml`
//! - Local config: `.partigraph/config.toml` (in the embedding application's root)
//! - Programmatic overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: global → local → overrides.
//!
//! # Example TOML
//!
//! ```toml
//! [partition]
//! key = "_partition"
//! write = "tenant-a"
//! read = ["tenant-a", "shared"]
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

mod error;
mod loader;
mod logging;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use logging::{build_filter, init_logging, LOG_ENV_VAR};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default name of the property slot holding an element's partition.
pub const DEFAULT_PARTITION_KEY: &str = "_partition";

/// Property keys a partition key may not use.
///
/// Backends commonly reserve these for element identity and edge labels.
pub const RESERVED_PROPERTY_KEYS: &[&str] = &["id", "label"];

/// Default write partition.
pub const DEFAULT_WRITE_PARTITION: &str = "default";

/// Root configuration for PartiGraph.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PartiConfig {
    /// Partition view configuration
    pub partition: PartitionSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Partition view settings.
///
/// `read` is optional: when absent, the view reads exactly its write
/// partition. An explicit empty list makes only untagged elements visible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartitionSettings {
    /// Property key storing the owning partition
    pub key: String,

    /// Partition stamped on newly created elements
    pub write: String,

    /// Partitions visible to reads (None = only the write partition)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<Vec<String>>,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_PARTITION_KEY.to_string(),
            write: DEFAULT_WRITE_PARTITION.to_string(),
            read: None,
        }
    }
}

impl PartitionSettings {
    /// Create settings reading and writing a single partition.
    pub fn new(key: impl Into<String>, read_write: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            write: read_write.into(),
            read: None,
        }
    }

    /// Set an explicit read-partition list.
    pub fn with_read<I, S>(mut self, read: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read = Some(read.into_iter().map(Into::into).collect());
        self
    }

    /// The effective read-partition set.
    pub fn read_partitions(&self) -> BTreeSet<String> {
        match &self.read {
            Some(read) => read.iter().cloned().collect(),
            None => BTreeSet::from([self.write.clone()]),
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "partition.key",
                "partition key must not be empty",
            ));
        }
        if RESERVED_PROPERTY_KEYS.contains(&self.key.trim()) {
            return Err(ConfigError::invalid_value(
                "partition.key",
                format!("'{}' is a reserved property key", self.key),
            ));
        }
        if self.write.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "partition.write",
                "write partition must not be empty",
            ));
        }
        if let Some(read) = &self.read {
            if read.iter().any(|p| p.trim().is_empty()) {
                return Err(ConfigError::invalid_value(
                    "partition.read",
                    "read partitions must not contain empty names",
                ));
            }
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (e.g. "info", "partigraph_partition=trace")
    pub level: String,

    /// Log format (text, json)
    pub format: LogFormat,

    /// Emit ANSI colours in text output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            ansi: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured logging
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::invalid_value(
                "logging.format",
                format!("unknown log format '{}', expected text or json", s),
            )),
        }
    }
}

/// Overrides for configuration values.
///
/// Applied by the embedding application over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override partition key
    pub partition_key: Option<String>,

    /// Override write partition
    pub write_partition: Option<String>,

    /// Override read partitions
    pub read_partitions: Option<Vec<String>>,

    /// Override log level
    pub log_level: Option<String>,

    /// Override log format
    pub log_format: Option<LogFormat>,
}

impl PartiConfig {
    /// Apply overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref key) = overrides.partition_key {
            self.partition.key = key.clone();
        }

        if let Some(ref write) = overrides.write_partition {
            self.partition.write = write.clone();
        }

        if let Some(ref read) = overrides.read_partitions {
            self.partition.read = Some(read.clone());
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }

        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.partition.validate()?;
        build_filter(&self.logging.level)?;
        Ok(())
    }
}
