//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.partigraph/config.toml`
//! 2. Local config: `.partigraph/config.toml` (in the application root)
//! 3. Programmatic overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{
    ConfigOverrides, LogFormat, LoggingConfig, PartiConfig, PartitionSettings, DEFAULT_PARTITION_KEY,
    DEFAULT_WRITE_PARTITION,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Global configuration directory name.
const GLOBAL_CONFIG_DIR: &str = ".partigraph";

/// Local configuration directory name.
const LOCAL_CONFIG_DIR: &str = ".partigraph";

/// Configuration loader with caching and inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.partigraph`)
    global_config_dir: Option<PathBuf>,

    /// Cached global config
    global_config: Option<PartiConfig>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// Automatically detects the global config directory (`~/.partigraph`).
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(GLOBAL_CONFIG_DIR));

        Self {
            global_config_dir,
            global_config: None,
        }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
            global_config: None,
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the local config file path for an application root.
    pub fn local_config_path(&self, root: &Path) -> PathBuf {
        root.join(LOCAL_CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for an application root with optional overrides.
    ///
    /// Merges config in order: global → local → overrides, then validates.
    pub fn load(
        &mut self,
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<PartiConfig, ConfigError> {
        let mut config = PartiConfig::default();

        if let Some(global_config) = self.load_global()? {
            config = merge_configs(config, global_config);
        }

        if let Some(local_config) = self.load_local(root)? {
            config = merge_configs(config, local_config);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        config.validate()?;
        debug!(
            "Loaded partition config: key={} write={} read={:?}",
            config.partition.key,
            config.partition.write,
            config.partition.read_partitions()
        );
        Ok(config)
    }

    /// Load only the global configuration.
    pub fn load_global(&mut self) -> Result<Option<PartiConfig>, ConfigError> {
        if let Some(ref config) = self.global_config {
            return Ok(Some(config.clone()));
        }

        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        let config = load_config_file(&global_path)?;

        self.global_config = Some(config.clone());

        Ok(Some(config))
    }

    /// Load only the local configuration for an application root.
    pub fn load_local(&self, root: &Path) -> Result<Option<PartiConfig>, ConfigError> {
        let local_path = self.local_config_path(root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Save configuration to the global config file.
    pub fn save_global(&self, config: &PartiConfig) -> Result<(), ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };

        save_config_file(&global_dir.join(CONFIG_FILE_NAME), config)
    }

    /// Save configuration to the local config file for an application root.
    pub fn save_local(&self, root: &Path, config: &PartiConfig) -> Result<(), ConfigError> {
        save_config_file(&self.local_config_path(root), config)
    }

    /// Clear cached global configuration.
    ///
    /// Forces reload on next `load_global()` call.
    pub fn clear_cache(&mut self) {
        self.global_config = None;
    }
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<PartiConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

/// Save a configuration file to disk.
fn save_config_file(path: &Path, config: &PartiConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}

/// Merge two configurations, with `overlay` taking precedence.
///
/// Fields left at their default in `overlay` keep the `base` value.
fn merge_configs(base: PartiConfig, overlay: PartiConfig) -> PartiConfig {
    PartiConfig {
        partition: merge_partition(base.partition, overlay.partition),
        logging: merge_logging(base.logging, overlay.logging),
    }
}

/// Merge partition settings.
fn merge_partition(base: PartitionSettings, overlay: PartitionSettings) -> PartitionSettings {
    PartitionSettings {
        key: if overlay.key != DEFAULT_PARTITION_KEY {
            overlay.key
        } else {
            base.key
        },
        write: if overlay.write != DEFAULT_WRITE_PARTITION {
            overlay.write
        } else {
            base.write
        },
        // An explicit list replaces the inherited one wholesale
        read: overlay.read.or(base.read),
    }
}

/// Merge logging config.
fn merge_logging(base: LoggingConfig, overlay: LoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: if overlay.level != "info" {
            overlay.level
        } else {
            base.level
        },
        format: if overlay.format != LogFormat::default() {
            overlay.format
        } else {
            base.format
        },
        ansi: overlay.ansi && base.ansi,
    }
}
