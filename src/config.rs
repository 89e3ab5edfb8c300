//! Handles showcase configuration loading.
//!
//! This module defines the `ShowcaseConfig` struct which holds the autoplay
//! interval, the transition lockout, and an optional catalog path. Settings are
//! read from the `[showcase]` section of an INI file; every key is optional
//! and falls back to the defaults below.

use std::time::Duration;

use configparser::ini::Ini;
use log::{debug, error, info};

use super::errors::ConfigError;

/// Section all showcase keys live under.
pub const SECTION: &str = "showcase";

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_TRANSITION_LOCKOUT_MS: u64 = 800;

/// Holds the showcase's configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseConfig {
    /// Time between automatic advances.
    pub autoplay_interval: Duration,
    /// Time the controller stays locked after an index change.
    pub transition_lockout: Duration,
    /// JSON catalog to load instead of the bundled one.
    pub catalog_path: Option<String>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(DEFAULT_AUTOPLAY_INTERVAL_MS),
            transition_lockout: Duration::from_millis(DEFAULT_TRANSITION_LOCKOUT_MS),
            catalog_path: None,
        }
    }
}

impl ShowcaseConfig {
    /// Parses configuration from INI text.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed INI and
    /// `ConfigError::InvalidValue` for non-numeric or zero durations.
    #[must_use = "parsing configuration can fail, the Result must be handled"]
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        let mut config_parser = Ini::new();
        config_parser.read(content.to_string()).map_err(ConfigError::Parse)?;
        Self::from_parser(&config_parser)
    }

    fn from_parser(config_parser: &Ini) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let autoplay_interval = read_millis(config_parser, "autoplay_interval_ms")?
            .unwrap_or(defaults.autoplay_interval);
        let transition_lockout = read_millis(config_parser, "transition_lockout_ms")?
            .unwrap_or(defaults.transition_lockout);

        let catalog_path = config_parser
            .get(SECTION, "catalog_path")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        debug!("Loaded config value for key 'catalog_path': {:?}", catalog_path);

        Ok(Self {
            autoplay_interval,
            transition_lockout,
            catalog_path,
        })
    }
}

/// Reads a positive millisecond value, returning `None` when the key is absent.
fn read_millis(config_parser: &Ini, key: &str) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = config_parser.get(SECTION, key) else {
        debug!("Key '{}' not set, using default.", key);
        return Ok(None);
    };
    let invalid = || ConfigError::InvalidValue { key: key.to_string(), value: raw.clone() };
    let millis: u64 = raw.trim().parse().map_err(|_| invalid())?;
    if millis == 0 {
        return Err(invalid());
    }
    debug!("Loaded config value for key '{}': {}ms", key, millis);
    Ok(Some(Duration::from_millis(millis)))
}

/// Loads showcase configuration from the specified INI file path.
///
/// # Arguments
/// * `path` - The path to the configuration file (e.g., "/etc/showcase.conf").
///
/// # Errors
/// Returns `ConfigError::Io` if the file cannot be read, otherwise the same
/// errors as [`ShowcaseConfig::from_ini_str`].
#[must_use = "loading configuration can fail, the Result must be handled"]
pub fn load_config(path: &str) -> Result<ShowcaseConfig, ConfigError> {
    info!("Attempting to load config from: {}", path);
    let content = std::fs::read_to_string(path).map_err(|e| {
        error!("Error reading config file '{}': {}", path, e);
        ConfigError::Io(e)
    })?;
    let config = ShowcaseConfig::from_ini_str(&content)?;
    info!("Configuration loaded successfully from {}: {:?}", path, config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_input_yields_defaults() {
        let config = ShowcaseConfig::from_ini_str("").unwrap();
        assert_eq!(config, ShowcaseConfig::default());
        assert_eq!(config.autoplay_interval, Duration::from_millis(5000));
        assert_eq!(config.transition_lockout, Duration::from_millis(800));
    }

    #[test]
    fn overrides_are_read_from_showcase_section() {
        let config = ShowcaseConfig::from_ini_str(
            "[showcase]\nautoplay_interval_ms = 3000\ntransition_lockout_ms = 250\ncatalog_path = /tmp/cars.json\n",
        )
        .unwrap();
        assert_eq!(config.autoplay_interval, Duration::from_millis(3000));
        assert_eq!(config.transition_lockout, Duration::from_millis(250));
        assert_eq!(config.catalog_path.as_deref(), Some("/tmp/cars.json"));
    }

    #[test]
    fn keys_outside_the_section_are_ignored() {
        let config = ShowcaseConfig::from_ini_str("[other]\nautoplay_interval_ms = 1\n").unwrap();
        assert_eq!(config.autoplay_interval, Duration::from_millis(DEFAULT_AUTOPLAY_INTERVAL_MS));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let err =
            ShowcaseConfig::from_ini_str("[showcase]\nautoplay_interval_ms = soon\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "autoplay_interval_ms"
        ));
    }

    #[test]
    fn zero_lockout_is_rejected() {
        let err =
            ShowcaseConfig::from_ini_str("[showcase]\ntransition_lockout_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "transition_lockout_ms"
        ));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[showcase]\nautoplay_interval_ms = 1200").unwrap();
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.autoplay_interval, Duration::from_millis(1200));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.conf");
        let err = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
