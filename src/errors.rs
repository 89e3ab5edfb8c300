//! Defines the custom error types used throughout the `showcase_rs` crate.
//!
//! Navigation itself never fails (invalid requests are absorbed as no-ops), so
//! the errors here cover the fallible edges only: loading configuration and
//! loading the car catalog. Each error type implements `Debug`, `Display`, and
//! `std::error::Error`, and provides `From` implementations for the underlying
//! error types.

use std::error::Error as StdError;
use std::fmt;

// --- ConfigError ---
/// Errors related to configuration loading and parsing.
#[must_use = "a configuration error should be handled or propagated"]
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while trying to read the configuration file.
    Io(std::io::Error),
    /// The configuration content is not valid INI.
    Parse(String),
    /// A key is present but its value cannot be used.
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Configuration parse error: {}", e),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for configuration key '{}': '{}'", key, value)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

// --- CatalogError ---
/// Errors related to loading the car catalog and building slide sequences.
#[must_use = "a catalog error should be handled or propagated"]
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Io(std::io::Error),
    /// The catalog JSON could not be deserialized.
    SerdeJson(serde_json::Error),
    /// A slide sequence was requested from an empty list of slides.
    EmptySequence,
    /// A showcase link points at a car id that is not in the catalog.
    UnknownCar { showcase_id: String, car_id: u32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Catalog I/O error: {}", e),
            CatalogError::SerdeJson(e) => write!(f, "Catalog JSON (de)serialization error: {}", e),
            CatalogError::EmptySequence => write!(f, "A slide sequence needs at least one slide"),
            CatalogError::UnknownCar { showcase_id, car_id } => write!(
                f,
                "Showcase slide '{}' links to unknown car id {}",
                showcase_id, car_id
            ),
        }
    }
}

impl StdError for CatalogError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerdeJson(err)
    }
}

// --- AppError (Top-level error enum) ---
/// A top-level error type that can encompass any error within the application.
#[must_use = "an application error should be handled or propagated"]
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Catalog(CatalogError),
    Generic(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Application Configuration Error: {}", e),
            AppError::Catalog(e) => write!(f, "Application Catalog Error: {}", e),
            AppError::Generic(s) => write!(f, "Application Error: {}", s),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self { AppError::Config(err) }
}
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self { AppError::Catalog(err) }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self { AppError::Generic(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn invalid_value_names_key_and_value() {
        let err = ConfigError::InvalidValue {
            key: "autoplay_interval_ms".into(),
            value: "soon".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for configuration key 'autoplay_interval_ms': 'soon'"
        );
    }

    #[test]
    fn app_error_exposes_catalog_source() {
        let err = AppError::from(CatalogError::EmptySequence);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("at least one slide"));
    }
}
