//! Error taxonomy for the thermal loop.
//!
//! The simulation itself cannot fail once the object graph is built. Errors
//! only come from constructing that graph: thresholds, reading sources and the
//! config file.

use std::path::PathBuf;

/// Errors from building or configuring the thermal loop
#[derive(Debug, thiserror::Error)]
pub enum ThermalError {
    /// Thresholds must be finite with warning strictly below emergency
    #[error("invalid thresholds: warning {warning} must be below emergency {emergency}")]
    Configuration { warning: f64, emergency: f64 },

    /// A reading source produced no values
    #[error("reading sequence is empty")]
    EmptySequence,

    /// The config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ThermalError>;
