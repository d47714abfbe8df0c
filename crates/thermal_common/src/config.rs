//! Thermal loop configuration
//!
//! Configuration lives in /etc/thermal/config.toml. Every section and field
//! is optional; a missing default file means defaults.
//!
//! Thresholds are not configurable. They are fixed by the device.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, ThermalError};
use crate::reading::ReadingSequence;

/// System configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/thermal";
const CONFIG_FILE: &str = "config.toml";

/// Sensor playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Pause between readings in milliseconds (0 = no pause)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Replacement reading sequence; the reference data when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<f64>>,
}

fn default_interval_ms() -> u64 {
    1000 // one reading per second
}

impl SensorSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The sequence to replay; an explicitly empty list is an error
    pub fn reading_sequence(&self) -> Result<ReadingSequence> {
        match &self.readings {
            Some(values) => ReadingSequence::new(values.clone()),
            None => Ok(ReadingSequence::reference()),
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            readings: None,
        }
    }
}

/// Console presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Optional bindings from sensor events to device actions. Both off by
/// default: the stock wiring only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Turn cooling on when elevated, off on the falling edge
    #[serde(default)]
    pub engage_cooling: bool,

    /// Call the device's emergency shutdown on every emergency reading
    #[serde(default)]
    pub shutdown_on_emergency: bool,
}

/// Complete thermal loop configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalConfig {
    #[serde(default)]
    pub sensor: SensorSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub control: ControlSettings,
}

impl ThermalConfig {
    /// Load `path` if it exists, otherwise defaults
    ///
    /// A broken file also yields defaults; its error comes back alongside
    /// so the caller can report it once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<ThermalError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load from an explicit path; missing or malformed files are errors
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ThermalError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ThermalError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the given path
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    PathBuf::from(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
}
