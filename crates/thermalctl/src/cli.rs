//! Command-line surface for thermalctl
//!
//! There are no subcommands: one invocation is one simulation pass. Flags
//! override the config file.

use std::path::{Path, PathBuf};

use clap::Parser;
use thermal_common::config::config_path;
use thermal_common::{ThermalConfig, ThermalError};

/// Configuration for one run
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ThermalConfig,

    /// Why an unreadable system config file was replaced by defaults
    pub fallback: Option<ThermalError>,
}

#[derive(Parser, Debug)]
#[command(name = "thermalctl")]
#[command(about = "Simulated thermal-management loop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: /etc/thermal/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pause between readings in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Replace the reading sequence, e.g. "20,30.5,90"
    #[arg(long, value_name = "CSV", value_delimiter = ',', num_args = 1..)]
    pub readings: Option<Vec<f64>>,

    /// Disable coloured alerts
    #[arg(long)]
    pub no_color: bool,

    /// Do not wait for key presses before and after the run
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    /// Fold flag values into a loaded config
    pub fn apply(&self, config: &mut ThermalConfig) {
        if let Some(ms) = self.interval_ms {
            config.sensor.interval_ms = ms;
        }
        if let Some(readings) = &self.readings {
            config.sensor.readings = Some(readings.clone());
        }
        if self.no_color {
            config.display.color = false;
        }
    }

    /// Config from `--config`, or the system file with fallback to defaults
    pub fn load_config(&self) -> thermal_common::Result<LoadedConfig> {
        self.load_config_with_default(&config_path())
    }

    /// Like `load_config`, reading `default_path` when `--config` is absent
    pub fn load_config_with_default(
        &self,
        default_path: &Path,
    ) -> thermal_common::Result<LoadedConfig> {
        let (mut config, fallback) = match &self.config {
            Some(path) => (ThermalConfig::load_from(path)?, None),
            None => ThermalConfig::load_or_default(default_path),
        };
        self.apply(&mut config);
        Ok(LoadedConfig { config, fallback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_flags() {
        let cli = Cli::try_parse_from(["thermalctl"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.no_prompt);

        let mut config = ThermalConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, ThermalConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "thermalctl",
            "--interval-ms",
            "0",
            "--readings",
            "20,30.5,90",
            "--no-color",
        ])
        .unwrap();

        let mut config = ThermalConfig::default();
        config.sensor.interval_ms = 500;
        cli.apply(&mut config);

        assert_eq!(config.sensor.interval_ms, 0);
        assert_eq!(config.sensor.readings, Some(vec![20.0, 30.5, 90.0]));
        assert!(!config.display.color);
    }

    #[test]
    fn test_bad_reading_rejected() {
        assert!(Cli::try_parse_from(["thermalctl", "--readings", "20,hot"]).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let cli =
            Cli::try_parse_from(["thermalctl", "--config", "/definitely/not/here.toml"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_broken_system_config_falls_back_with_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sensor\nreadings = [").unwrap();

        let cli = Cli::try_parse_from(["thermalctl", "--interval-ms", "0"]).unwrap();
        let loaded = cli.load_config_with_default(file.path()).unwrap();

        assert!(matches!(loaded.fallback, Some(ThermalError::ConfigParse { .. })));
        assert_eq!(loaded.config.sensor.interval_ms, 0);
        assert!(loaded.config.sensor.readings.is_none());
    }

    #[test]
    fn test_explicit_config_has_no_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncolor = false").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["thermalctl", "--config", &path]).unwrap();
        let loaded = cli.load_config().unwrap();

        assert!(loaded.fallback.is_none());
        assert!(!loaded.config.display.color);
    }
}
