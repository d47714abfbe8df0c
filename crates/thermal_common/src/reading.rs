//! Temperature readings and the thresholds they are classified against.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermalError};

/// Warning level in degrees Celsius
pub const WARNING_LEVEL_TEMP: f64 = 27.0;

/// Emergency level in degrees Celsius
pub const EMERGENCY_LEVEL_TEMP: f64 = 85.0;

/// Readings replayed by the simulated sensor
pub const REFERENCE_READINGS: [f64; 16] = [
    16.0, 17.0, 16.5, 18.0, 19.0, 22.0, 24.0, 26.75, 28.7, 27.6, 26.0, 24.0, 22.0, 45.0, 68.0,
    86.45,
];

/// A single timestamped reading, created when the sensor classifies a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub timestamp: DateTime<Local>,
    pub value: f64,
}

impl TemperatureSample {
    /// Create a sample stamped with the current local time
    pub fn now(value: f64) -> Self {
        Self {
            timestamp: Local::now(),
            value,
        }
    }

    /// Time of day for display
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Warning and emergency levels; warning is always below emergency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    warning: f64,
    emergency: f64,
}

impl Thresholds {
    /// Build thresholds, rejecting non-finite values and `warning >= emergency`
    pub fn new(warning: f64, emergency: f64) -> Result<Self> {
        if !warning.is_finite() || !emergency.is_finite() || warning >= emergency {
            return Err(ThermalError::Configuration { warning, emergency });
        }
        Ok(Self { warning, emergency })
    }

    /// The fixed 27 / 85 policy the device ships with
    pub const fn reference() -> Self {
        Self {
            warning: WARNING_LEVEL_TEMP,
            emergency: EMERGENCY_LEVEL_TEMP,
        }
    }

    pub fn warning(&self) -> f64 {
        self.warning
    }

    pub fn emergency(&self) -> f64 {
        self.emergency
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::reference()
    }
}

/// Ordered, non-empty list of values a sensor replays
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSequence(Vec<f64>);

impl ReadingSequence {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ThermalError::EmptySequence);
        }
        Ok(Self(values))
    }

    pub fn reference() -> Self {
        Self(REFERENCE_READINGS.to_vec())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed sequence
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ReadingSequence {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_thresholds() {
        let t = Thresholds::reference();
        assert_eq!(t.warning(), 27.0);
        assert_eq!(t.emergency(), 85.0);
        assert_eq!(Thresholds::default(), t);
    }

    #[test]
    fn test_thresholds_reject_inverted_levels() {
        assert!(matches!(
            Thresholds::new(85.0, 27.0),
            Err(ThermalError::Configuration { .. })
        ));
        assert!(Thresholds::new(50.0, 50.0).is_err());
        assert!(Thresholds::new(f64::NAN, 50.0).is_err());
        assert!(Thresholds::new(10.0, f64::INFINITY).is_err());
        assert!(Thresholds::new(10.0, 20.0).is_ok());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(
            ReadingSequence::new(Vec::new()),
            Err(ThermalError::EmptySequence)
        ));
    }

    #[test]
    fn test_reference_sequence() {
        let seq = ReadingSequence::reference();
        assert_eq!(seq.len(), 16);
        assert!(!seq.is_empty());
        assert_eq!(seq.values()[0], 16.0);
        assert_eq!(seq.values()[15], 86.45);
    }

    #[test]
    fn test_sample_time_label() {
        let sample = TemperatureSample::now(21.5);
        assert_eq!(sample.value, 21.5);
        assert_eq!(sample.time_label().len(), 8);
    }
}
