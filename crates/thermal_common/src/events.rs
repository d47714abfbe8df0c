//! Alert events emitted by the heat sensor
//!
//! ```text
//! +------------+     +--------------+     +-----------------+
//! | HeatSensor | --> | EventChannel | --> | Thermostat      |
//! | (classify) |     | (x3, ordered)|     | (report / act)  |
//! +------------+     +--------------+     +-----------------+
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::display::Severity;
use crate::reading::TemperatureSample;

/// Which of the three sensor channels an emission went out on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Reading at or above warning, below emergency
    WarningReached,
    /// Reading strictly above emergency
    EmergencyReached,
    /// Reading back below warning after an elevated one
    FellBelowWarning,
}

impl AlertKind {
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::WarningReached => Severity::Warning,
            AlertKind::EmergencyReached => Severity::Emergency,
            AlertKind::FellBelowWarning => Severity::Info,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::WarningReached => write!(f, "WarningReached"),
            AlertKind::EmergencyReached => write!(f, "EmergencyReached"),
            AlertKind::FellBelowWarning => write!(f, "FellBelowWarning"),
        }
    }
}

/// One emission: the channel and the sample it carried
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub sample: TemperatureSample,
}

impl Alert {
    pub fn new(kind: AlertKind, sample: TemperatureSample) -> Self {
        Self { kind, sample }
    }

    /// Format as a log line, e.g. `[WarningReached] 28.70 at 14:03:11`
    pub fn to_log_entry(&self) -> String {
        format!(
            "[{}] {:.2} at {}",
            self.kind,
            self.sample.value,
            self.sample.time_label()
        )
    }
}

/// Record of one full scan over the reading sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Readings processed
    pub readings: usize,
    /// Emissions, in the order they fired
    pub alerts: Vec<Alert>,
}

impl ScanSummary {
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Number of emissions of one kind
    pub fn count(&self, kind: AlertKind) -> usize {
        self.alerts.iter().filter(|a| a.kind == kind).count()
    }

    /// Kinds and values only, handy for comparisons
    pub fn sequence(&self) -> Vec<(AlertKind, f64)> {
        self.alerts
            .iter()
            .map(|a| (a.kind, a.sample.value))
            .collect()
    }

    pub fn to_log_lines(&self) -> Vec<String> {
        self.alerts.iter().map(|a| a.to_log_entry()).collect()
    }

    /// Whether the scan ever went above the emergency level
    pub fn reached_emergency(&self) -> bool {
        self.count(AlertKind::EmergencyReached) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_severity() {
        assert_eq!(AlertKind::WarningReached.severity(), Severity::Warning);
        assert_eq!(AlertKind::EmergencyReached.severity(), Severity::Emergency);
        assert_eq!(AlertKind::FellBelowWarning.severity(), Severity::Info);
    }

    #[test]
    fn test_log_entry_format() {
        let alert = Alert::new(AlertKind::WarningReached, TemperatureSample::now(28.7));
        let line = alert.to_log_entry();
        assert!(line.starts_with("[WarningReached] 28.70 at "));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = ScanSummary {
            readings: 3,
            ..Default::default()
        };
        summary.push(Alert::new(AlertKind::WarningReached, TemperatureSample::now(30.0)));
        summary.push(Alert::new(AlertKind::WarningReached, TemperatureSample::now(31.0)));
        summary.push(Alert::new(AlertKind::FellBelowWarning, TemperatureSample::now(20.0)));

        assert_eq!(summary.count(AlertKind::WarningReached), 2);
        assert_eq!(summary.count(AlertKind::EmergencyReached), 0);
        assert!(!summary.reached_emergency());
        assert_eq!(
            summary.sequence(),
            vec![
                (AlertKind::WarningReached, 30.0),
                (AlertKind::WarningReached, 31.0),
                (AlertKind::FellBelowWarning, 20.0),
            ]
        );
        assert_eq!(summary.to_log_lines().len(), 3);
    }
}
