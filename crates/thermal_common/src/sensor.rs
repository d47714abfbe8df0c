//! Simulated heat sensor
//!
//! Replays a fixed reading sequence and classifies each value against the
//! warning and emergency thresholds. Classification rules, in priority order:
//!
//! 1. `warning <= t < emergency` -> WarningReached
//! 2. `t > emergency`            -> EmergencyReached
//! 3. `t < warning` after an elevated reading -> FellBelowWarning
//! 4. anything else              -> nothing
//!
//! A reading exactly equal to the emergency level matches neither of the
//! first two rules and emits nothing.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::channel::{EventChannel, Listener, Subscription};
use crate::display::{Reporting, Severity};
use crate::events::{Alert, AlertKind, ScanSummary};
use crate::reading::{ReadingSequence, TemperatureSample, Thresholds};

/// Pause between readings
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Source of temperature notifications
pub trait Sensing<'a> {
    fn subscribe_warning(&self, listener: Listener<'a, TemperatureSample>) -> Subscription<'a>;

    fn subscribe_emergency(&self, listener: Listener<'a, TemperatureSample>) -> Subscription<'a>;

    fn subscribe_fell_below_warning(
        &self,
        listener: Listener<'a, TemperatureSample>,
    ) -> Subscription<'a>;

    /// Run the full scan, blocking until the sequence ends
    fn run(&mut self) -> ScanSummary;
}

/// Threshold state machine; `warning_active` remembers whether the last
/// classified reading was elevated so the falling edge can be detected
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    thresholds: Thresholds,
    warning_active: bool,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            warning_active: false,
        }
    }

    pub fn warning_active(&self) -> bool {
        self.warning_active
    }

    /// Classify one reading, updating the elevated flag
    pub fn classify(&mut self, t: f64) -> Option<AlertKind> {
        let warning = self.thresholds.warning();
        let emergency = self.thresholds.emergency();

        if t >= warning && t < emergency {
            self.warning_active = true;
            Some(AlertKind::WarningReached)
        } else if t > emergency {
            self.warning_active = true;
            Some(AlertKind::EmergencyReached)
        } else if t < warning && self.warning_active {
            self.warning_active = false;
            Some(AlertKind::FellBelowWarning)
        } else {
            None
        }
    }
}

/// Sensor that plays back a fixed sequence, one reading per tick
pub struct HeatSensor<'a> {
    classifier: Classifier,
    readings: ReadingSequence,
    tick: Duration,
    reporter: &'a dyn Reporting,
    warning: EventChannel<'a, TemperatureSample>,
    emergency: EventChannel<'a, TemperatureSample>,
    fell_below_warning: EventChannel<'a, TemperatureSample>,
}

impl<'a> HeatSensor<'a> {
    pub fn new(
        thresholds: Thresholds,
        readings: ReadingSequence,
        reporter: &'a dyn Reporting,
    ) -> Self {
        Self {
            classifier: Classifier::new(thresholds),
            readings,
            tick: DEFAULT_TICK,
            reporter,
            warning: EventChannel::new(),
            emergency: EventChannel::new(),
            fell_below_warning: EventChannel::new(),
        }
    }

    /// Override the pause between readings; zero disables it
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn warning_active(&self) -> bool {
        self.classifier.warning_active()
    }

    fn channel(&self, kind: AlertKind) -> &EventChannel<'a, TemperatureSample> {
        match kind {
            AlertKind::WarningReached => &self.warning,
            AlertKind::EmergencyReached => &self.emergency,
            AlertKind::FellBelowWarning => &self.fell_below_warning,
        }
    }

    /// Walk the whole sequence, firing at most one notification per reading
    fn monitor_temperature(&mut self) -> ScanSummary {
        let mut summary = ScanSummary::default();

        for &value in self.readings.values() {
            self.reporter.report(Severity::Status, &value.to_string());
            summary.readings += 1;

            if let Some(kind) = self.classifier.classify(value) {
                let sample = TemperatureSample::now(value);
                debug!(target: "thermal::sensor", %kind, value, "emitting");
                self.channel(kind).emit(&sample);
                summary.push(Alert::new(kind, sample));
            }

            if !self.tick.is_zero() {
                thread::sleep(self.tick);
            }
        }

        summary
    }
}

impl<'a> Sensing<'a> for HeatSensor<'a> {
    fn subscribe_warning(&self, listener: Listener<'a, TemperatureSample>) -> Subscription<'a> {
        self.warning.subscribe(listener)
    }

    fn subscribe_emergency(&self, listener: Listener<'a, TemperatureSample>) -> Subscription<'a> {
        self.emergency.subscribe(listener)
    }

    fn subscribe_fell_below_warning(
        &self,
        listener: Listener<'a, TemperatureSample>,
    ) -> Subscription<'a> {
        self.fell_below_warning.subscribe(listener)
    }

    fn run(&mut self) -> ScanSummary {
        self.reporter.report(Severity::Status, "HeatSensor running");
        info!(
            target: "thermal::sensor",
            readings = self.readings.len(),
            tick = ?self.tick,
            "scan started"
        );

        let summary = self.monitor_temperature();

        info!(
            target: "thermal::sensor",
            readings = summary.readings,
            alerts = summary.alerts.len(),
            "scan complete"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemorySink;
    use std::cell::RefCell;

    fn classify_all(values: &[f64]) -> Vec<Option<AlertKind>> {
        let mut classifier = Classifier::new(Thresholds::reference());
        values.iter().map(|&v| classifier.classify(v)).collect()
    }

    #[test]
    fn test_warning_band() {
        assert_eq!(
            classify_all(&[27.0, 50.0, 84.99]),
            vec![Some(AlertKind::WarningReached); 3]
        );
    }

    #[test]
    fn test_above_emergency() {
        assert_eq!(classify_all(&[85.01]), vec![Some(AlertKind::EmergencyReached)]);
    }

    #[test]
    fn test_exact_emergency_emits_nothing() {
        let mut classifier = Classifier::new(Thresholds::reference());
        assert_eq!(classifier.classify(85.0), None);
        assert!(!classifier.warning_active());
    }

    #[test]
    fn test_exact_emergency_keeps_elevated_flag() {
        let mut classifier = Classifier::new(Thresholds::reference());
        classifier.classify(30.0);
        assert_eq!(classifier.classify(85.0), None);
        assert!(classifier.warning_active());
        assert_eq!(classifier.classify(20.0), Some(AlertKind::FellBelowWarning));
    }

    #[test]
    fn test_first_reading_below_warning_is_silent() {
        assert_eq!(classify_all(&[10.0, 12.0]), vec![None, None]);
    }

    #[test]
    fn test_falling_edge_fires_once() {
        assert_eq!(
            classify_all(&[30.0, 20.0, 19.0]),
            vec![
                Some(AlertKind::WarningReached),
                Some(AlertKind::FellBelowWarning),
                None
            ]
        );
    }

    #[test]
    fn test_falling_edge_after_emergency() {
        assert_eq!(
            classify_all(&[90.0, 10.0]),
            vec![
                Some(AlertKind::EmergencyReached),
                Some(AlertKind::FellBelowWarning)
            ]
        );
    }

    #[test]
    fn test_nan_emits_nothing() {
        assert_eq!(classify_all(&[f64::NAN]), vec![None]);
    }

    #[test]
    fn test_run_routes_to_matching_channel() {
        let sink = MemorySink::new();
        let got = RefCell::new(Vec::new());
        let readings = ReadingSequence::new(vec![30.0, 90.0, 10.0]).unwrap();
        let mut sensor =
            HeatSensor::new(Thresholds::reference(), readings, &sink).with_tick(Duration::ZERO);

        let _w = sensor.subscribe_warning(Box::new(|s| got.borrow_mut().push(("warning", s.value))));
        let _e =
            sensor.subscribe_emergency(Box::new(|s| got.borrow_mut().push(("emergency", s.value))));
        let _f = sensor
            .subscribe_fell_below_warning(Box::new(|s| got.borrow_mut().push(("fell", s.value))));

        let summary = sensor.run();

        assert_eq!(
            *got.borrow(),
            vec![("warning", 30.0), ("emergency", 90.0), ("fell", 10.0)]
        );
        assert_eq!(summary.readings, 3);
        assert_eq!(summary.alerts.len(), 3);
    }

    #[test]
    fn test_run_reports_start_and_each_reading() {
        let sink = MemorySink::new();
        let readings = ReadingSequence::new(vec![16.0, 26.75]).unwrap();
        let mut sensor =
            HeatSensor::new(Thresholds::reference(), readings, &sink).with_tick(Duration::ZERO);

        sensor.run();

        assert_eq!(
            sink.messages(Severity::Status),
            vec!["HeatSensor running", "16", "26.75"]
        );
    }

    #[test]
    fn test_default_tick_is_one_second() {
        let sink = MemorySink::new();
        let sensor = HeatSensor::new(Thresholds::reference(), ReadingSequence::reference(), &sink);
        assert_eq!(sensor.tick(), Duration::from_secs(1));
    }
}
