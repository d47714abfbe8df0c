//! Device - owns the threshold policy and wires the object graph
//!
//! `run_device` builds a cooling device, a heat sensor and a thermostat,
//! then runs the thermostat to completion. `handle_emergency` is a separate
//! action for callers holding the device; it is only bound to the sensor's
//! emergency channel when `control.shutdown_on_emergency` is set.

use std::cell::Cell;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{ControlSettings, ThermalConfig};
use crate::cooling::CoolingDevice;
use crate::display::{Reporting, Severity};
use crate::error::Result;
use crate::events::ScanSummary;
use crate::reading::{ReadingSequence, Thresholds};
use crate::sensor::{HeatSensor, DEFAULT_TICK};
use crate::thermostat::Thermostat;

/// Top-level device capability
pub trait DeviceControl {
    fn warning_temp(&self) -> f64;
    fn emergency_temp(&self) -> f64;

    /// Run one full simulation pass
    fn run_device(&self) -> ScanSummary;

    /// Report an emergency and shut down
    fn handle_emergency(&self);
}

pub struct Device<'a> {
    thresholds: Thresholds,
    readings: ReadingSequence,
    tick: Duration,
    control: ControlSettings,
    reporter: &'a dyn Reporting,
    shutdowns: Cell<usize>,
}

impl<'a> Device<'a> {
    /// Reference device: 27/85 thresholds, reference readings, one-second tick
    pub fn new(reporter: &'a dyn Reporting) -> Self {
        Self {
            thresholds: Thresholds::reference(),
            readings: ReadingSequence::reference(),
            tick: DEFAULT_TICK,
            control: ControlSettings::default(),
            reporter,
            shutdowns: Cell::new(0),
        }
    }

    pub fn from_config(config: &ThermalConfig, reporter: &'a dyn Reporting) -> Result<Self> {
        Ok(Self::new(reporter)
            .with_readings(config.sensor.reading_sequence()?)
            .with_tick(config.sensor.tick())
            .with_control(config.control))
    }

    pub fn with_readings(mut self, readings: ReadingSequence) -> Self {
        self.readings = readings;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_control(mut self, control: ControlSettings) -> Self {
        self.control = control;
        self
    }

    pub fn readings(&self) -> &ReadingSequence {
        &self.readings
    }

    pub fn control(&self) -> ControlSettings {
        self.control
    }

    /// Times `shutdown` has run
    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.get()
    }

    fn shutdown(&self) {
        self.shutdowns.set(self.shutdowns.get() + 1);
        self.reporter
            .report(Severity::Emergency, "Shutting down the system.");
    }
}

impl<'a> DeviceControl for Device<'a> {
    fn warning_temp(&self) -> f64 {
        self.thresholds.warning()
    }

    fn emergency_temp(&self) -> f64 {
        self.thresholds.emergency()
    }

    fn run_device(&self) -> ScanSummary {
        self.reporter.report(Severity::Status, "Device starting.");
        info!(
            target: "thermal::device",
            warning = self.warning_temp(),
            emergency = self.emergency_temp(),
            engage_cooling = self.control.engage_cooling,
            shutdown_on_emergency = self.control.shutdown_on_emergency,
            "device starting"
        );

        let cooling = CoolingDevice::new(self.reporter);
        let sensor =
            HeatSensor::new(self.thresholds, self.readings.clone(), self.reporter).with_tick(self.tick);
        let mut thermostat = Thermostat::new(&cooling, Box::new(sensor), self, self.reporter)
            .with_control(self.control);

        thermostat.run_therm()
    }

    fn handle_emergency(&self) {
        warn!(target: "thermal::device", "emergency shutdown requested");
        self.reporter.report(
            Severity::Emergency,
            "Encountered Emergency...\nShutting down system",
        );
        self.shutdown();
    }
}
