//! Thermostat - binds sensor notifications to console reporting
//!
//! Before the scan starts the thermostat subscribes one reporting handler per
//! sensor channel. Messages quote the device's thresholds. Optional control
//! bindings (see `ControlSettings`) add cooling and shutdown handlers after
//! the reporting ones.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{info, warn};

use crate::channel::Subscription;
use crate::config::ControlSettings;
use crate::cooling::CoolingControl;
use crate::device::DeviceControl;
use crate::display::{Reporting, Severity};
use crate::events::ScanSummary;
use crate::reading::TemperatureSample;
use crate::sensor::Sensing;

/// Message for a WarningReached notification
pub fn warning_message(sample: &TemperatureSample, warning: f64, emergency: f64) -> String {
    format!(
        "Warning Alert!! Temperature reached warning level (warning level is between {} and {}): {} at {}",
        warning,
        emergency,
        sample.value,
        sample.time_label()
    )
}

/// Message for an EmergencyReached notification
pub fn emergency_message(sample: &TemperatureSample, emergency: f64) -> String {
    format!(
        "Emergency Alert!! Temperature reached emergency level (emergency level is higher than {}): {} at {}",
        emergency,
        sample.value,
        sample.time_label()
    )
}

/// Message for a FellBelowWarning notification
pub fn fell_below_message(sample: &TemperatureSample, warning: f64) -> String {
    format!(
        "Information Alert!! Temperature fell below warning level (warning level is {}): {} at {}",
        warning,
        sample.value,
        sample.time_label()
    )
}

pub struct Thermostat<'a> {
    cooling: &'a dyn CoolingControl,
    sensor: Box<dyn Sensing<'a> + 'a>,
    device: &'a dyn DeviceControl,
    reporter: &'a dyn Reporting,
    control: ControlSettings,
}

impl<'a> Thermostat<'a> {
    pub fn new(
        cooling: &'a dyn CoolingControl,
        sensor: Box<dyn Sensing<'a> + 'a>,
        device: &'a dyn DeviceControl,
        reporter: &'a dyn Reporting,
    ) -> Self {
        Self {
            cooling,
            sensor,
            device,
            reporter,
            control: ControlSettings::default(),
        }
    }

    pub fn with_control(mut self, control: ControlSettings) -> Self {
        self.control = control;
        self
    }

    /// Subscribe reporting handlers, then control handlers if enabled
    fn wire_up_to_events(&self) -> Vec<Subscription<'a>> {
        let reporter = self.reporter;
        let warning = self.device.warning_temp();
        let emergency = self.device.emergency_temp();

        let mut subscriptions = vec![
            self.sensor.subscribe_warning(Box::new(move |sample| {
                reporter.report(
                    Severity::Warning,
                    &warning_message(sample, warning, emergency),
                );
            })),
            self.sensor.subscribe_emergency(Box::new(move |sample| {
                warn!(target: "thermal::thermostat", value = sample.value, "emergency level reached");
                reporter.report(Severity::Emergency, &emergency_message(sample, emergency));
            })),
            self.sensor.subscribe_fell_below_warning(Box::new(move |sample| {
                reporter.report(Severity::Info, &fell_below_message(sample, warning));
            })),
        ];

        if self.control.engage_cooling {
            subscriptions.extend(self.wire_cooling());
        }

        if self.control.shutdown_on_emergency {
            let device = self.device;
            subscriptions.push(
                self.sensor
                    .subscribe_emergency(Box::new(move |_| device.handle_emergency())),
            );
        }

        subscriptions
    }

    /// Cooling goes on at the first elevated reading and off on the falling edge
    fn wire_cooling(&self) -> Vec<Subscription<'a>> {
        let cooling = self.cooling;
        let engaged = Rc::new(Cell::new(false));

        let engage = {
            let engaged = Rc::clone(&engaged);
            move |_: &TemperatureSample| {
                if !engaged.replace(true) {
                    cooling.turn_on();
                }
            }
        };
        let release = move |_: &TemperatureSample| {
            if engaged.replace(false) {
                cooling.turn_off();
            }
        };

        vec![
            self.sensor.subscribe_warning(Box::new(engage.clone())),
            self.sensor.subscribe_emergency(Box::new(engage)),
            self.sensor.subscribe_fell_below_warning(Box::new(release)),
        ]
    }

    /// Wire handlers, run the sensor to completion, then unwire
    pub fn run_therm(&mut self) -> ScanSummary {
        self.reporter.report(Severity::Status, "Thermostat is running......");
        let subscriptions = self.wire_up_to_events();
        info!(
            target: "thermal::thermostat",
            handlers = subscriptions.len(),
            "wired to sensor"
        );

        let summary = self.sensor.run();

        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        summary
    }
}
