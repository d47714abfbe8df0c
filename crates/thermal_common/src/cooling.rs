//! Cooling device stand-in.
//!
//! There is no fan or compressor behind this; switching only reports the
//! action. The thermostat drives it when cooling control is enabled.

use std::cell::Cell;

use tracing::info;

use crate::display::{Reporting, Severity};

/// Something that can switch cooling on and off
pub trait CoolingControl {
    fn turn_on(&self);
    fn turn_off(&self);
}

pub struct CoolingDevice<'a> {
    reporter: &'a dyn Reporting,
    switches: Cell<usize>,
}

impl<'a> CoolingDevice<'a> {
    pub fn new(reporter: &'a dyn Reporting) -> Self {
        Self {
            reporter,
            switches: Cell::new(0),
        }
    }

    /// How many on/off actions have been issued
    pub fn switch_count(&self) -> usize {
        self.switches.get()
    }

    fn record(&self, message: &str) {
        self.switches.set(self.switches.get() + 1);
        self.reporter.report(Severity::Status, message);
    }
}

impl<'a> CoolingControl for CoolingDevice<'a> {
    fn turn_on(&self) {
        info!(target: "thermal::cooling", "cooling on");
        self.record("Cooling Device turned on.");
    }

    fn turn_off(&self) {
        info!(target: "thermal::cooling", "cooling off");
        self.record("Cooling Device turned off.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemorySink;

    #[test]
    fn test_switching_reports_action() {
        let sink = MemorySink::new();
        let cooling = CoolingDevice::new(&sink);

        cooling.turn_on();
        cooling.turn_off();

        assert_eq!(
            sink.messages(Severity::Status),
            vec!["Cooling Device turned on.", "Cooling Device turned off."]
        );
        assert_eq!(cooling.switch_count(), 2);
    }
}
