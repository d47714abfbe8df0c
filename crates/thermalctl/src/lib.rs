//! Thermalctl library - exposes the entry-point pieces for testing

pub mod cli;
pub mod logging;
pub mod prompt;

use tracing::{debug, info};

use thermal_common::{Device, DeviceControl, Reporting, ScanSummary, ThermalConfig};

/// Build the device from `config` and run one full pass against `reporter`
pub fn run_simulation(
    config: &ThermalConfig,
    reporter: &dyn Reporting,
) -> thermal_common::Result<ScanSummary> {
    let device = Device::from_config(config, reporter)?;
    let summary = device.run_device();

    for line in summary.to_log_lines() {
        debug!(target: "thermalctl", "{}", line);
    }
    info!(
        target: "thermalctl",
        readings = summary.readings,
        alerts = summary.alerts.len(),
        emergency = summary.reached_emergency(),
        "run complete"
    );
    Ok(summary)
}
