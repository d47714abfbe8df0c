//! Thermal Common - simulated thermal-management loop
//!
//! A heat sensor replays a fixed reading sequence, classifies each value
//! against a warning and an emergency threshold, and notifies subscribers.
//! The thermostat turns those notifications into console alerts.
//!
//! ```text
//! Device::run_device
//!   -> Thermostat::run_therm   (subscribes handlers)
//!     -> HeatSensor::run       (classify + emit, one reading per tick)
//! ```

pub mod channel;
pub mod config;
pub mod cooling;
pub mod device;
pub mod display;
pub mod error;
pub mod events;
pub mod reading;
pub mod sensor;
pub mod thermostat;

pub use channel::{EventChannel, Listener, Subscription};
pub use config::{ControlSettings, ThermalConfig};
pub use cooling::{CoolingControl, CoolingDevice};
pub use device::{Device, DeviceControl};
pub use display::{ConsoleSink, MemorySink, Reporting, Severity};
pub use error::{Result, ThermalError};
pub use events::{Alert, AlertKind, ScanSummary};
pub use reading::{ReadingSequence, TemperatureSample, Thresholds};
pub use sensor::{Classifier, HeatSensor, Sensing};
pub use thermostat::Thermostat;
