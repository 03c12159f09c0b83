//! Core monitoring engine for GardenWatch
//!
//! Runs the sense → evaluate → indicate → dispatch cycle for a single
//! environmental node: air temperature/humidity, soil moisture, and water
//! conductivity (TDS), with cooldown-gated alert fan-out to messaging
//! channels.
//!
//! Key constraints:
//! - `no_std`-capable; no allocation in the cycle path
//! - Hardware and transports live behind port traits
//! - Sensor and network failures degrade the cycle, never end it
//!
//! ```no_run
//! use gardenwatch_core::{MoistureCalibration, Thresholds, threshold};
//! use gardenwatch_core::reading::{CycleReadings, SoilReading};
//!
//! let cal = MoistureCalibration::default();
//! let readings = CycleReadings {
//!     air: None,
//!     soil: Some(SoilReading::from_raw(40_000, &cal)),
//!     tds: None,
//! };
//!
//! for alert in threshold::evaluate(&readings, &Thresholds::default()) {
//!     // react to the condition
//!     let _ = alert;
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod calibration;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod indicator;
pub mod monitor;
pub mod reading;
pub mod threshold;
pub mod time;
pub mod traits;

// Public API
pub use calibration::{MoistureCalibration, TdsCalibration};
pub use config::MonitorConfig;
pub use dispatch::{DispatchMode, DispatchOutcome, Dispatcher};
pub use errors::{SendError, SensorFault};
pub use monitor::{CycleReport, Monitor};
pub use threshold::{Alert, AlertKind, AlertList, Thresholds};
pub use traits::{AirSensor, AlertChannel, AnalogInput, Delay, NetworkLink, StatusLed};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
