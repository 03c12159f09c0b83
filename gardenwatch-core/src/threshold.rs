//! Threshold evaluation
//!
//! Turns one cycle's calibrated readings into an ordered list of alert
//! conditions. The order is fixed and load-bearing: the dispatcher joins
//! the alert messages in list order, so reordering the checks changes the
//! text subscribers receive.
//!
//! Evaluation order:
//! 1. Air pair absent → [`AlertKind::SensorFault`], and the temperature and
//!    humidity checks are skipped for the cycle.
//! 2. Temperature strictly above the high limit.
//! 3. Humidity strictly below the low limit.
//! 4. Soil strictly below the dry threshold, else strictly above the wet
//!    threshold (mutually exclusive; dry wins under a misconfigured
//!    dry ≥ wet pair because it is checked first).
//! 5. TDS strictly above the high limit.
//!
//! All comparisons are strict: a value sitting exactly on its limit raises
//! nothing. An absent soil or TDS reading skips its checks.

use core::fmt;

use heapless::Vec;

use crate::constants::MAX_ALERTS_PER_CYCLE;
use crate::reading::CycleReadings;

/// Alert condition categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertKind {
    /// The air temperature/humidity measurement failed this cycle
    SensorFault = 0,
    /// Air temperature above the configured high limit
    HighTemperature = 1,
    /// Relative humidity below the configured low limit
    LowHumidity = 2,
    /// Soil moisture below the dry threshold
    SoilDry = 3,
    /// Soil moisture above the wet threshold
    SoilWet = 4,
    /// TDS estimate above the configured high limit
    HighTds = 5,
}

impl AlertKind {
    /// Short name for logs and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            AlertKind::SensorFault => "sensor-fault",
            AlertKind::HighTemperature => "high-temperature",
            AlertKind::LowHumidity => "low-humidity",
            AlertKind::SoilDry => "soil-dry",
            AlertKind::SoilWet => "soil-wet",
            AlertKind::HighTds => "high-tds",
        }
    }
}

/// One alert condition: what fired, the measured value, and the limit it
/// crossed.
///
/// The human-readable message subscribers receive is the `Display`
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    /// Which condition fired
    pub kind: AlertKind,
    /// The measured value that crossed the limit
    pub measured: f32,
    /// The configured limit it crossed
    pub limit: f32,
}

impl Alert {
    const fn new(kind: AlertKind, measured: f32, limit: f32) -> Self {
        Self {
            kind,
            measured,
            limit,
        }
    }

    const fn sensor_fault() -> Self {
        Self::new(AlertKind::SensorFault, 0.0, 0.0)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::SensorFault => write!(f, "Sensor error: air probe read failed"),
            AlertKind::HighTemperature => write!(
                f,
                "High temperature: {:.1} C (limit {:.1} C)",
                self.measured, self.limit
            ),
            AlertKind::LowHumidity => write!(
                f,
                "Low humidity: {:.1}% (limit {:.1}%)",
                self.measured, self.limit
            ),
            AlertKind::SoilDry => write!(
                f,
                "Soil dry: {:.0}% (threshold {:.0}%)",
                self.measured, self.limit
            ),
            AlertKind::SoilWet => write!(
                f,
                "Soil wet: {:.0}% (threshold {:.0}%)",
                self.measured, self.limit
            ),
            AlertKind::HighTds => write!(
                f,
                "High TDS: {:.0} ppm (limit {:.0} ppm)",
                self.measured, self.limit
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Alert {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{} (measured {}, limit {})",
            self.kind.name(),
            self.measured,
            self.limit
        );
    }
}

/// Per-metric limits evaluated every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Alert when air temperature exceeds this (°C)
    pub temp_high_c: f32,
    /// Alert when relative humidity drops below this (%RH)
    pub humidity_low_pct: f32,
    /// Alert when soil moisture drops below this (%)
    pub soil_dry_pct: u8,
    /// Alert when soil moisture exceeds this (%)
    pub soil_wet_pct: u8,
    /// Alert when the TDS estimate exceeds this (ppm)
    pub tds_high_ppm: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temp_high_c: 30.0,
            humidity_low_pct: 40.0,
            soil_dry_pct: 30,
            soil_wet_pct: 70,
            tds_high_ppm: 800,
        }
    }
}

/// Alert conditions produced by one cycle, in evaluation order.
pub type AlertList = Vec<Alert, MAX_ALERTS_PER_CYCLE>;

/// Evaluate one cycle's readings against the configured limits.
pub fn evaluate(readings: &CycleReadings, limits: &Thresholds) -> AlertList {
    let mut alerts = AlertList::new();

    match readings.air {
        None => {
            alerts.push(Alert::sensor_fault()).ok();
        }
        Some(air) => {
            if air.temperature_c > limits.temp_high_c {
                alerts
                    .push(Alert::new(
                        AlertKind::HighTemperature,
                        air.temperature_c,
                        limits.temp_high_c,
                    ))
                    .ok();
            }
            if air.humidity_pct < limits.humidity_low_pct {
                alerts
                    .push(Alert::new(
                        AlertKind::LowHumidity,
                        air.humidity_pct,
                        limits.humidity_low_pct,
                    ))
                    .ok();
            }
        }
    }

    if let Some(soil) = readings.soil {
        if soil.percent < limits.soil_dry_pct {
            alerts
                .push(Alert::new(
                    AlertKind::SoilDry,
                    f32::from(soil.percent),
                    f32::from(limits.soil_dry_pct),
                ))
                .ok();
        } else if soil.percent > limits.soil_wet_pct {
            alerts
                .push(Alert::new(
                    AlertKind::SoilWet,
                    f32::from(soil.percent),
                    f32::from(limits.soil_wet_pct),
                ))
                .ok();
        }
    }

    if let Some(tds) = readings.tds {
        if tds.ppm > limits.tds_high_ppm {
            alerts
                .push(Alert::new(
                    AlertKind::HighTds,
                    tds.ppm as f32,
                    limits.tds_high_ppm as f32,
                ))
                .ok();
        }
    }

    alerts
}
