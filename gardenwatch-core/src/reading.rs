//! Calibrated reading types for one sampling cycle
//!
//! Everything here is created fresh each cycle and discarded at cycle end;
//! the types are small `Copy` values so reports and logs can carry them
//! without allocation. Absence is first-class: a faulted sensor leaves its
//! slot in [`CycleReadings`] as `None` and the cycle carries on.

use core::fmt;

use crate::calibration::MoistureCalibration;
use crate::constants::EC_REFERENCE_C;

/// One atomic temperature/humidity measurement.
///
/// Both values come from the same physical measurement cycle; they are
/// present or absent together.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirReading {
    /// Air temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %RH
    pub humidity_pct: f32,
}

/// Calibrated soil-moisture reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoilReading {
    /// Moisture percentage, 0 = dry reference, 100 = wet reference
    pub percent: u8,
    /// Raw ADC sample the percentage was derived from
    pub raw: u16,
}

impl SoilReading {
    /// Map a raw ADC sample through a calibration profile.
    pub fn from_raw(raw: u16, calibration: &MoistureCalibration) -> Self {
        Self {
            percent: calibration.percent(raw),
            raw,
        }
    }
}

/// Calibrated conductivity reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TdsReading {
    /// Probe voltage in V
    pub voltage_v: f32,
    /// Temperature-compensated electrical conductivity in mS/cm
    pub ec_ms_cm: f32,
    /// Estimated total dissolved solids in ppm
    pub ppm: u32,
    /// Raw ADC sample the estimate was derived from
    pub raw: u16,
}

/// Everything one cycle measured, faults included as absences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReadings {
    /// Air temperature/humidity pair, absent on sensor fault
    pub air: Option<AirReading>,
    /// Soil moisture, absent on sensor fault
    pub soil: Option<SoilReading>,
    /// Conductivity / TDS, absent on sensor fault
    pub tds: Option<TdsReading>,
}

impl CycleReadings {
    /// Temperature to use for EC compensation.
    ///
    /// Falls back to the 25 °C reference when the air reading is absent.
    pub fn compensation_temp_c(&self) -> f32 {
        self.air.map_or(EC_REFERENCE_C, |air| air.temperature_c)
    }
}

impl fmt::Display for CycleReadings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.air {
            Some(air) => write!(
                f,
                "air {:.1} C / {:.1}%",
                air.temperature_c, air.humidity_pct
            )?,
            None => write!(f, "air unavailable")?,
        }
        match self.soil {
            Some(soil) => write!(f, ", soil {}% (raw {})", soil.percent, soil.raw)?,
            None => write!(f, ", soil unavailable")?,
        }
        match self.tds {
            Some(tds) => write!(
                f,
                ", tds {} ppm ({:.3} V, {:.3} mS/cm, raw {})",
                tds.ppm, tds.voltage_v, tds.ec_ms_cm, tds.raw
            ),
            None => write!(f, ", tds unavailable"),
        }
    }
}
