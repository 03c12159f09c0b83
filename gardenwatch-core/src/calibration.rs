//! Raw-ADC to physical-unit calibration
//!
//! Two profiles cover the node's analog channels:
//!
//! - [`MoistureCalibration`] maps a resistive soil probe to a moisture
//!   percentage between its dry-in-air and submerged-in-water references.
//!   Higher raw means drier soil; the mapping is decreasing in raw.
//! - [`TdsCalibration`] maps a conductivity probe to voltage, compensated
//!   EC, and an estimated TDS figure in ppm.
//!
//! Both are field approximations, not laboratory formulas: the references
//! and cell constant come from calibrating the actual probes against known
//! conditions, and the mappings are kept exactly as deployed. Profiles are
//! constructed once at startup and immutable afterwards.

use crate::constants::{ADC_FULL_SCALE, EC_REFERENCE_C, EC_TEMP_COEFF_PER_C};
use crate::errors::{SensorFault, SensorResult};
use crate::reading::TdsReading;
use crate::traits::AnalogInput;

/// Dry/wet reference pair for a soil-moisture probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoistureCalibration {
    /// Raw ADC value with the probe dry in air (0 % moisture)
    pub dry_raw: u16,
    /// Raw ADC value with the probe submerged in water (100 % moisture)
    pub wet_raw: u16,
}

impl MoistureCalibration {
    /// Create a profile from measured references.
    pub const fn new(dry_raw: u16, wet_raw: u16) -> Self {
        Self { dry_raw, wet_raw }
    }

    /// A profile is degenerate when the references leave no usable span.
    ///
    /// Interpolation would divide by a non-positive span, so the mapping
    /// falls back to a binary clamp around the dry reference.
    pub const fn is_degenerate(&self) -> bool {
        self.wet_raw >= self.dry_raw
    }

    /// Map a raw sample to a moisture percentage in [0, 100].
    pub fn percent(&self, raw: u16) -> u8 {
        if self.is_degenerate() {
            return if raw >= self.dry_raw { 0 } else { 100 };
        }
        if raw >= self.dry_raw {
            0
        } else if raw <= self.wet_raw {
            100
        } else {
            let span = f32::from(self.dry_raw - self.wet_raw);
            let frac = f32::from(raw - self.wet_raw) / span;
            (100.0 - frac * 100.0) as u8
        }
    }
}

impl Default for MoistureCalibration {
    fn default() -> Self {
        // References measured with the deployed resistive probe: full
        // scale dry in air, 31405 submerged.
        Self::new(65535, 31405)
    }
}

/// Conversion constants for a TDS probe.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TdsCalibration {
    /// ADC reference voltage in V
    pub vref: f32,
    /// Probe cell constant relating voltage to conductivity
    pub cell_constant: f32,
    /// EC → TDS conversion factor (0.5–0.7 for typical solutions)
    pub tds_factor: f32,
    /// Output scaling from mS/cm-based EC to the reported ppm figure
    pub ppm_scale: f32,
}

impl TdsCalibration {
    /// Create a profile from measured constants.
    pub const fn new(vref: f32, cell_constant: f32, tds_factor: f32, ppm_scale: f32) -> Self {
        Self {
            vref,
            cell_constant,
            tds_factor,
            ppm_scale,
        }
    }

    /// Convert a raw sample to a calibrated conductivity reading.
    ///
    /// `temperature_c` is the ambient temperature for compensation; pass
    /// [`CycleReadings::compensation_temp_c`](crate::reading::CycleReadings::compensation_temp_c)
    /// so an absent air reading falls back to the 25 °C reference. A
    /// compensation coefficient of exactly zero skips compensation, and
    /// compensated EC is clamped at zero so the ppm estimate can never go
    /// negative.
    pub fn convert(&self, raw: u16, temperature_c: f32) -> TdsReading {
        let voltage = (f32::from(raw) / ADC_FULL_SCALE) * self.vref;
        let ec_raw = (voltage * 1000.0) / self.cell_constant;

        let coeff = 1.0 + EC_TEMP_COEFF_PER_C * (temperature_c - EC_REFERENCE_C);
        let ec = if coeff == 0.0 { ec_raw } else { ec_raw / coeff };
        let ec = if ec < 0.0 { 0.0 } else { ec };

        let ppm = libm::roundf(ec * self.tds_factor * self.ppm_scale);
        let ppm = if ppm < 0.0 { 0.0 } else { ppm };

        TdsReading {
            voltage_v: voltage,
            ec_ms_cm: ec,
            ppm: ppm as u32,
            raw,
        }
    }
}

impl Default for TdsCalibration {
    fn default() -> Self {
        // 3.3 V ADC reference, K = 560 demo cell constant, 0.5 TDS factor
        // reported on the ×1000 ppm convention.
        Self::new(3.3, 560.0, 0.5, 1000.0)
    }
}

/// Average `samples` raw readings from an analog channel.
///
/// Faulted samples are discarded; the call fails only when every sample
/// faulted. Used to derive dry/wet references when calibrating a probe in
/// the field.
pub fn average_samples<A: AnalogInput>(input: &mut A, samples: usize) -> SensorResult<u16> {
    let mut acc: u32 = 0;
    let mut taken: u32 = 0;
    for _ in 0..samples {
        if let Ok(raw) = input.sample() {
            acc += u32::from(raw);
            taken += 1;
        }
    }
    if taken == 0 {
        return Err(SensorFault::ReadFailed);
    }
    Ok((acc / taken) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moisture_references_map_to_extremes() {
        let cal = MoistureCalibration::default();
        assert_eq!(cal.percent(cal.dry_raw), 0);
        assert_eq!(cal.percent(cal.wet_raw), 100);
    }

    #[test]
    fn moisture_clamps_outside_references() {
        let cal = MoistureCalibration::new(50_000, 20_000);
        assert_eq!(cal.percent(65_535), 0);
        assert_eq!(cal.percent(0), 100);
    }

    #[test]
    fn moisture_is_decreasing_in_raw() {
        let cal = MoistureCalibration::new(50_000, 20_000);
        let mut last = 100;
        for raw in (20_000..=50_000).step_by(500) {
            let pct = cal.percent(raw);
            assert!(pct <= last, "not decreasing at raw {}", raw);
            last = pct;
        }
    }

    #[test]
    fn degenerate_profile_falls_back_to_binary_clamp() {
        let cal = MoistureCalibration::new(30_000, 30_000);
        assert!(cal.is_degenerate());
        assert_eq!(cal.percent(30_000), 0);
        assert_eq!(cal.percent(35_000), 0);
        assert_eq!(cal.percent(29_999), 100);

        let inverted = MoistureCalibration::new(20_000, 50_000);
        assert!(inverted.is_degenerate());
        assert_eq!(inverted.percent(25_000), 0);
        assert_eq!(inverted.percent(10_000), 100);
    }

    #[test]
    fn tds_zero_raw_is_zero_everything() {
        let cal = TdsCalibration::default();
        let reading = cal.convert(0, 25.0);
        assert_eq!(reading.voltage_v, 0.0);
        assert_eq!(reading.ec_ms_cm, 0.0);
        assert_eq!(reading.ppm, 0);
    }

    #[test]
    fn tds_compensation_at_reference_is_identity() {
        let cal = TdsCalibration::default();
        let reading = cal.convert(40_000, EC_REFERENCE_C);

        let voltage = (40_000.0 / ADC_FULL_SCALE) * cal.vref;
        let ec_raw = (voltage * 1000.0) / cal.cell_constant;
        assert!((reading.ec_ms_cm - ec_raw).abs() < 1e-6);
    }

    #[test]
    fn tds_warm_water_reads_lower_than_uncompensated() {
        let cal = TdsCalibration::default();
        let at_ref = cal.convert(40_000, 25.0);
        let warm = cal.convert(40_000, 30.0);
        assert!(warm.ec_ms_cm < at_ref.ec_ms_cm);
    }

    #[test]
    fn tds_never_negative_even_with_negative_coefficient() {
        let cal = TdsCalibration::default();
        // 1 + 0.02 * (T - 25) < 0 below -25 °C
        let reading = cal.convert(40_000, -60.0);
        assert_eq!(reading.ppm, 0);
        assert_eq!(reading.ec_ms_cm, 0.0);
    }

    #[test]
    fn tds_zero_coefficient_skips_compensation() {
        let cal = TdsCalibration::default();
        // coeff == 0 exactly at T = -25 °C
        let reading = cal.convert(40_000, -25.0);
        let at_ref = cal.convert(40_000, 25.0);
        assert!((reading.ec_ms_cm - at_ref.ec_ms_cm).abs() < 1e-6);
    }

    struct ScriptedAdc {
        samples: &'static [SensorResult<u16>],
        at: usize,
    }

    impl AnalogInput for ScriptedAdc {
        fn sample(&mut self) -> SensorResult<u16> {
            let value = self.samples[self.at % self.samples.len()];
            self.at += 1;
            value
        }
    }

    #[test]
    fn averaging_discards_faulted_samples() {
        let mut adc = ScriptedAdc {
            samples: &[Ok(1000), Err(SensorFault::ReadFailed), Ok(3000)],
            at: 0,
        };
        assert_eq!(average_samples(&mut adc, 3), Ok(2000));
    }

    #[test]
    fn averaging_fails_when_all_samples_fault() {
        let mut adc = ScriptedAdc {
            samples: &[Err(SensorFault::Timeout)],
            at: 0,
        };
        assert_eq!(average_samples(&mut adc, 5), Err(SensorFault::ReadFailed));
    }
}
