//! Property tests for the calibration mappings
//!
//! The unit tests pin the reference points; these pin the invariants over
//! the whole input space, degenerate profiles included.

use proptest::prelude::*;

use gardenwatch_core::{MoistureCalibration, TdsCalibration};

proptest! {
    /// Any profile, any raw sample: percent stays in [0, 100].
    #[test]
    fn moisture_percent_in_range(
        raw in any::<u16>(),
        dry in any::<u16>(),
        wet in any::<u16>(),
    ) {
        let cal = MoistureCalibration::new(dry, wet);
        prop_assert!(cal.percent(raw) <= 100);
    }

    /// Percent never increases with raw; holds for degenerate profiles
    /// too, where the mapping collapses to a step at the dry reference.
    #[test]
    fn moisture_percent_non_increasing(
        a in any::<u16>(),
        b in any::<u16>(),
        dry in any::<u16>(),
        wet in any::<u16>(),
    ) {
        let cal = MoistureCalibration::new(dry, wet);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(cal.percent(lo) >= cal.percent(hi));
    }

    /// EC and the ppm estimate never go negative, whatever the ambient
    /// temperature does to the compensation coefficient.
    #[test]
    fn tds_outputs_never_negative(
        raw in any::<u16>(),
        temp in -80.0f32..125.0f32,
    ) {
        let cal = TdsCalibration::default();
        let reading = cal.convert(raw, temp);
        prop_assert!(reading.voltage_v >= 0.0);
        prop_assert!(reading.ec_ms_cm >= 0.0);
        prop_assert!(reading.ppm as f32 <= reading.ec_ms_cm * cal.tds_factor * cal.ppm_scale + 0.5);
    }

    /// At the 25 °C reference the compensation step is the identity.
    #[test]
    fn tds_reference_temperature_is_identity(raw in any::<u16>()) {
        let cal = TdsCalibration::default();
        let reading = cal.convert(raw, 25.0);
        let voltage = (f32::from(raw) / 65535.0) * cal.vref;
        let ec_raw = (voltage * 1000.0) / cal.cell_constant;
        prop_assert!((reading.ec_ms_cm - ec_raw).abs() < 1e-6);
    }
}
