//! Monitor configuration
//!
//! One immutable structure carries everything an operator supplies before
//! start: timing, thresholds, calibration profiles, and the dispatch mode.
//! It is constructed once, passed by reference into the components that
//! need it, and never mutated at runtime; there is no ambient or global
//! configuration state. Channel credentials live with the channel
//! implementations, not here.

use crate::calibration::{MoistureCalibration, TdsCalibration};
use crate::dispatch::DispatchMode;
use crate::threshold::Thresholds;

/// Fixed-at-start configuration for one monitoring node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// Time between sampling cycles (ms)
    pub sample_interval_ms: u64,
    /// Minimum time between outbound alert dispatch attempts (ms)
    pub alert_cooldown_ms: u64,
    /// Per-metric alert limits
    pub thresholds: Thresholds,
    /// Soil-moisture probe references
    pub moisture: MoistureCalibration,
    /// TDS probe constants
    pub tds: TdsCalibration,
    /// Whether alerts fan out to every channel or only the first
    pub dispatch_mode: DispatchMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 5_000,
            alert_cooldown_ms: 60_000,
            thresholds: Thresholds::default(),
            moisture: MoistureCalibration::default(),
            tds: TdsCalibration::default(),
            dispatch_mode: DispatchMode::All,
        }
    }
}

impl MonitorConfig {
    /// Set the sampling interval in seconds.
    pub const fn sample_interval_secs(mut self, secs: u64) -> Self {
        self.sample_interval_ms = secs * 1_000;
        self
    }

    /// Set the alert cooldown in seconds.
    pub const fn alert_cooldown_secs(mut self, secs: u64) -> Self {
        self.alert_cooldown_ms = secs * 1_000;
        self
    }

    /// Replace the alert thresholds.
    pub const fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the soil-moisture calibration profile.
    pub const fn moisture(mut self, moisture: MoistureCalibration) -> Self {
        self.moisture = moisture;
        self
    }

    /// Replace the TDS calibration profile.
    pub const fn tds(mut self, tds: TdsCalibration) -> Self {
        self.tds = tds;
        self
    }

    /// Set the dispatch mode.
    pub const fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.dispatch_mode = mode;
        self
    }
}
