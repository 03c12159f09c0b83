//! Shared constants for the monitoring engine
//!
//! Physical constants used by the calibration math, plus the fixed buffer
//! capacities and indicator timings the cycle path relies on. Calibration
//! *profile* values (probe references, cell constant) are configuration and
//! live in [`crate::config`] defaults instead.

// ===== ADC / ELECTROCHEMISTRY =====

/// Full-scale reading of a 16-bit ADC.
///
/// Raw samples are `u16`; conversions divide by this to recover the
/// measured fraction of the reference voltage.
pub const ADC_FULL_SCALE: f32 = 65535.0;

/// Reference temperature for conductivity compensation (°C).
///
/// EC probes are specified at 25 °C; readings at other temperatures are
/// normalized back to this point.
///
/// Source: standard practice for nutrient-solution EC measurement
pub const EC_REFERENCE_C: f32 = 25.0;

/// Conductivity temperature coefficient (fraction per °C).
///
/// Ionic conductivity rises roughly 2 % per degree above the reference
/// temperature for typical aqueous solutions.
pub const EC_TEMP_COEFF_PER_C: f32 = 0.02;

// ===== CYCLE BUFFERS =====

/// Maximum alert conditions a single cycle can produce.
///
/// The evaluation order admits at most four simultaneous conditions
/// (temperature + humidity + one soil state + TDS); a sensor fault
/// replaces the two air checks.
pub const MAX_ALERTS_PER_CYCLE: usize = 4;

/// Maximum channels a dispatch attempt reports on.
pub const MAX_CHANNELS: usize = 4;

/// Capacity of the composed alert message buffer (bytes).
///
/// Four worst-case alert lines plus separators fit comfortably; overflow
/// truncates the tail rather than failing the dispatch.
pub const ALERT_MESSAGE_CAPACITY: usize = 256;

// ===== INDICATOR TIMINGS =====

/// Pulses in the attention pattern.
pub const ALERT_BLINK_COUNT: u8 = 3;

/// On/off time of each attention pulse (ms).
pub const ALERT_BLINK_MS: u32 = 150;

/// On/off time of the single heartbeat pulse (ms).
pub const HEARTBEAT_BLINK_MS: u32 = 50;
