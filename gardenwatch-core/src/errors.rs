//! Error types for the monitoring cycle
//!
//! ## Design
//!
//! The cycle path treats nothing as fatal, so these types describe degraded
//! conditions rather than abort reasons:
//!
//! - Errors are small `Copy` enums with no heap data. They are returned in
//!   the cycle hot path and stored inside per-cycle reports.
//! - A [`SensorFault`] is a first-class "reading absent this cycle" value.
//!   The loop substitutes an absent reading and keeps running; the fault
//!   itself becomes an alert condition, not a crash.
//! - A [`SendError`] carries the provider's status code when one was
//!   received, so callers never probe a response object for capabilities.
//!   Provider-reported detail (error bodies) is logged at the channel
//!   layer, where it is still a `String`, and does not cross into core.

use thiserror_no_std::Error;

/// Result of one raw sensor measurement.
pub type SensorResult<T> = Result<T, SensorFault>;

/// A sensor could not produce a usable reading this cycle.
///
/// Recovered locally: the cycle continues with an absent reading, and the
/// next cycle retries the measurement from scratch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    /// The driver reported a failed measurement
    #[error("sensor read failed")]
    ReadFailed,

    /// The sensor did not respond within its timing budget
    #[error("sensor timed out")]
    Timeout,

    /// The driver returned data that fails its own plausibility checks
    #[error("sensor returned invalid data")]
    InvalidData,
}

/// A messaging channel failed to deliver an alert.
///
/// Per-channel and non-escalating: a failure is reported in the dispatch
/// outcome and logged, while sibling channels still get their attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The request never completed (connect failure, timeout, TLS, ...)
    #[error("transport error")]
    Transport,

    /// The endpoint answered with a non-success status
    #[error("endpoint rejected message (status {status})")]
    Rejected {
        /// HTTP status code reported by the provider
        status: u16,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorFault {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ReadFailed => defmt::write!(fmt, "read failed"),
            Self::Timeout => defmt::write!(fmt, "timed out"),
            Self::InvalidData => defmt::write!(fmt, "invalid data"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SendError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Transport => defmt::write!(fmt, "transport error"),
            Self::Rejected { status } => defmt::write!(fmt, "rejected (status {})", status),
        }
    }
}
