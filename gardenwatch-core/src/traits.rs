//! Port traits between the monitoring core and the outside world
//!
//! The core never touches hardware or sockets directly. Drivers, the
//! network interface, messaging transports, and the indicator LED all sit
//! behind these traits; [`Monitor`](crate::monitor::Monitor) consumes them
//! via generics (channels via `dyn`, since a node typically mixes
//! providers). Mock implementations in the test suite exercise the full
//! cycle without hardware.
//!
//! No retry logic lives behind the sensor ports: a fault yields an absent
//! reading for the cycle, and the next cycle measures again.

use crate::errors::{SendError, SensorResult};
use crate::reading::AirReading;

/// Combined temperature/humidity probe (DHT22-class).
///
/// One `measure` is one physical measurement cycle; a failure yields a
/// fault for the whole pair, because a partial result from a half-finished
/// transfer is not trustworthy.
pub trait AirSensor {
    /// Perform one measurement.
    fn measure(&mut self) -> SensorResult<AirReading>;
}

/// Raw analog channel (soil-moisture probe, TDS probe).
pub trait AnalogInput {
    /// Sample the channel once, full 16-bit range.
    fn sample(&mut self) -> SensorResult<u16>;
}

/// Network-interface bring-up collaborator.
///
/// The core only ever asks two questions: "try to get connected" and "are
/// we connected right now". While the link is down, dispatch is skipped
/// (`Offline`) and the sense/evaluate/indicate steps keep running.
pub trait NetworkLink {
    /// Attempt association within the implementation's bounded timeout.
    fn connect(&mut self) -> bool;

    /// Whether the link is currently usable.
    fn is_connected(&self) -> bool;
}

/// Outbound messaging channel for composed alert text.
///
/// Implementations are responsible for percent-escaping the text per
/// standard URL query-string rules when their provider requires it.
pub trait AlertChannel {
    /// Short channel name for logs and dispatch reports.
    fn name(&self) -> &'static str;

    /// Deliver one plain-text message.
    fn send(&mut self, message: &str) -> Result<(), SendError>;
}

/// Status LED line.
pub trait StatusLed {
    /// Drive the line high (LED on).
    fn set_high(&mut self);

    /// Drive the line low (LED off).
    fn set_low(&mut self);
}

/// Blocking sleep primitive.
///
/// Used both for indicator pulse timing and the inter-cycle sleep.
pub trait Delay {
    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// [`Delay`] backed by [`std::thread::sleep`] (requires `std`).
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
