//! The sampling cycle orchestrator
//!
//! [`Monitor`] owns the ports and runs the fixed per-cycle sequence:
//!
//! ```text
//! read sensors → status line → evaluate thresholds → drive indicator
//!              → maybe dispatch → sleep
//! ```
//!
//! One cycle fully completes before the next begins; the only suspension
//! points are the indicator pulses, the channel sends (bounded by their
//! configured timeouts), and the inter-cycle sleep. Sensor faults and
//! network failures degrade the cycle (an absent reading, a skipped
//! dispatch) and never end the loop. The only exit is the cooperative
//! stop flag, observed at cycle boundaries, which forces the indicator
//! off before [`Monitor::run`] returns.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::MonitorConfig;
use crate::dispatch::{compose_message, DispatchOutcome, Dispatcher};
use crate::indicator;
use crate::reading::{CycleReadings, SoilReading};
use crate::threshold::{self, AlertList};
use crate::time::Clock;
use crate::traits::{AirSensor, AlertChannel, AnalogInput, Delay, NetworkLink, StatusLed};

/// Everything one cycle did, for embedding and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle counter
    pub cycle: u64,
    /// What the sensors measured (faults as absences)
    pub readings: CycleReadings,
    /// Alert conditions, in evaluation order
    pub alerts: AlertList,
    /// What the dispatcher decided
    pub outcome: DispatchOutcome,
}

/// The monitoring loop over a set of ports.
///
/// Sensors, link, indicator, and timing are compile-time ports; alert
/// channels are passed to [`run`](Monitor::run) as trait objects because
/// a node typically mixes providers.
pub struct Monitor<A, S, T, N, L, D, C>
where
    A: AirSensor,
    S: AnalogInput,
    T: AnalogInput,
    N: NetworkLink,
    L: StatusLed,
    D: Delay,
    C: Clock,
{
    config: MonitorConfig,
    air: A,
    soil: S,
    tds: T,
    link: N,
    led: L,
    delay: D,
    clock: C,
    dispatcher: Dispatcher,
    cycle: u64,
}

impl<A, S, T, N, L, D, C> Monitor<A, S, T, N, L, D, C>
where
    A: AirSensor,
    S: AnalogInput,
    T: AnalogInput,
    N: NetworkLink,
    L: StatusLed,
    D: Delay,
    C: Clock,
{
    /// Assemble a monitor from its configuration and ports.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: MonitorConfig,
        air: A,
        soil: S,
        tds: T,
        link: N,
        led: L,
        delay: D,
        clock: C,
    ) -> Self {
        let dispatcher = Dispatcher::new(config.alert_cooldown_ms, config.dispatch_mode);
        Self {
            config,
            air,
            soil,
            tds,
            link,
            led,
            delay,
            clock,
            dispatcher,
            cycle: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Run one full cycle and report what happened.
    pub fn run_cycle(&mut self, channels: &mut [&mut dyn AlertChannel]) -> CycleReport {
        self.cycle += 1;

        if !self.link.is_connected() && self.link.connect() {
            log::info!("network link re-established");
        }

        let air = match self.air.measure() {
            Ok(reading) => Some(reading),
            Err(fault) => {
                log::warn!("air sensor fault: {}", fault);
                None
            }
        };

        let soil = match self.soil.sample() {
            Ok(raw) => Some(SoilReading::from_raw(raw, &self.config.moisture)),
            Err(fault) => {
                log::warn!("soil sensor fault: {}", fault);
                None
            }
        };

        let mut readings = CycleReadings {
            air,
            soil,
            tds: None,
        };
        readings.tds = match self.tds.sample() {
            Ok(raw) => Some(
                self.config
                    .tds
                    .convert(raw, readings.compensation_temp_c()),
            ),
            Err(fault) => {
                log::warn!("tds sensor fault: {}", fault);
                None
            }
        };

        log::info!("cycle {}: {}", self.cycle, readings);

        let alerts = threshold::evaluate(&readings, &self.config.thresholds);
        if !alerts.is_empty() {
            log::warn!("cycle {}: {}", self.cycle, compose_message(&alerts));
        }

        indicator::drive(
            &mut self.led,
            &mut self.delay,
            indicator::pattern_for(!alerts.is_empty()),
        );

        let outcome = self.dispatcher.maybe_dispatch(
            &alerts,
            channels,
            self.link.is_connected(),
            self.clock.now(),
        );

        CycleReport {
            cycle: self.cycle,
            readings,
            alerts,
            outcome,
        }
    }

    /// Run cycles until `stop` is set, then force the indicator off.
    pub fn run(&mut self, channels: &mut [&mut dyn AlertChannel], stop: &AtomicBool) {
        log::info!(
            "monitor starting: sample interval {} ms, alert cooldown {} ms",
            self.config.sample_interval_ms,
            self.config.alert_cooldown_ms
        );
        if !self.link.connect() {
            log::warn!("network link unavailable at startup, continuing offline");
        }

        while !stop.load(Ordering::Relaxed) {
            self.run_cycle(channels);
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let interval = self.config.sample_interval_ms.min(u64::from(u32::MAX)) as u32;
            self.delay.delay_ms(interval);
        }

        self.led.set_low();
        log::info!("monitor stopped after {} cycle(s), indicator off", self.cycle);
    }
}
