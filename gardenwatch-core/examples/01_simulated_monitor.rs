//! Simulated Monitoring Example
//!
//! Runs the full sampling cycle against scripted sensors and a console
//! "channel": no hardware, no network, no credentials.
//!
//! ## What You'll Learn
//!
//! - Assembling a [`Monitor`] from port implementations
//! - How calibrated readings, alerts, and dispatch outcomes relate
//! - What the cooldown does across consecutive alert cycles
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_monitor
//! ```

use gardenwatch_core::errors::{SendError, SensorResult};
use gardenwatch_core::reading::AirReading;
use gardenwatch_core::time::SystemClock;
use gardenwatch_core::{
    AirSensor, AlertChannel, AnalogInput, Delay, Monitor, MonitorConfig, NetworkLink, StatusLed,
};

/// Scripted DHT22: warms up and dries out over the run.
struct ScriptedAir {
    step: usize,
}

impl AirSensor for ScriptedAir {
    fn measure(&mut self) -> SensorResult<AirReading> {
        let script = [
            (24.0, 55.0), // comfortable
            (28.5, 47.0), // warming
            (33.0, 34.0), // hot and dry -> alerts
            (34.5, 31.0), // still hot -> cooldown suppresses
        ];
        let (temperature_c, humidity_pct) = script[self.step.min(script.len() - 1)];
        self.step += 1;
        Ok(AirReading {
            temperature_c,
            humidity_pct,
        })
    }
}

/// Soil probe drying out (raw climbs toward the dry reference).
struct ScriptedSoil {
    raw: u16,
}

impl AnalogInput for ScriptedSoil {
    fn sample(&mut self) -> SensorResult<u16> {
        let raw = self.raw;
        self.raw = self.raw.saturating_add(6_000);
        Ok(raw)
    }
}

/// TDS probe holding steady.
struct SteadyTds;

impl AnalogInput for SteadyTds {
    fn sample(&mut self) -> SensorResult<u16> {
        Ok(9_500)
    }
}

struct AlwaysOnline;

impl NetworkLink for AlwaysOnline {
    fn connect(&mut self) -> bool {
        true
    }

    fn is_connected(&self) -> bool {
        true
    }
}

struct ConsoleLed;

impl StatusLed for ConsoleLed {
    fn set_high(&mut self) {
        print!("*");
    }

    fn set_low(&mut self) {
        print!(".");
    }
}

/// No real sleeping; the script advances instantly.
struct NoDelay;

impl Delay for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// A "channel" that prints instead of calling a provider.
struct ConsoleChannel;

impl AlertChannel for ConsoleChannel {
    fn name(&self) -> &'static str {
        "console"
    }

    fn send(&mut self, message: &str) -> Result<(), SendError> {
        println!("  -> would send: {message}");
        Ok(())
    }
}

fn main() {
    println!("GardenWatch Simulated Monitor");
    println!("=============================\n");

    let config = MonitorConfig::default().alert_cooldown_secs(60);
    let mut monitor = Monitor::new(
        config,
        ScriptedAir { step: 0 },
        ScriptedSoil { raw: 45_000 },
        SteadyTds,
        AlwaysOnline,
        ConsoleLed,
        NoDelay,
        SystemClock::new(),
    );

    let mut console = ConsoleChannel;
    let mut channels: [&mut dyn AlertChannel; 1] = [&mut console];

    for _ in 0..4 {
        let report = monitor.run_cycle(&mut channels);
        println!("\ncycle {}: {}", report.cycle, report.readings);
        if report.alerts.is_empty() {
            println!("  all readings normal");
        } else {
            for alert in &report.alerts {
                println!("  ALERT [{}]: {}", alert.kind.name(), alert);
            }
        }
        println!("  dispatch: {:?}", report.outcome);
    }

    println!("\nNote: the second alert cycle is suppressed by the 60 s cooldown;");
    println!("with a real clock the next dispatch happens once it expires.");
}
