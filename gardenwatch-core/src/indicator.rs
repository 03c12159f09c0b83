//! Status LED patterns
//!
//! The node has no display; the LED is the at-a-glance health readout.
//! Two patterns, chosen per cycle from the alert list alone; no state
//! machine survives the cycle:
//!
//! - **attention**: three rapid pulses, readable across a room
//! - **heartbeat**: one short pulse, "loop alive, nothing wrong"
//!
//! Driving a pattern blocks the control thread for its duration, which is
//! acceptable: pattern playback is part of the cycle's time budget, like
//! the sends and the inter-cycle sleep.

use crate::constants::{ALERT_BLINK_COUNT, ALERT_BLINK_MS, HEARTBEAT_BLINK_MS};
use crate::traits::{Delay, StatusLed};

/// A fixed on/off pulse sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    /// Number of pulses
    pub count: u8,
    /// On time per pulse (ms)
    pub on_ms: u32,
    /// Off time per pulse (ms)
    pub off_ms: u32,
}

impl BlinkPattern {
    /// Attention pattern played when any alert condition is active.
    pub const ALERT: Self = Self {
        count: ALERT_BLINK_COUNT,
        on_ms: ALERT_BLINK_MS,
        off_ms: ALERT_BLINK_MS,
    };

    /// Heartbeat played on a clean cycle.
    pub const HEARTBEAT: Self = Self {
        count: 1,
        on_ms: HEARTBEAT_BLINK_MS,
        off_ms: HEARTBEAT_BLINK_MS,
    };
}

/// Pattern for this cycle, from the only input that matters.
pub const fn pattern_for(alerts_present: bool) -> BlinkPattern {
    if alerts_present {
        BlinkPattern::ALERT
    } else {
        BlinkPattern::HEARTBEAT
    }
}

/// Play a pattern, leaving the LED low.
pub fn drive<L: StatusLed, D: Delay>(led: &mut L, delay: &mut D, pattern: BlinkPattern) {
    for _ in 0..pattern.count {
        led.set_high();
        delay.delay_ms(pattern.on_ms);
        led.set_low();
        delay.delay_ms(pattern.off_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLed {
        transitions: std::vec::Vec<bool>,
    }

    impl StatusLed for RecordingLed {
        fn set_high(&mut self) {
            self.transitions.push(true);
        }

        fn set_low(&mut self) {
            self.transitions.push(false);
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        slept_ms: std::vec::Vec<u32>,
    }

    impl Delay for RecordingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.slept_ms.push(ms);
        }
    }

    #[test]
    fn alert_pattern_pulses_three_times() {
        let mut led = RecordingLed::default();
        let mut delay = RecordingDelay::default();
        drive(&mut led, &mut delay, pattern_for(true));

        assert_eq!(led.transitions, [true, false, true, false, true, false]);
        assert_eq!(delay.slept_ms, [150; 6]);
    }

    #[test]
    fn heartbeat_is_a_single_short_pulse() {
        let mut led = RecordingLed::default();
        let mut delay = RecordingDelay::default();
        drive(&mut led, &mut delay, pattern_for(false));

        assert_eq!(led.transitions, [true, false]);
        assert_eq!(delay.slept_ms, [50, 50]);
    }

    #[test]
    fn patterns_end_with_the_led_low() {
        let mut led = RecordingLed::default();
        let mut delay = RecordingDelay::default();
        drive(&mut led, &mut delay, BlinkPattern::ALERT);
        assert_eq!(led.transitions.last(), Some(&false));
    }
}
