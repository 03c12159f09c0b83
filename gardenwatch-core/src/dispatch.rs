//! Cooldown-gated alert dispatch
//!
//! One dispatcher owns the anti-spam policy for outbound alerts:
//!
//! - **Cooldown**: at most one dispatch attempt per cooldown window, no
//!   matter how many alert cycles occur inside it. The window starts when
//!   an attempt starts, before any channel send completes, so a slow or
//!   hanging endpoint cannot stretch the effective window.
//! - **Fan-out**: the composed message goes to every configured channel
//!   (or only the first, in [`DispatchMode::Primary`]), each attempt
//!   tracked independently. A failing channel is logged and reported,
//!   never escalated; sibling channels still get their attempt.
//! - **Connectivity**: with the link down the attempt is skipped entirely
//!   and reported as [`DispatchOutcome::Offline`], distinct from cooldown
//!   suppression. Neither suppression state touches the cooldown clock.
//!
//! The composed message joins the cycle's alert messages with `" | "` in
//! evaluation order.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::constants::{ALERT_MESSAGE_CAPACITY, MAX_CHANNELS};
use crate::errors::SendError;
use crate::threshold::Alert;
use crate::time::Timestamp;
use crate::traits::AlertChannel;

/// Which channels an attempt targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchMode {
    /// Send to every configured channel
    #[default]
    All,
    /// Send to the first configured channel only
    Primary,
}

/// Result of one channel's send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelReport {
    /// Channel name as reported by [`AlertChannel::name`]
    pub channel: &'static str,
    /// Whether the provider accepted the message
    pub result: Result<(), SendError>,
}

/// Per-channel reports from one dispatch attempt.
pub type ChannelReports = Vec<ChannelReport, MAX_CHANNELS>;

/// What the dispatcher decided for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No alerts this cycle; nothing to do, cooldown untouched
    Idle,
    /// Alerts present but inside the cooldown window; no network call
    Suppressed {
        /// Time remaining until the next attempt is allowed (ms)
        remaining_ms: u64,
    },
    /// Alerts present but the network link is down; retried next cycle
    Offline,
    /// An attempt was made; one report per targeted channel
    Dispatched {
        /// Per-channel success/failure, in channel order
        reports: ChannelReports,
    },
}

/// The composed message for one dispatch attempt.
pub type AlertMessage = String<ALERT_MESSAGE_CAPACITY>;

/// Join alert messages with `" | "` in list order.
///
/// The buffer is fixed-capacity; a (practically impossible) overflow drops
/// the tail rather than failing the dispatch.
pub fn compose_message(alerts: &[Alert]) -> AlertMessage {
    let mut message = AlertMessage::new();
    for (i, alert) in alerts.iter().enumerate() {
        if i > 0 {
            let _ = message.push_str(" | ");
        }
        let _ = write!(message, "{}", alert);
    }
    message
}

/// Cooldown clock plus fan-out policy. One per node, state persists for
/// the process lifetime.
#[derive(Debug)]
pub struct Dispatcher {
    cooldown_ms: u64,
    mode: DispatchMode,
    last_sent: Option<Timestamp>,
}

impl Dispatcher {
    /// Create a dispatcher that allows one attempt per `cooldown_ms`.
    pub const fn new(cooldown_ms: u64, mode: DispatchMode) -> Self {
        Self {
            cooldown_ms,
            mode,
            last_sent: None,
        }
    }

    /// When the last attempt started, if any.
    pub const fn last_sent(&self) -> Option<Timestamp> {
        self.last_sent
    }

    /// Decide and (maybe) perform this cycle's dispatch.
    pub fn maybe_dispatch(
        &mut self,
        alerts: &[Alert],
        channels: &mut [&mut dyn AlertChannel],
        link_up: bool,
        now: Timestamp,
    ) -> DispatchOutcome {
        if alerts.is_empty() {
            return DispatchOutcome::Idle;
        }

        if let Some(last) = self.last_sent {
            let elapsed = now.saturating_sub(last);
            if elapsed < self.cooldown_ms {
                let remaining_ms = self.cooldown_ms - elapsed;
                log::debug!("alert suppressed, cooldown for another {} ms", remaining_ms);
                return DispatchOutcome::Suppressed { remaining_ms };
            }
        }

        if !link_up {
            log::warn!("skipping alert dispatch: network link is down");
            return DispatchOutcome::Offline;
        }

        let message = compose_message(alerts);

        // The window starts at the attempt, not at completion.
        self.last_sent = Some(now);

        let targeted = match self.mode {
            DispatchMode::All => channels.len(),
            DispatchMode::Primary => channels.len().min(1),
        };

        let mut reports = ChannelReports::new();
        for channel in channels.iter_mut().take(targeted) {
            let result = channel.send(message.as_str());
            match &result {
                Ok(()) => log::info!("alert sent via {}", channel.name()),
                Err(e) => log::warn!("alert send via {} failed: {}", channel.name(), e),
            }
            reports
                .push(ChannelReport {
                    channel: channel.name(),
                    result,
                })
                .ok();
        }

        DispatchOutcome::Dispatched { reports }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::{evaluate, Thresholds};
    use crate::reading::{AirReading, CycleReadings};

    struct ScriptedChannel {
        name: &'static str,
        reply: Result<(), SendError>,
        sent: std::vec::Vec<std::string::String>,
    }

    impl ScriptedChannel {
        fn new(name: &'static str, reply: Result<(), SendError>) -> Self {
            Self {
                name,
                reply,
                sent: std::vec::Vec::new(),
            }
        }
    }

    impl AlertChannel for ScriptedChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        fn send(&mut self, message: &str) -> Result<(), SendError> {
            self.sent.push(message.into());
            self.reply
        }
    }

    fn hot_cycle_alerts() -> crate::threshold::AlertList {
        let readings = CycleReadings {
            air: Some(AirReading {
                temperature_c: 35.0,
                humidity_pct: 30.0,
            }),
            ..Default::default()
        };
        evaluate(&readings, &Thresholds::default())
    }

    #[test]
    fn composed_message_joins_in_order() {
        let alerts = hot_cycle_alerts();
        assert_eq!(
            compose_message(&alerts).as_str(),
            "High temperature: 35.0 C (limit 30.0 C) | Low humidity: 30.0% (limit 40.0%)"
        );
    }

    #[test]
    fn no_alerts_is_a_no_op() {
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::All);
        let mut tg = ScriptedChannel::new("telegram", Ok(()));
        let mut channels: [&mut dyn AlertChannel; 1] = [&mut tg];

        let outcome = dispatcher.maybe_dispatch(&[], &mut channels, true, 0);
        assert_eq!(outcome, DispatchOutcome::Idle);
        assert!(tg.sent.is_empty());
        assert_eq!(dispatcher.last_sent(), None);
    }

    #[test]
    fn cooldown_allows_one_attempt_per_window() {
        let alerts = hot_cycle_alerts();
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::All);
        let mut tg = ScriptedChannel::new("telegram", Ok(()));

        {
            let mut channels: [&mut dyn AlertChannel; 1] = [&mut tg];
            assert!(matches!(
                dispatcher.maybe_dispatch(&alerts, &mut channels, true, 0),
                DispatchOutcome::Dispatched { .. }
            ));
            assert!(matches!(
                dispatcher.maybe_dispatch(&alerts, &mut channels, true, 10_000),
                DispatchOutcome::Suppressed {
                    remaining_ms: 50_000
                }
            ));
            assert!(matches!(
                dispatcher.maybe_dispatch(&alerts, &mut channels, true, 65_000),
                DispatchOutcome::Dispatched { .. }
            ));
        }
        assert_eq!(tg.sent.len(), 2);
    }

    #[test]
    fn cooldown_starts_even_when_every_send_fails() {
        let alerts = hot_cycle_alerts();
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::All);
        let mut tg = ScriptedChannel::new("telegram", Err(SendError::Transport));
        let mut channels: [&mut dyn AlertChannel; 1] = [&mut tg];

        assert!(matches!(
            dispatcher.maybe_dispatch(&alerts, &mut channels, true, 0),
            DispatchOutcome::Dispatched { .. }
        ));
        // A degraded endpoint must not cause a retry storm.
        assert!(matches!(
            dispatcher.maybe_dispatch(&alerts, &mut channels, true, 10_000),
            DispatchOutcome::Suppressed { .. }
        ));
    }

    #[test]
    fn channel_failures_are_independent() {
        let alerts = hot_cycle_alerts();
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::All);
        let mut wa = ScriptedChannel::new("whatsapp", Err(SendError::Rejected { status: 503 }));
        let mut tg = ScriptedChannel::new("telegram", Ok(()));

        let outcome = {
            let mut channels: [&mut dyn AlertChannel; 2] = [&mut wa, &mut tg];
            dispatcher.maybe_dispatch(&alerts, &mut channels, true, 0)
        };

        match outcome {
            DispatchOutcome::Dispatched { reports } => {
                assert_eq!(reports.len(), 2);
                assert_eq!(reports[0].channel, "whatsapp");
                assert_eq!(reports[0].result, Err(SendError::Rejected { status: 503 }));
                assert_eq!(reports[1].channel, "telegram");
                assert_eq!(reports[1].result, Ok(()));
            }
            other => panic!("expected Dispatched, got {:?}", other),
        }
        assert_eq!(wa.sent.len(), 1);
        assert_eq!(tg.sent.len(), 1);
    }

    #[test]
    fn primary_mode_targets_first_channel_only() {
        let alerts = hot_cycle_alerts();
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::Primary);
        let mut wa = ScriptedChannel::new("whatsapp", Ok(()));
        let mut tg = ScriptedChannel::new("telegram", Ok(()));

        {
            let mut channels: [&mut dyn AlertChannel; 2] = [&mut wa, &mut tg];
            let outcome = dispatcher.maybe_dispatch(&alerts, &mut channels, true, 0);
            match outcome {
                DispatchOutcome::Dispatched { reports } => assert_eq!(reports.len(), 1),
                other => panic!("expected Dispatched, got {:?}", other),
            }
        }
        assert_eq!(wa.sent.len(), 1);
        assert!(tg.sent.is_empty());
    }

    #[test]
    fn link_down_skips_without_starting_cooldown() {
        let alerts = hot_cycle_alerts();
        let mut dispatcher = Dispatcher::new(60_000, DispatchMode::All);
        let mut tg = ScriptedChannel::new("telegram", Ok(()));

        {
            let mut channels: [&mut dyn AlertChannel; 1] = [&mut tg];
            assert_eq!(
                dispatcher.maybe_dispatch(&alerts, &mut channels, false, 0),
                DispatchOutcome::Offline
            );
        }
        assert!(tg.sent.is_empty());
        assert_eq!(dispatcher.last_sent(), None);

        // Link back up next cycle: the attempt proceeds immediately.
        let mut channels: [&mut dyn AlertChannel; 1] = [&mut tg];
        assert!(matches!(
            dispatcher.maybe_dispatch(&alerts, &mut channels, true, 5_000),
            DispatchOutcome::Dispatched { .. }
        ));
    }
}
