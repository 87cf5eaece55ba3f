use std::time::{Duration, Instant};

use crate::error::{Error, Result};

pub const DEFAULT_DURATION_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running { remaining_secs: u64 },
    /// reported once, on the tick that reaches zero
    Expired,
}

/// Session countdown driven by explicit ticks.
///
/// Remaining time is derived from the instant the countdown was started, so
/// repeated or late ticks only re-read the clock and never count a second
/// twice. The displayed value therefore never increases while running.
#[derive(Clone, Debug)]
pub struct Countdown {
    duration: Duration,
    /// time accumulated before the last `stop`
    banked: Duration,
    running_since: Option<Instant>,
    displayed_secs: u64,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Result<Self> {
        if duration_secs == 0 {
            return Err(Error::invalid(
                "duration_secs",
                "countdown must last at least one second",
            ));
        }
        Ok(Self {
            duration: Duration::from_secs(duration_secs),
            banked: Duration::ZERO,
            running_since: None,
            displayed_secs: duration_secs,
        })
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Neither running nor holding time from a stopped run.
    pub fn is_idle(&self) -> bool {
        self.running_since.is_none() && self.banked.is_zero()
    }

    /// Start or resume. Starting a running countdown is a no-op, so there is
    /// only ever one active run.
    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Pause, keeping the time already elapsed.
    pub fn stop(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.saturating_duration_since(since);
            self.displayed_secs = self.remaining_at(now);
        }
    }

    /// Back to idle with the full duration on display.
    pub fn cancel(&mut self) {
        self.running_since = None;
        self.banked = Duration::ZERO;
        self.displayed_secs = self.duration_secs();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        (self.banked + running).min(self.duration)
    }

    /// Whole seconds left at `now`, rounded up so zero is only shown at expiry.
    pub fn remaining_at(&self, now: Instant) -> u64 {
        let left = self.duration - self.elapsed(now);
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    /// Value as of the last tick, stop or cancel.
    pub fn remaining_secs(&self) -> u64 {
        self.displayed_secs
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.running_since.is_none() {
            return TickOutcome::Idle;
        }

        let remaining_secs = self.remaining_at(now);
        if remaining_secs == 0 {
            tracing::debug!("countdown expired");
            self.cancel();
            return TickOutcome::Expired;
        }

        self.displayed_secs = remaining_secs;
        TickOutcome::Running { remaining_secs }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(DEFAULT_DURATION_SECS),
            banked: Duration::ZERO,
            running_since: None,
            displayed_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        assert_matches!(
            Countdown::new(0),
            Err(Error::InvalidArgument { name: "duration_secs", .. })
        );
    }

    #[test]
    fn test_default_is_sixty_seconds_and_idle() {
        let countdown = Countdown::default();
        assert_eq!(countdown.duration_secs(), 60);
        assert_eq!(countdown.remaining_secs(), 60);
        assert!(countdown.is_idle());
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_tick_when_idle() {
        let mut countdown = Countdown::new(60).unwrap();
        assert_eq!(countdown.tick(Instant::now()), TickOutcome::Idle);
    }

    #[test]
    fn test_counts_down_once_per_second() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(60).unwrap();
        countdown.start(t0);

        assert_eq!(
            countdown.tick(t0 + secs(1)),
            TickOutcome::Running { remaining_secs: 59 }
        );
        assert_eq!(
            countdown.tick(t0 + Duration::from_millis(1500)),
            TickOutcome::Running { remaining_secs: 59 }
        );
        assert_eq!(
            countdown.tick(t0 + secs(2)),
            TickOutcome::Running { remaining_secs: 58 }
        );
        assert_eq!(countdown.remaining_secs(), 58);
    }

    #[test]
    fn test_duplicate_ticks_do_not_double_count() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(60).unwrap();
        countdown.start(t0);

        let at = t0 + secs(10);
        assert_eq!(countdown.tick(at), TickOutcome::Running { remaining_secs: 50 });
        assert_eq!(countdown.tick(at), TickOutcome::Running { remaining_secs: 50 });
        assert_eq!(countdown.tick(at), TickOutcome::Running { remaining_secs: 50 });
    }

    #[test]
    fn test_remaining_never_increases() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(5).unwrap();
        countdown.start(t0);

        let mut last = countdown.remaining_secs();
        for ms in (0..5000).step_by(100) {
            if let TickOutcome::Running { remaining_secs } =
                countdown.tick(t0 + Duration::from_millis(ms))
            {
                assert!(remaining_secs <= last);
                last = remaining_secs;
            }
        }
    }

    #[test]
    fn test_second_start_does_not_restart() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(60).unwrap();
        countdown.start(t0);
        countdown.start(t0 + secs(30));

        assert_eq!(countdown.remaining_at(t0 + secs(30)), 30);
    }

    #[test]
    fn test_expires_once_and_resets_display() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(3).unwrap();
        countdown.start(t0);

        assert_eq!(countdown.tick(t0 + secs(3)), TickOutcome::Expired);
        assert_eq!(countdown.remaining_secs(), 3);
        assert!(countdown.is_idle());
        assert_eq!(countdown.tick(t0 + secs(4)), TickOutcome::Idle);
    }

    #[test]
    fn test_late_tick_still_expires() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(3).unwrap();
        countdown.start(t0);

        assert_eq!(countdown.tick(t0 + secs(90)), TickOutcome::Expired);
    }

    #[test]
    fn test_stop_and_resume() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(60).unwrap();
        countdown.start(t0);
        countdown.stop(t0 + secs(10));

        assert!(!countdown.is_running());
        assert!(!countdown.is_idle());
        assert_eq!(countdown.remaining_secs(), 50);
        assert_eq!(countdown.tick(t0 + secs(40)), TickOutcome::Idle);

        countdown.start(t0 + secs(40));
        assert_eq!(
            countdown.tick(t0 + secs(45)),
            TickOutcome::Running { remaining_secs: 45 }
        );
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(60).unwrap();
        countdown.start(t0);
        countdown.tick(t0 + secs(20));
        countdown.cancel();

        assert!(countdown.is_idle());
        assert_eq!(countdown.remaining_secs(), 60);
        assert_eq!(countdown.elapsed(t0 + secs(30)), Duration::ZERO);
    }
}
