//! Explicit cancellable deadline timer.
//!
//! Wheel events arrive in bursts; the snap check must run exactly once
//! after a burst goes quiet. Every event re-arms the timer (replacing
//! any pending deadline), and the frame loop polls [`fire`] once per
//! tick, so there is no hidden callback and nothing to race with.
//!
//! [`fire`]: DebounceTimer::fire

use web_time::{Duration, Instant};

/// A single-shot timer that restarts whenever it is re-armed.
#[derive(Debug)]
pub struct DebounceTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Timer with the given quiet period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer: the deadline becomes `now + period`,
    /// discarding any pending deadline.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the quiet period has elapsed;
    /// the timer disarms itself on firing.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(PERIOD);
        timer.rearm(t0);

        assert!(!timer.fire(t0 + Duration::from_millis(100)));
        assert!(timer.fire(t0 + Duration::from_millis(250)));
        // Already fired; stays quiet until re-armed.
        assert!(!timer.fire(t0 + Duration::from_millis(400)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearm_extends_the_deadline() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(PERIOD);
        timer.rearm(t0);
        // A burst of events keeps pushing the deadline out.
        timer.rearm(t0 + Duration::from_millis(150));
        timer.rearm(t0 + Duration::from_millis(300));

        assert!(!timer.fire(t0 + Duration::from_millis(450)));
        assert!(timer.fire(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_discards_pending_deadline() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(PERIOD);
        timer.rearm(t0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire(t0 + Duration::from_secs(10)));
    }
}
