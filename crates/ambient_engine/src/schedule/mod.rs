//! Cancellable repeating tasks driven by the host's frame clock
//!
//! A [`RepeatingTask`] never runs anything itself. The owner polls it with the
//! current host time and performs one unit of work per firing it returns.
//! Cancelling the task's [`CancellationToken`] stops every task cloned from
//! that token at once, so teardown is a single call and tests stay
//! deterministic.
//!
//! ```text
//! host frame ──► owner.frame(now) ──► task.poll(now) ──► Some(due) ──► work(due)
//!                                            ▲
//!                        token.cancel() ─────┘  (None from then on)
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Shared single-threaded cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    /// Create a live token
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every task holding a clone of this token
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the token was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// How often a task fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Once per distinct frame timestamp
    EveryFrame,
    /// Every `period`, catching up on periods missed between polls
    Interval(Duration),
    /// A single firing
    Once,
}

/// A scheduled unit of work governed by a [`CancellationToken`]
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    cadence: Cadence,
    next_due: Duration,
    last_frame: Option<Duration>,
    token: CancellationToken,
    fired: u64,
    finished: bool,
}

impl RepeatingTask {
    /// Task that fires on every frame
    pub fn every_frame(token: CancellationToken) -> Self {
        Self::with_cadence(Cadence::EveryFrame, Duration::ZERO, token)
    }

    /// Task that first fires one `period` after `start`, then every `period`
    pub fn interval(start: Duration, period: Duration, token: CancellationToken) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self::with_cadence(Cadence::Interval(period), start + period, token)
    }

    /// Task that fires once at `at`
    pub fn once(at: Duration, token: CancellationToken) -> Self {
        Self::with_cadence(Cadence::Once, at, token)
    }

    fn with_cadence(cadence: Cadence, next_due: Duration, token: CancellationToken) -> Self {
        Self {
            cadence,
            next_due,
            last_frame: None,
            token,
            fired: 0,
            finished: false,
        }
    }

    /// Take the next firing due at or before `now`.
    ///
    /// Returns the timestamp the firing was scheduled for. Call in a loop until
    /// it yields `None` to drain every firing due this frame.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        if !self.is_active() {
            return None;
        }

        let due = match self.cadence {
            Cadence::EveryFrame => {
                if self.last_frame == Some(now) {
                    return None;
                }
                self.last_frame = Some(now);
                now
            }
            Cadence::Interval(period) => {
                if now < self.next_due {
                    return None;
                }
                let due = self.next_due;
                self.next_due += period;
                due
            }
            Cadence::Once => {
                if now < self.next_due {
                    return None;
                }
                self.finished = true;
                self.next_due
            }
        };

        self.fired += 1;
        Some(due)
    }

    /// Still able to fire
    pub fn is_active(&self) -> bool {
        !self.finished && !self.token.is_cancelled()
    }

    /// Number of firings handed out so far
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// The task's cadence
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(task: &mut RepeatingTask, now: Duration) -> Vec<Duration> {
        std::iter::from_fn(|| task.poll(now)).collect()
    }

    #[test]
    fn test_every_frame_fires_once_per_timestamp() {
        let mut task = RepeatingTask::every_frame(CancellationToken::new());
        assert_eq!(drain(&mut task, ms(16)), vec![ms(16)]);
        assert_eq!(drain(&mut task, ms(16)), Vec::<Duration>::new());
        assert_eq!(drain(&mut task, ms(33)), vec![ms(33)]);
        assert_eq!(task.fired(), 2);
    }

    #[test]
    fn test_interval_fires_on_the_period_boundary() {
        let mut task = RepeatingTask::interval(ms(0), ms(3000), CancellationToken::new());
        assert!(drain(&mut task, ms(2999)).is_empty());
        assert_eq!(drain(&mut task, ms(3000)), vec![ms(3000)]);
        assert!(drain(&mut task, ms(5999)).is_empty());
    }

    #[test]
    fn test_interval_catches_up_missed_periods() {
        let mut task = RepeatingTask::interval(ms(500), ms(1000), CancellationToken::new());
        assert_eq!(drain(&mut task, ms(3700)), vec![ms(1500), ms(2500), ms(3500)]);
        assert_eq!(task.fired(), 3);
    }

    #[test]
    fn test_once_fires_a_single_time() {
        let mut task = RepeatingTask::once(ms(1000), CancellationToken::new());
        assert!(drain(&mut task, ms(999)).is_empty());
        assert_eq!(drain(&mut task, ms(4000)), vec![ms(1000)]);
        assert!(drain(&mut task, ms(9000)).is_empty());
        assert!(!task.is_active());
    }

    #[test]
    fn test_cancel_stops_every_clone() {
        let token = CancellationToken::new();
        let mut frame = RepeatingTask::every_frame(token.clone());
        let mut timer = RepeatingTask::interval(ms(0), ms(10), token.clone());

        token.cancel();

        assert!(frame.poll(ms(100)).is_none());
        assert!(timer.poll(ms(100)).is_none());
        assert!(!frame.is_active());
        assert!(!timer.is_active());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let task = RepeatingTask::interval(ms(0), Duration::ZERO, CancellationToken::new());
        assert_eq!(task.cadence(), Cadence::Interval(ms(1)));
    }
}
