//! Time sources
//!
//! Every timestamp in the engine is a [`Duration`] measured from an epoch the
//! host chooses (page load, process start, mount). Only differences between
//! timestamps matter.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Host high-resolution clock
pub trait Clock {
    /// Time elapsed since this clock's epoch
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`], with its epoch at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Manually advanced clock for deterministic runs.
///
/// Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute reading
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Frame statistics fed from host timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame: Option<Duration>,
    delta_time: Duration,
    total_time: Duration,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` (call once per frame)
    pub fn update(&mut self, now: Duration) {
        if let Some(last) = self.last_frame {
            self.delta_time = now.saturating_sub(last);
            self.total_time += self.delta_time;
        }
        self.last_frame = Some(now);
        self.frame_count += 1;
    }

    /// Time between the last two frames
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first recorded frame
    pub fn average_fps(&self) -> f32 {
        let secs = self.total_time.as_secs_f32();
        if secs > 0.0 {
            self.frame_count.saturating_sub(1) as f32 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_reading() {
        let clock = ManualClock::new();
        let observer = clock.clone();
        clock.advance(Duration::from_millis(250));
        assert_eq!(observer.now(), Duration::from_millis(250));
        clock.set(Duration::from_secs(3));
        assert_eq!(observer.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_frame_timer_average_fps() {
        let mut timer = FrameTimer::new();
        for frame in 0..=60 {
            timer.update(Duration::from_millis(frame * 1000 / 60));
        }
        assert_eq!(timer.frame_count(), 61);
        assert!((timer.average_fps() - 60.0).abs() < 1.0);
    }

    #[test]
    fn test_frame_timer_ignores_backwards_time() {
        let mut timer = FrameTimer::new();
        timer.update(Duration::from_millis(100));
        timer.update(Duration::from_millis(50));
        assert_eq!(timer.delta_time(), Duration::ZERO);
    }
}
