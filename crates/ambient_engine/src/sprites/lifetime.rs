//! Sprite lifetime
//!
//! Tracks when a sprite was spawned and how long it lives, and turns host
//! timestamps into progress.

use std::time::Duration;

/// Spawn time and duration of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    /// Host time the sprite was spawned at
    pub created_at: Duration,
    /// How long the sprite lives
    pub duration: Duration,
}

impl Lifetime {
    /// Create a new lifetime
    pub const fn new(created_at: Duration, duration: Duration) -> Self {
        Self { created_at, duration }
    }

    /// Elapsed fraction of the lifetime; 0 before spawn, 1 or more once expired
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.created_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }

    /// Check if this lifetime has run out
    pub fn is_expired(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Get remaining lifetime
    pub fn remaining(&self, now: Duration) -> Duration {
        (self.created_at + self.duration).saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn test_lifetime_not_expired() {
        let lifetime = Lifetime::new(secs(0), secs(5));
        assert!(!lifetime.is_expired(secs(2)));
        assert_eq!(lifetime.progress(secs(2)), 0.4);
    }

    #[test]
    fn test_lifetime_expired_exactly_at_end() {
        let lifetime = Lifetime::new(secs(10), secs(5));
        assert!(!lifetime.is_expired(Duration::from_millis(14_999)));
        assert!(lifetime.is_expired(secs(15)));
    }

    #[test]
    fn test_progress_before_spawn_is_zero() {
        let lifetime = Lifetime::new(secs(10), secs(5));
        assert_eq!(lifetime.progress(secs(3)), 0.0);
    }

    #[test]
    fn test_zero_duration_is_expired() {
        let lifetime = Lifetime::new(secs(0), Duration::ZERO);
        assert!(lifetime.is_expired(secs(0)));
    }

    #[test]
    fn test_remaining_time() {
        let lifetime = Lifetime::new(secs(0), secs(10));
        assert_eq!(lifetime.remaining(secs(3)), secs(7));
        assert_eq!(lifetime.remaining(secs(12)), Duration::ZERO);
    }
}
