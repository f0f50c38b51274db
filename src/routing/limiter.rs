use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Serializes calls to a rate-limited service. At most one permit is held at a time, and a
/// new permit is granted no sooner than `min_delay` after the previous one was released.
pub struct RateLimiter {
    min_delay: Duration,
    last_release: Mutex<Option<Instant>>,
}

/// Held for the duration of one call; records the release time on drop.
pub struct RatePermit<'a> {
    last_release: MutexGuard<'a, Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_release: Mutex::new(None),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Block until the next call may start.
    pub fn acquire(&self) -> RatePermit<'_> {
        // The guarded value is a timestamp only, a poisoned lock still holds a usable one.
        let last_release = self
            .last_release
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(released_at) = *last_release {
            let elapsed = released_at.elapsed();
            if elapsed < self.min_delay {
                std::thread::sleep(self.min_delay - elapsed);
            }
        }
        RatePermit { last_release }
    }
}

impl Drop for RatePermit<'_> {
    fn drop(&mut self) {
        *self.last_release = Some(Instant::now());
    }
}
