use std::thread::sleep;
use std::time::Duration;

/// Pause policy applied between consecutive requests
pub trait Throttle {
    fn wait(&mut self);
}

/// Fixed delay between requests, the first request goes out immediately
pub struct RateLimiter {
    delay: Duration,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            request_count: 0,
        }
    }

    fn should_wait(&self) -> bool {
        self.request_count > 0 && !self.delay.is_zero()
    }

    fn apply_delay(&self) {
        sleep(self.delay);
    }

    fn increment(&mut self) {
        self.request_count += 1;
    }
}

impl Throttle for RateLimiter {
    fn wait(&mut self) {
        if self.should_wait() {
            self.apply_delay();
        }
        self.increment();
    }
}

/// No pause at all; for tests and local fixtures
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

impl Throttle for Unthrottled {
    fn wait(&mut self) {}
}
