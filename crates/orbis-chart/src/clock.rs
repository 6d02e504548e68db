//! Wall-clock sources for the animation controller.

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
///
/// The controller only ever subtracts two readings, so the origin does not
/// matter. Tests drive the controller with a manual clock instead.
pub trait Clock: Debug {
    fn now(&self) -> Duration;
}

/// Real time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
