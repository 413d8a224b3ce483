/// Fixed-rate tick clock.
///
/// Keeps a running deadline instead of sleeping a flat period, so time spent
/// updating and rendering is absorbed into the wait. If a frame overruns by
/// more than one period the schedule restarts from now rather than bursting
/// to catch up.

use std::time::{Duration, Instant};

use crate::sim::port::Clock;

pub struct FixedRateClock {
    period: Duration,
    next: Instant,
}

impl FixedRateClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = period_for(ticks_per_second);
        FixedRateClock { period, next: Instant::now() + period }
    }
}

pub fn period_for(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}

impl Clock for FixedRateClock {
    fn tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else if now - self.next > self.period {
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
    }
}
