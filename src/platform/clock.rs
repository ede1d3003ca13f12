//! Frame pacing on the system clock

use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::driver::Pacer;

/// Sleeps so ticks land at a fixed rate.
///
/// If a tick is late (after a hold, or a slow frame) the schedule restarts
/// from now instead of bursting to catch up.
#[derive(Debug)]
pub struct FixedRatePacer {
    interval: Duration,
    next: Option<Instant>,
}

impl FixedRatePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }
}

impl Pacer for FixedRatePacer {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();
        match self.next {
            Some(due) if due > now => {
                sleep(due - now);
                self.next = Some(due + self.interval);
            }
            _ => self.next = Some(now + self.interval),
        }
    }

    fn delay(&mut self, duration: Duration) {
        sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_paced() {
        let mut pacer = FixedRatePacer::new(Duration::from_millis(5));
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait_for_tick();
        }
        // First tick is immediate, the next three wait an interval each
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_late_tick_does_not_burst() {
        let mut pacer = FixedRatePacer::new(Duration::from_millis(5));
        pacer.wait_for_tick();
        pacer.delay(Duration::from_millis(20));

        let start = Instant::now();
        pacer.wait_for_tick();
        assert!(start.elapsed() < Duration::from_millis(5));
        pacer.wait_for_tick();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
