use std::time::Duration;

/// Admits at most one simulation tick per `interval`.
///
/// Fed with monotonic timestamps from the frame loop. A late frame yields a
/// single tick; ticks that were missed are dropped, not replayed.
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval: Duration,
    last_tick: Duration,
}

impl FrameGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Duration::ZERO,
        }
    }

    /// Whether a tick is due at `now`; records `now` as the last tick if so
    pub fn ready(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_tick) >= self.interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_minimum_interval() {
        let mut gate = FrameGate::new(ms(100));

        assert!(!gate.ready(ms(16)));
        assert!(!gate.ready(ms(99)));
        assert!(gate.ready(ms(100)));
        assert!(!gate.ready(ms(150)));
        assert!(gate.ready(ms(216)));
        assert!(!gate.ready(ms(300)));
        assert!(gate.ready(ms(316)));
    }

    #[test]
    fn test_missed_ticks_are_not_replayed() {
        let mut gate = FrameGate::new(ms(100));
        assert!(gate.ready(ms(100)));

        // Scheduler stalled for a whole second
        assert!(gate.ready(ms(1_100)));
        assert!(!gate.ready(ms(1_116)));
        assert!(!gate.ready(ms(1_199)));
        assert!(gate.ready(ms(1_200)));
    }

    #[test]
    fn test_repeated_timestamp() {
        let mut gate = FrameGate::new(ms(100));
        assert!(gate.ready(ms(500)));
        assert!(!gate.ready(ms(500)));
    }
}
