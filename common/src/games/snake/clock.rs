use std::time::Duration;

/// Upper bound on ticks released by a single `advance`, so a long stall cannot spiral.
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Logical game clock plus a frame-time accumulator.
///
/// `now_ms` only moves when a tick is recorded, so anything timed against it
/// (power-up expiry) is frozen while the session is paused.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    now_ms: u64,
    accumulated: Duration,
    running: bool,
    ticks: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulated = Duration::ZERO;
    }

    /// Stops accumulating; the partial interval is discarded.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds elapsed wall time. Call `take_due_tick` afterwards with the current interval.
    pub fn accumulate(&mut self, dt: Duration) {
        if self.running {
            self.accumulated += dt;
        }
    }

    /// Releases one tick when a whole interval has accumulated. The interval is
    /// passed on every call because the speed can change between ticks.
    pub fn take_due_tick(&mut self, interval: Duration) -> bool {
        if !self.running || interval.is_zero() || self.accumulated < interval {
            return false;
        }
        self.accumulated -= interval;
        self.record_tick(interval);
        true
    }

    /// Drops leftover time once the per-advance cap has been hit.
    pub fn discard_backlog(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    pub fn record_tick(&mut self, interval: Duration) {
        self.now_ms += interval.as_millis() as u64;
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn test_stopped_clock_ignores_time() {
        let mut clock = SimulationClock::new();
        clock.accumulate(Duration::from_secs(5));
        assert!(!clock.take_due_tick(INTERVAL));
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_one_tick_per_interval() {
        let mut clock = SimulationClock::new();
        clock.start();
        clock.accumulate(Duration::from_millis(100));
        assert!(!clock.take_due_tick(INTERVAL));
        clock.accumulate(Duration::from_millis(100));
        assert!(clock.take_due_tick(INTERVAL));
        assert!(!clock.take_due_tick(INTERVAL));
        assert_eq!(clock.now_ms(), 150);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_large_delta_releases_multiple_ticks() {
        let mut clock = SimulationClock::new();
        clock.start();
        clock.accumulate(Duration::from_millis(450));
        let mut released = 0;
        while clock.take_due_tick(INTERVAL) {
            released += 1;
        }
        assert_eq!(released, 3);
        assert_eq!(clock.now_ms(), 450);
    }

    #[test]
    fn test_interval_read_on_every_tick() {
        let mut clock = SimulationClock::new();
        clock.start();
        clock.accumulate(Duration::from_millis(300));
        assert!(clock.take_due_tick(Duration::from_millis(150)));
        assert!(clock.take_due_tick(Duration::from_millis(100)));
        assert!(!clock.take_due_tick(Duration::from_millis(100)));
        assert_eq!(clock.now_ms(), 250);
    }

    #[test]
    fn test_stop_discards_partial_interval() {
        let mut clock = SimulationClock::new();
        clock.start();
        clock.accumulate(Duration::from_millis(140));
        clock.stop();
        clock.start();
        clock.accumulate(Duration::from_millis(20));
        assert!(!clock.take_due_tick(INTERVAL));
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut clock = SimulationClock::new();
        clock.start();
        clock.record_tick(INTERVAL);
        clock.reset();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.ticks(), 0);
        assert!(!clock.is_running());
    }
}
