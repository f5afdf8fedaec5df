//! Adaptive update throttling.
//!
//! Accepted updates are spaced at least `delay` apart. After every render
//! the delay is reset to ten times the render cost, clamped to
//! `[floor, ceiling]`, so expensive documents or slow terminals get fewer
//! redraws instead of falling behind.

use std::time::{Duration, Instant};

/// Multiplier applied to the measured render time.
const COST_FACTOR: u32 = 10;

/// Rate limiter whose interval tracks render cost.
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Instant of the last accepted update.
    last: Option<Instant>,
    /// Current minimum interval between accepted updates.
    delay: Duration,
    /// Lower bound for `delay`.
    floor: Duration,
    /// Upper bound for `delay`.
    ceiling: Duration,
}

impl Throttle {
    /// Create a throttle starting at `floor`.
    ///
    /// A ceiling below the floor is raised to the floor.
    pub fn new(floor: Duration, ceiling: Duration) -> Self {
        Self {
            last: None,
            delay: floor,
            floor,
            ceiling: ceiling.max(floor),
        }
    }

    /// Current minimum interval between accepted updates.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Decide whether an update at `now` is accepted.
    ///
    /// Final updates are always accepted. Accepting records `now`.
    pub fn admit(&mut self, now: Instant, is_final: bool) -> bool {
        if !is_final {
            if let Some(last) = self.last {
                if now.saturating_duration_since(last) < self.delay {
                    return false;
                }
            }
        }
        self.last = Some(now);
        true
    }

    /// Adjust the delay after a render that took `render_time`.
    pub fn record(&mut self, render_time: Duration) {
        self.delay = render_time
            .saturating_mul(COST_FACTOR)
            .clamp(self.floor, self.ceiling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: Duration = Duration::from_millis(50);
    const CEILING: Duration = Duration::from_secs(2);

    #[test]
    fn test_first_update_always_admitted() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        assert!(throttle.admit(Instant::now(), false));
    }

    #[test]
    fn test_rapid_update_rejected() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        let start = Instant::now();
        assert!(throttle.admit(start, false));
        assert!(!throttle.admit(start + Duration::from_millis(10), false));
        assert!(throttle.admit(start + Duration::from_millis(60), false));
    }

    #[test]
    fn test_rejected_update_does_not_reset_clock() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        let start = Instant::now();
        throttle.admit(start, false);
        throttle.admit(start + Duration::from_millis(40), false);
        assert!(throttle.admit(start + Duration::from_millis(50), false));
    }

    #[test]
    fn test_final_bypasses_delay() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        let start = Instant::now();
        throttle.admit(start, false);
        assert!(throttle.admit(start, true));
    }

    #[test]
    fn test_delay_scales_with_render_cost() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        throttle.record(Duration::from_millis(20));
        assert_eq!(throttle.delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_delay_clamped() {
        let mut throttle = Throttle::new(FLOOR, CEILING);
        throttle.record(Duration::from_micros(10));
        assert_eq!(throttle.delay(), FLOOR);
        throttle.record(Duration::from_secs(1));
        assert_eq!(throttle.delay(), CEILING);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let mut throttle = Throttle::new(CEILING, FLOOR);
        throttle.record(Duration::from_millis(1));
        assert_eq!(throttle.delay(), CEILING);
    }
}
