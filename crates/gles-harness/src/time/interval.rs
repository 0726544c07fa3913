/// Fires at most once per `period` seconds of a caller-supplied clock.
///
/// The first firing happens once `period` has passed since time zero, not on
/// the first call.
#[derive(Debug, Copy, Clone)]
pub struct Interval {
    period: f32,
    last: f32,
}

impl Interval {
    pub const fn new(period: f32) -> Self {
        Self { period, last: 0.0 }
    }

    /// Returns `true` and records `now` when strictly more than `period`
    /// seconds have passed since the last firing.
    pub fn fire(&mut self, now: f32) -> bool {
        if now - self.last > self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_first_period() {
        let mut iv = Interval::new(1.0);
        assert!(!iv.fire(0.0));
        assert!(!iv.fire(0.5));
        assert!(!iv.fire(1.0));
    }

    #[test]
    fn fires_once_then_waits_again() {
        let mut iv = Interval::new(1.0);
        assert!(iv.fire(1.01));
        assert!(!iv.fire(1.5));
        assert!(!iv.fire(2.0));
        assert!(iv.fire(2.2));
    }

    #[test]
    fn long_stall_fires_only_once() {
        let mut iv = Interval::new(1.0);
        assert!(iv.fire(10.0));
        assert!(!iv.fire(10.1));
    }
}
