use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock was created. Animated scenes drive their
    /// periodic functions from this value.
    pub elapsed: f32,
}

/// Frame clock producing `FrameTime` snapshots. `elapsed` is not clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Samples the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_counts_from_creation() {
        let mut clock = FrameClock::new();
        let later = clock.start + Duration::from_millis(1500);
        assert!((clock.tick_at(later).elapsed - 1.5).abs() < 1e-3);
    }

    #[test]
    fn long_gaps_are_not_clamped() {
        let mut clock = FrameClock::new();
        let later = clock.start + Duration::from_secs(30);
        assert!((clock.tick_at(later).elapsed - 30.0).abs() < 1e-3);
    }

    #[test]
    fn earlier_instants_read_as_zero() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        clock.start = start + Duration::from_secs(1);
        assert_eq!(clock.tick_at(start).elapsed, 0.0);
    }
}
