/// Driver tick length in milliseconds.
pub const TICK_MS: u64 = 250;
/// Length of one blink cycle on the display, in milliseconds.
pub const DISPLAY_PERIOD_MS: i64 = 2_000;

/// The two countdowns that pace the driver: display animation and sensor refresh.
///
/// Both start at zero, so the very first tick refreshes sensors and opens a
/// fresh display cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationClock {
    display_phase: i64,
    sensor_countdown: i64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one tick of the sensor countdown, rearming it to `interval_ms`
    /// when it has run out. Returns whether sensors are due this tick.
    pub fn sensors_due(&mut self, interval_ms: u64) -> bool {
        let due = self.sensor_countdown <= 0;
        if due {
            self.sensor_countdown = interval_ms as i64;
        }
        self.sensor_countdown -= TICK_MS as i64;
        due
    }

    /// Phase to render this tick; an exhausted cycle restarts at the full period.
    pub fn frame_phase(&mut self) -> i64 {
        if self.display_phase <= 0 {
            self.display_phase = DISPLAY_PERIOD_MS;
        }
        self.display_phase
    }

    /// Close the current frame.
    pub fn end_frame(&mut self) {
        self.display_phase -= TICK_MS as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_phase_cycles_from_full_period_down() {
        let mut clock = AnimationClock::new();
        let phases: Vec<i64> = (0..10)
            .map(|_| {
                let phase = clock.frame_phase();
                clock.end_frame();
                phase
            })
            .collect();
        assert_eq!(
            phases,
            vec![2000, 1750, 1500, 1250, 1000, 750, 500, 250, 2000, 1750]
        );
    }

    #[test]
    fn sensors_due_every_interval() {
        let mut clock = AnimationClock::new();
        let due: Vec<bool> = (0..10).map(|_| clock.sensors_due(1000)).collect();
        assert_eq!(
            due,
            vec![true, false, false, false, true, false, false, false, true, false]
        );
    }

    #[test]
    fn interval_shorter_than_a_tick_refreshes_every_tick() {
        let mut clock = AnimationClock::new();
        assert!((0..5).all(|_| clock.sensors_due(100)));
    }
}
