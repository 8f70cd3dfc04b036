//! Speed ramp
//!
//! Gate speed grows by a fixed factor for every full ramp interval of play
//! time, up to a hard cap.

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRamp {
    speed: f32,
    /// Play time since the last ramp step (ms)
    timer_ms: f32,
    interval_ms: f32,
    factor: f32,
    cap: f32,
}

impl SpeedRamp {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.start_speed.min(tuning.speed_cap),
            timer_ms: 0.0,
            interval_ms: tuning.ramp_interval_ms,
            factor: tuning.ramp_factor,
            cap: tuning.speed_cap,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Accumulate play time, applying every ramp step it covers.
    /// Returns the number of steps applied.
    pub fn advance(&mut self, delta_ms: f32) -> u32 {
        self.timer_ms += delta_ms;

        let mut steps = 0;
        // A non-positive interval would never drain the timer
        if self.interval_ms <= 0.0 {
            return steps;
        }
        while self.timer_ms >= self.interval_ms {
            self.timer_ms -= self.interval_ms;
            // max() keeps speed non-decreasing even with a factor below 1
            self.speed = (self.speed * self.factor).max(self.speed).min(self.cap);
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_start_speed() {
        let ramp = SpeedRamp::new(&Tuning::default());
        assert_eq!(ramp.speed(), 320.0);
        assert_eq!(ramp.timer_ms(), 0.0);
    }

    #[test]
    fn test_exactly_one_interval() {
        let mut ramp = SpeedRamp::new(&Tuning::default());
        for _ in 0..100 {
            ramp.advance(50.0);
        }
        assert!((ramp.speed() - 326.4).abs() < 1e-3);
        assert_eq!(ramp.timer_ms(), 0.0);
    }

    #[test]
    fn test_short_delta_does_not_ramp() {
        let mut ramp = SpeedRamp::new(&Tuning::default());
        assert_eq!(ramp.advance(750.0), 0);
        assert_eq!(ramp.speed(), 320.0);
        assert_eq!(ramp.timer_ms(), 750.0);
    }

    #[test]
    fn test_large_delta_applies_every_step() {
        let mut ramp = SpeedRamp::new(&Tuning::default());
        assert_eq!(ramp.advance(15_500.0), 3);
        let expected = 320.0 * 1.02_f32 * 1.02 * 1.02;
        assert!((ramp.speed() - expected).abs() < 1e-2);
        assert_eq!(ramp.timer_ms(), 500.0);
    }

    #[test]
    fn test_caps_at_speed_cap() {
        let mut ramp = SpeedRamp::new(&Tuning::default());
        // 1.02^41 * 320 > 720
        for _ in 0..60 {
            ramp.advance(5000.0);
        }
        assert_eq!(ramp.speed(), 720.0);
    }

    proptest! {
        #[test]
        fn prop_speed_monotonic_and_bounded(deltas in prop::collection::vec(0.0f32..100.0, 0..2000)) {
            let mut ramp = SpeedRamp::new(&Tuning::default());
            let mut prev = ramp.speed();
            prop_assert_eq!(prev, 320.0);
            for delta in deltas {
                ramp.advance(delta);
                prop_assert!(ramp.speed() >= prev);
                prop_assert!(ramp.speed() <= 720.0);
                prev = ramp.speed();
            }
        }
    }
}
