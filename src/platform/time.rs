//! Frame clocks
//!
//! A clock hands the frame loop one timestamp (ms) per display refresh.

use crate::driver::FrameClock;

/// Fixed-step clock for headless runs and tests.
///
/// Produces `budget` frames spaced `step_ms` apart, then reports that it has stopped.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now_ms: f64,
    step_ms: f64,
    budget: u64,
}

impl SimulatedClock {
    pub fn new(start_ms: f64, step_ms: f64, budget: u64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
            budget,
        }
    }

    /// 60 Hz clock
    pub fn sixty_hz(start_ms: f64, budget: u64) -> Self {
        Self::new(start_ms, 1000.0 / 60.0, budget)
    }

    /// Timestamp of the most recent frame
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Frames left before the clock stops
    pub fn remaining(&self) -> u64 {
        self.budget
    }

    /// Jump the clock forward without producing a frame (a stalled display)
    pub fn stall(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl FrameClock for SimulatedClock {
    async fn next_frame(&mut self) -> Option<f64> {
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        self.now_ms += self.step_ms;
        Some(self.now_ms)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameClock;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;

    use crate::driver::FrameClock;

    /// Clock backed by `requestAnimationFrame`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct AnimationFrameClock;

    impl AnimationFrameClock {
        pub fn new() -> Self {
            Self
        }
    }

    impl FrameClock for AnimationFrameClock {
        async fn next_frame(&mut self) -> Option<f64> {
            let window = web_sys::window()?;
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                if window.request_animation_frame(&resolve).is_err() {
                    log::error!("requestAnimationFrame failed");
                }
            });
            JsFuture::from(promise).await.ok()?.as_f64()
        }
    }

    /// Current high resolution timestamp (ms), same timebase as animation frames
    pub fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::now_ms;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock_budget() {
        let mut clock = SimulatedClock::new(1000.0, 10.0, 2);
        assert_eq!(pollster::block_on(clock.next_frame()), Some(1010.0));
        assert_eq!(pollster::block_on(clock.next_frame()), Some(1020.0));
        assert_eq!(pollster::block_on(clock.next_frame()), None);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_stall_skips_time() {
        let mut clock = SimulatedClock::new(0.0, 16.0, 5);
        clock.stall(500.0);
        assert_eq!(pollster::block_on(clock.next_frame()), Some(516.0));
    }
}
