//! Gate spawning
//!
//! Gates appear at a fixed cadence regardless of speed. After a long frame the
//! spawner emits at most one gate, never a backlog.

use glam::Vec2;
use rand::Rng;

use super::state::{Color, Field, Gate};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateSpawner {
    /// Play time since the last spawn (ms)
    timer_ms: f32,
    /// Next gate id
    next_id: u32,
}

impl GateSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Accumulate play time; true when a gate is due
    pub fn advance(&mut self, delta_ms: f32, interval_ms: f32) -> bool {
        self.timer_ms += delta_ms;
        if self.timer_ms < interval_ms {
            return false;
        }
        self.timer_ms = 0.0;
        true
    }

    /// Build a gate just off the right edge, centered vertically
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, field: Field, tuning: &Tuning) -> Gate {
        let id = self.next_id;
        self.next_id += 1;

        let color = if rng.random_bool(0.5) {
            Color::Red
        } else {
            Color::Blue
        };

        Gate {
            id,
            pos: Vec2::new(
                field.width + tuning.gate_width,
                field.mid_y() - tuning.gate_height / 2.0,
            ),
            size: Vec2::new(tuning.gate_width, tuning.gate_height),
            color,
            resolved: false,
        }
    }
}
