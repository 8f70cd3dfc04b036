//! Simulation entities and per-run state
//!
//! Everything a run mutates lives in [`RunSession`], created when a run starts
//! and dropped when it ends, so nothing leaks from one run into the next.

use glam::Vec2;

use super::debounce::InputDebouncer;
use super::ramp::SpeedRamp;
use super::spawner::GateSpawner;
use crate::tuning::Tuning;

/// Token / gate color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Red,
    Blue,
}

impl Color {
    /// The other color
    pub fn toggled(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
        }
    }
}

/// Play field dimensions (units match the drawing surface)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical midpoint
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// The player's token
#[derive(Debug, Clone)]
pub struct Player {
    /// Center of the token
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    /// Place a fresh token on the field
    pub fn new(field: Field, tuning: &Tuning) -> Self {
        Self {
            pos: Self::anchor(field, tuning),
            radius: tuning.player_radius,
            color: Color::Red,
        }
    }

    /// Fixed anchor for a given field size
    pub fn anchor(field: Field, tuning: &Tuning) -> Vec2 {
        Vec2::new(field.width * tuning.player_x_ratio, field.mid_y())
    }

    /// Horizontal extent `[left, right]`
    #[inline]
    pub fn span(&self) -> (f32, f32) {
        (self.pos.x - self.radius, self.pos.x + self.radius)
    }

    pub fn toggle_color(&mut self) {
        self.color = self.color.toggled();
    }
}

/// A colored gate moving toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    /// Spawn sequence number within the run
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Already judged; never tested for collision again
    pub resolved: bool,
}

impl Gate {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Horizontal overlap with the player, edges inclusive
    pub fn overlaps(&self, player: &Player) -> bool {
        let (player_left, player_right) = player.span();
        self.right() >= player_left && self.left() <= player_right
    }
}

/// State of a single play attempt
#[derive(Debug, Clone)]
pub struct RunSession {
    /// Play time accumulated by accepted ticks (ms)
    pub elapsed_ms: f64,
    pub ramp: SpeedRamp,
    pub spawner: GateSpawner,
    pub debounce: InputDebouncer,
    /// Gates cleared this run
    pub score: u32,
    /// Active gates in spawn order (also x-descending)
    pub gates: Vec<Gate>,
    /// Timestamp of the last frame seen by this run (ms)
    pub last_frame_ms: f64,
    /// Timestamp the run started (ms)
    pub started_ms: f64,
}

impl RunSession {
    /// Fresh run starting at timestamp `now_ms`
    pub fn new(tuning: &Tuning, now_ms: f64) -> Self {
        Self {
            elapsed_ms: 0.0,
            ramp: SpeedRamp::new(tuning),
            spawner: GateSpawner::new(),
            debounce: InputDebouncer::new(tuning.debounce_ms),
            score: 0,
            gates: Vec::new(),
            last_frame_ms: now_ms,
            started_ms: now_ms,
        }
    }

    /// Current gate speed (units/s)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.ramp.speed()
    }
}
