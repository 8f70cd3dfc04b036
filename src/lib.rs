//! Laser Switch - A one-button color matching reflex game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (speed ramp, gate spawning, collisions)
//! - `game`: Run lifecycle (idle / playing / game over) and scoring
//! - `driver`: Frame loop that ticks the game while a run is live
//! - `renderer`: WebGPU rendering of per-frame snapshots
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Best score storage
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod score;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use game::{Activation, FrameOutcome, Game, RunState, RunSummary, Stats};
pub use score::ScoreTracker;
pub use snapshot::{Renderer, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Gate travel speed at the start of every run (units/s)
    pub const START_SPEED: f32 = 320.0;
    /// Gate travel speed never exceeds this (units/s)
    pub const SPEED_CAP: f32 = 720.0;
    /// Play time between speed ramp steps (ms)
    pub const SPEED_RAMP_INTERVAL_MS: f32 = 5000.0;
    /// Multiplier applied on each ramp step
    pub const SPEED_RAMP_FACTOR: f32 = 1.02;

    /// Minimum time between accepted color toggles (ms)
    pub const TOGGLE_DEBOUNCE_MS: f64 = 80.0;
    /// Cadence of gate spawns (ms)
    pub const GATE_INTERVAL_MS: f32 = 700.0;
    /// Frames longer than this are dropped entirely (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 24.0;
    pub const PLAYER_X_RATIO: f32 = 0.28;

    /// Gate defaults
    pub const GATE_WIDTH: f32 = 48.0;
    pub const GATE_HEIGHT: f32 = 28.0;
    /// Gates are dropped once their right edge passes this far beyond the left edge
    pub const GATE_CLEANUP_MARGIN: f32 = 20.0;

    /// Play field used until the host reports its real size
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 450.0;
}
