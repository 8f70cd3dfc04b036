//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters as frame deltas
//! - Randomness only from the caller's RNG
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod debounce;
pub mod ramp;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, cleanup_gates, resolve_gates};
pub use debounce::InputDebouncer;
pub use ramp::SpeedRamp;
pub use spawner::GateSpawner;
pub use state::{Color, Field, Gate, Player, RunSession};
pub use tick::{TickOutcome, accepts_delta, tick};
