//! Variable timestep simulation tick
//!
//! One tick advances a live run by the frame delta: speed ramp first, then
//! spawning, then gate motion and collisions, then cleanup.

use rand::Rng;

use super::collision::{cleanup_gates, resolve_gates};
use super::state::{Field, Player, RunSession};
use crate::tuning::Tuning;

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Delta rejected (too large, negative or not finite); nothing changed
    Skipped,
    /// Run continues
    Advanced {
        /// Gates cleared this tick
        cleared: u32,
        /// A gate was spawned this tick
        spawned: bool,
    },
    /// A gate overlapped with the wrong color; the run is over
    Mismatch {
        gate_id: u32,
        /// Gates cleared earlier in the same tick
        cleared: u32,
    },
}

/// Whether a frame delta is small enough to simulate
#[inline]
pub fn accepts_delta(delta_ms: f32, tuning: &Tuning) -> bool {
    delta_ms.is_finite() && delta_ms >= 0.0 && delta_ms <= tuning.max_frame_delta_ms
}

/// Advance a run by one frame
pub fn tick<R: Rng + ?Sized>(
    session: &mut RunSession,
    player: &Player,
    field: Field,
    tuning: &Tuning,
    rng: &mut R,
    delta_ms: f32,
) -> TickOutcome {
    // A stalled frame (tab in background, debugger) must not teleport gates past the player
    if !accepts_delta(delta_ms, tuning) {
        return TickOutcome::Skipped;
    }

    session.elapsed_ms += f64::from(delta_ms);

    session.ramp.advance(delta_ms);

    let spawned = session.spawner.advance(delta_ms, tuning.spawn_interval_ms);
    if spawned {
        let gate = session.spawner.spawn(rng, field, tuning);
        session.gates.push(gate);
    }

    let distance = session.speed() * delta_ms / 1000.0;
    let result = resolve_gates(&mut session.gates, player, distance);
    session.score += result.cleared;

    if let Some(gate_id) = result.mismatch {
        return TickOutcome::Mismatch {
            gate_id,
            cleared: result.cleared,
        };
    }

    cleanup_gates(&mut session.gates, tuning.cleanup_margin);

    TickOutcome::Advanced {
        cleared: result.cleared,
        spawned,
    }
}
