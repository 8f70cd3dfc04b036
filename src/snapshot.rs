//! Immutable per-frame view of the game handed to renderers

use crate::game::RunState;
use crate::sim::{Color, Gate, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            x: player.pos.x,
            y: player.pos.y,
            radius: player.radius,
            color: player.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateView {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub resolved: bool,
}

impl From<&Gate> for GateView {
    fn from(gate: &Gate) -> Self {
        Self {
            x: gate.pos.x,
            y: gate.pos.y,
            width: gate.size.x,
            height: gate.size.y,
            color: gate.color,
            resolved: gate.resolved,
        }
    }
}

/// Everything a renderer may draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub field_width: f32,
    pub field_height: f32,
    pub player: PlayerView,
    /// Gates in spawn order
    pub gates: Vec<GateView>,
    pub current_score: u32,
    pub best_score: u32,
    pub run_state: RunState,
}

/// Paints snapshots. Has no way to reach back into the simulation.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        log::trace!(
            "frame: {:?} score={} gates={}",
            snapshot.run_state,
            snapshot.current_score,
            snapshot.gates.len()
        );
    }
}

/// Renderer that keeps every snapshot (tests, replays of a single session)
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Snapshot>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}
