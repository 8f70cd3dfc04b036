//! Shape generation for 2D primitives
//!
//! All shapes are produced in field coordinates (origin top-left, y down);
//! the pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, fill};
use crate::snapshot::{GateView, PlayerView, Snapshot};

/// Segments used for the player's disc and ring
pub const PLAYER_SEGMENTS: u32 = 48;
/// Width of the colored ring around the player
pub const PLAYER_RING_WIDTH: f32 = 6.0;

/// Generate vertices for an axis-aligned rectangle with per-corner colors
/// (top-left, top-right, bottom-left, bottom-right)
pub fn rect(min: Vec2, max: Vec2, corners: [[f32; 4]; 4]) -> Vec<Vertex> {
    let [tl, tr, bl, br] = corners;
    vec![
        Vertex::new(min.x, min.y, tl),
        Vertex::new(max.x, min.y, tr),
        Vertex::new(min.x, max.y, bl),
        Vertex::new(min.x, max.y, bl),
        Vertex::new(max.x, min.y, tr),
        Vertex::new(max.x, max.y, br),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Full-field gradient background
pub fn background(width: f32, height: f32) -> Vec<Vertex> {
    let top = colors::BACKGROUND_TOP;
    let bottom = colors::BACKGROUND_BOTTOM;
    let mid = [
        (top[0] + bottom[0]) * 0.5,
        (top[1] + bottom[1]) * 0.5,
        (top[2] + bottom[2]) * 0.5,
        1.0,
    ];
    rect(Vec2::ZERO, Vec2::new(width, height), [top, mid, mid, bottom])
}

/// A translucent gate rectangle
pub fn gate(gate: &GateView) -> Vec<Vertex> {
    let mut color = fill(gate.color);
    color[3] = colors::GATE_ALPHA;
    let min = Vec2::new(gate.x, gate.y);
    let max = min + Vec2::new(gate.width, gate.height);
    rect(min, max, [color; 4])
}

/// Dark disc with a colored ring centered on the token's edge
pub fn player(player: &PlayerView) -> Vec<Vertex> {
    let center = Vec2::new(player.x, player.y);
    let half = PLAYER_RING_WIDTH / 2.0;
    let mut vertices = circle(center, player.radius, colors::PLAYER_CORE, PLAYER_SEGMENTS);
    vertices.extend(ring(
        center,
        player.radius - half,
        player.radius + half,
        fill(player.color),
        PLAYER_SEGMENTS,
    ));
    vertices
}

/// Generate the whole frame: background, gates (spawn order), then the player on top
pub fn scene(snapshot: &Snapshot) -> Vec<Vertex> {
    let mut vertices = background(snapshot.field_width, snapshot.field_height);
    for view in &snapshot.gates {
        vertices.extend(gate(view));
    }
    vertices.extend(player(&snapshot.player));
    vertices
}
