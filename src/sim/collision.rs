//! Gate motion and collision resolution
//!
//! Gates move left at the current speed and are judged the first time they
//! overlap the player. The field is a single lane, so only horizontal extents
//! are compared.

use super::state::{Gate, Player};

/// Result of resolving one tick of gate motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Same-color gates cleared this tick
    pub cleared: u32,
    /// Id of the first gate (in spawn order) that overlapped with the wrong color
    pub mismatch: Option<u32>,
}

impl CollisionResult {
    pub fn is_mismatch(&self) -> bool {
        self.mismatch.is_some()
    }
}

/// Advance every gate by `distance` and judge new overlaps in spawn order.
///
/// Stops at the first mismatching overlap; gates after it are left untouched
/// for this tick since the run is over anyway.
pub fn resolve_gates(gates: &mut [Gate], player: &Player, distance: f32) -> CollisionResult {
    let mut result = CollisionResult::default();

    for gate in gates.iter_mut() {
        gate.pos.x -= distance;

        if gate.resolved || !gate.overlaps(player) {
            continue;
        }

        if gate.color != player.color {
            result.mismatch = Some(gate.id);
            return result;
        }

        gate.resolved = true;
        result.cleared += 1;
    }

    result
}

/// Drop gates that have fully left the field past `margin`
pub fn cleanup_gates(gates: &mut Vec<Gate>, margin: f32) {
    gates.retain(|gate| gate.right() > -margin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, Field};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn player(color: Color) -> Player {
        // Player spans [256, 304] on a 1000-wide field
        let mut player = Player::new(Field::new(1000.0, 500.0), &Tuning::default());
        player.color = color;
        player
    }

    fn gate(id: u32, x: f32, color: Color) -> Gate {
        Gate {
            id,
            pos: Vec2::new(x, 236.0),
            size: Vec2::new(48.0, 28.0),
            color,
            resolved: false,
        }
    }

    #[test]
    fn test_gates_advance() {
        let mut gates = vec![gate(0, 600.0, Color::Red), gate(1, 900.0, Color::Blue)];
        let result = resolve_gates(&mut gates, &player(Color::Red), 10.0);
        assert_eq!(result, CollisionResult::default());
        assert_eq!(gates[0].pos.x, 590.0);
        assert_eq!(gates[1].pos.x, 890.0);
    }

    #[test]
    fn test_matching_overlap_clears() {
        let mut gates = vec![gate(0, 310.0, Color::Red)];
        let result = resolve_gates(&mut gates, &player(Color::Red), 10.0);
        assert_eq!(result.cleared, 1);
        assert!(!result.is_mismatch());
        assert!(gates[0].resolved);
    }

    #[test]
    fn test_resolved_gate_judged_once() {
        let mut gates = vec![gate(0, 310.0, Color::Red)];
        let mut red = player(Color::Red);
        assert_eq!(resolve_gates(&mut gates, &red, 10.0).cleared, 1);

        // Still overlapping, now the wrong color: already judged, so no mismatch
        red.color = Color::Blue;
        let result = resolve_gates(&mut gates, &red, 10.0);
        assert_eq!(result, CollisionResult::default());
    }

    #[test]
    fn test_mismatch_ends_immediately() {
        let mut gates = vec![gate(0, 310.0, Color::Blue)];
        let result = resolve_gates(&mut gates, &player(Color::Red), 10.0);
        assert_eq!(result.mismatch, Some(0));
        assert!(!gates[0].resolved);
    }

    #[test]
    fn test_first_mismatch_in_spawn_order_wins() {
        // Both overlap after moving; the earlier (blue) gate decides
        let mut gates = vec![gate(3, 270.0, Color::Blue), gate(4, 300.0, Color::Red)];
        let result = resolve_gates(&mut gates, &player(Color::Red), 5.0);
        assert_eq!(result.mismatch, Some(3));
        assert_eq!(result.cleared, 0);
        // Later gate was not advanced or judged
        assert_eq!(gates[1].pos.x, 300.0);
        assert!(!gates[1].resolved);
    }

    #[test]
    fn test_clear_before_mismatch_counts() {
        let mut gates = vec![gate(0, 260.0, Color::Red), gate(1, 300.0, Color::Blue)];
        let result = resolve_gates(&mut gates, &player(Color::Red), 5.0);
        assert_eq!(result.cleared, 1);
        assert_eq!(result.mismatch, Some(1));
    }

    #[test]
    fn test_cleanup_margin() {
        let mut gates = vec![
            gate(0, -68.0, Color::Red), // right edge at -20: gone
            gate(1, -67.0, Color::Red), // right edge at -19: kept
            gate(2, 400.0, Color::Blue),
        ];
        cleanup_gates(&mut gates, 20.0);
        let ids: Vec<u32> = gates.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
