//! Idle/demo mode - the game plays itself
//!
//! Looks at the nearest gate that has not been judged yet and still reaches
//! the player, and asks for a toggle when its color differs.

use super::state::{Gate, Player};

/// Whether the autopilot wants to switch color right now
pub fn wants_toggle(gates: &[Gate], player: &Player) -> bool {
    let (player_left, _) = player.span();
    gates
        .iter()
        .find(|gate| !gate.resolved && gate.right() >= player_left)
        .is_some_and(|gate| gate.color != player.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, Field};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn gate(x: f32, color: Color, resolved: bool) -> Gate {
        Gate {
            id: 0,
            pos: Vec2::new(x, 211.0),
            size: Vec2::new(48.0, 28.0),
            color,
            resolved,
        }
    }

    #[test]
    fn test_targets_nearest_pending_gate() {
        let player = Player::new(Field::new(800.0, 450.0), &Tuning::default());
        // Red player: a resolved red gate, then a pending blue gate
        let gates = vec![gate(210.0, Color::Red, true), gate(500.0, Color::Blue, false)];
        assert!(wants_toggle(&gates, &player));

        let gates = vec![gate(500.0, Color::Red, false), gate(700.0, Color::Blue, false)];
        assert!(!wants_toggle(&gates, &player));
    }

    #[test]
    fn test_ignores_gates_behind_player() {
        let player = Player::new(Field::new(800.0, 450.0), &Tuning::default());
        let gates = vec![gate(100.0, Color::Blue, false)];
        assert!(!wants_toggle(&gates, &player));
        assert!(!wants_toggle(&[], &player));
    }
}
