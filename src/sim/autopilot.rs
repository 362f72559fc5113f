//! Demo-mode steering
//!
//! Chases the nearest piece of garbage one axis at a time, the same way a
//! player on the arrow keys would.

use super::collision::{is_colliding, reference_point};
use super::player::Direction;
use super::state::GameState;

/// Pick a direction toward the nearest piece
///
/// Returns `None` when something is already in reach (or nothing is left to
/// chase), meaning the player should stand still and collect.
pub fn steer(state: &GameState) -> Option<Direction> {
    if state
        .garbage
        .iter()
        .any(|piece| is_colliding(&state.player, piece))
    {
        return None;
    }

    let origin = reference_point(&state.player);
    let target = state.garbage.iter().min_by(|a, b| {
        origin
            .distance_squared(a.pos)
            .partial_cmp(&origin.distance_squared(b.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;

    let delta = target.pos - origin;
    let dir = if delta.x.abs() >= delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn state_with(positions: &[(f32, f32)]) -> GameState {
        let mut state = GameState::new(3);
        state.begin(30);
        state.garbage.truncate(positions.len());
        for (piece, &(x, y)) in state.garbage.iter_mut().zip(positions) {
            piece.pos = Vec2::new(x, y);
        }
        state
    }

    #[test]
    fn test_in_reach_stands_still() {
        let state = state_with(&[(60.0, 270.0)]);
        assert_eq!(steer(&state), None);
    }

    #[test]
    fn test_chases_along_wider_gap() {
        assert_eq!(steer(&state_with(&[(400.0, 280.0)])), Some(Direction::Right));
        assert_eq!(steer(&state_with(&[(70.0, 400.0)])), Some(Direction::Down));
    }

    #[test]
    fn test_prefers_nearest() {
        let mut state = state_with(&[(700.0, 260.0), (55.0, 100.0)]);
        state.player.pos = Vec2::new(10.0, 200.0);
        // (55,100) is 160 away, (700,260) is 645 away
        assert_eq!(steer(&state), Some(Direction::Up));
    }

    #[test]
    fn test_nothing_to_chase() {
        let state = state_with(&[]);
        assert_eq!(steer(&state), None);
    }
}
