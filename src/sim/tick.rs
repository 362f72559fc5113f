//! Per-frame and per-second simulation steps

use super::autopilot;
use super::collision::is_colliding;
use super::state::GameState;

/// Input for a single frame tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Demo mode - the autopilot steers the player
    pub autopilot: bool,
}

/// Advance the game state by one frame
///
/// Does nothing while idle.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_active() {
        return;
    }

    if input.autopilot {
        match autopilot::steer(state) {
            Some(dir) => state.player.set_direction(dir),
            None => state.player.halt(),
        }
    }

    state.frame_ticks += 1;

    state.player.apply_velocity();

    for piece in &mut state.garbage {
        if piece.drift(&mut state.rng) {
            log::debug!("Garbage drifted off, respawned at y={}", piece.pos.y);
        }
    }

    state.player.advance_animation_frame();
}

/// Grab the first piece in reach, if any
///
/// At most one piece is collected per call, even when several overlap.
/// Returns the index of the collected piece.
pub fn collect(state: &mut GameState) -> Option<usize> {
    if !state.is_active() {
        return None;
    }

    let index = state
        .garbage
        .iter()
        .position(|piece| is_colliding(&state.player, piece))?;

    state.respawn_garbage(index);
    state.score += 1;
    Some(index)
}

/// One second of the session clock
///
/// Returns true when the clock just ran out.
pub fn countdown(state: &mut GameState) -> bool {
    if !state.is_active() {
        return false;
    }
    state.time_remaining = state.time_remaining.saturating_sub(1);
    state.time_remaining == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::player::Direction;
    use glam::Vec2;

    fn active_state() -> GameState {
        let mut state = GameState::new(12345);
        state.begin(30);
        state
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut state = GameState::new(12345);
        let before: Vec<_> = state.garbage.iter().map(|g| g.pos).collect();
        tick(&mut state, &TickInput::default());
        let after: Vec<_> = state.garbage.iter().map(|g| g.pos).collect();
        assert_eq!(before, after);
        assert_eq!(state.frame_ticks, 0);
    }

    #[test]
    fn test_tick_moves_player_and_garbage() {
        let mut state = active_state();
        state.player.set_direction(Direction::Right);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.pos, Vec2::new(15.0, 200.0));
        for piece in &state.garbage {
            assert_eq!(piece.pos.x, GARBAGE_SPAWN_X - GARBAGE_DRIFT);
        }
        assert_eq!(state.frame_ticks, 1);
    }

    #[test]
    fn test_collect_first_match_only() {
        let mut state = active_state();
        // Park two pieces right on the reference point
        state.garbage[1].pos = Vec2::new(55.0, 260.0);
        state.garbage[3].pos = Vec2::new(60.0, 250.0);

        assert_eq!(collect(&mut state), Some(1));
        assert_eq!(state.score, 1);
        assert_eq!(state.garbage[1].pos.x, GARBAGE_SPAWN_X);
        assert_eq!(state.garbage[3].pos, Vec2::new(60.0, 250.0));

        assert_eq!(collect(&mut state), Some(3));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_collect_nothing_in_reach() {
        let mut state = active_state();
        assert_eq!(collect(&mut state), None);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collect_ignored_when_idle() {
        let mut state = GameState::new(9);
        state.garbage[0].pos = Vec2::new(55.0, 260.0);
        assert_eq!(collect(&mut state), None);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_countdown_reports_expiry_once() {
        let mut state = active_state();
        state.time_remaining = 2;
        assert!(!countdown(&mut state));
        assert!(countdown(&mut state));
        assert_eq!(state.time_remaining, 0);
        state.finish();
        assert!(!countdown(&mut state));
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn test_autopilot_closes_in() {
        let mut state = active_state();
        state.garbage.truncate(1);
        state.garbage[0].pos = Vec2::new(300.0, 260.0);
        let input = TickInput { autopilot: true };

        let start_gap = (state.garbage[0].pos.x - (state.player.pos.x + REACH_OFFSET_X)).abs();
        tick(&mut state, &input);
        let gap = (state.garbage[0].pos.x - (state.player.pos.x + REACH_OFFSET_X)).abs();
        assert!(gap < start_gap);
    }

    #[test]
    fn test_determinism() {
        let mut a = active_state();
        let mut b = active_state();
        let input = TickInput { autopilot: true };
        for _ in 0..300 {
            tick(&mut a, &input);
            tick(&mut b, &input);
            collect(&mut a);
            collect(&mut b);
        }
        assert_eq!(a.garbage, b.garbage);
        assert_eq!(a.player, b.player);
        assert_eq!(a.score, b.score);
    }
}
