//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::garbage::Garbage;
use super::player::Player;
use crate::consts::GARBAGE_COUNT;

/// Whether a session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running (before the first start, or after time ran out)
    #[default]
    Idle,
    /// Timer counting down, player moving, collection allowed
    Active,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Whole seconds left on the clock
    pub time_remaining: u32,
    pub player: Player,
    /// Garbage pieces, in the fixed order collection scans them
    pub garbage: Vec<Garbage>,
    /// Frame ticks simulated while active
    pub frame_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle state with garbage scattered across the field
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let garbage = (0..GARBAGE_COUNT)
            .map(|_| Garbage::scattered(&mut rng))
            .collect();

        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            time_remaining: 0,
            player: Player::default(),
            garbage,
            frame_ticks: 0,
            rng,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Reset score, clock, player, and garbage for a fresh session
    pub fn begin(&mut self, duration: u32) {
        self.score = 0;
        self.time_remaining = duration;
        self.player.reset();
        for piece in &mut self.garbage {
            piece.respawn(&mut self.rng);
        }
        self.phase = GamePhase::Active;
    }

    /// Stop the session where it stands
    pub fn finish(&mut self) {
        self.phase = GamePhase::Idle;
        self.player.halt();
    }

    /// Respawn one piece (after collection)
    pub fn respawn_garbage(&mut self, index: usize) {
        if let Some(piece) = self.garbage.get_mut(index) {
            piece.respawn(&mut self.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.garbage.len(), GARBAGE_COUNT);
    }

    #[test]
    fn test_begin_resets_everything() {
        let mut state = GameState::new(5);
        state.score = 12;
        state.player.pos.x = 400.0;
        state.player.facing_left = true;

        state.begin(60);
        assert!(state.is_active());
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, 60);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert!(!state.player.facing_left);
        assert!(state.garbage.iter().all(|g| g.pos.x == GARBAGE_SPAWN_X));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(77);
        let b = GameState::new(77);
        assert_eq!(a.garbage, b.garbage);
    }
}
