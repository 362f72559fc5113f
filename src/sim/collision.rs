//! Reach test between the player and a piece of garbage
//!
//! This is a box test around a fixed point on the sprite, not a circle
//! overlap: the garbage radius plays no part, so bigger pieces are not
//! easier to grab.

use glam::Vec2;

use super::garbage::Garbage;
use super::player::Player;
use crate::consts::{REACH_OFFSET_X, REACH_OFFSET_Y, REACH_X, REACH_Y};

/// Point on the sprite used for reach checks (roughly its center)
#[inline]
pub fn reference_point(player: &Player) -> Vec2 {
    player.pos + Vec2::new(REACH_OFFSET_X, REACH_OFFSET_Y)
}

/// Whether the player can grab this piece right now
pub fn is_colliding(player: &Player, garbage: &Garbage) -> bool {
    let delta = (reference_point(player) - garbage.pos).abs();
    delta.x < REACH_X && delta.y < REACH_Y
}
