//! The player's diver sprite

use glam::Vec2;

use crate::clamp_to_box;
use crate::consts::*;

/// Directional input (arrow keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Velocity for this direction; only one axis is ever non-zero
    pub fn velocity(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -PLAYER_SPEED),
            Direction::Down => Vec2::new(0.0, PLAYER_SPEED),
            Direction::Left => Vec2::new(-PLAYER_SPEED, 0.0),
            Direction::Right => Vec2::new(PLAYER_SPEED, 0.0),
        }
    }
}

/// Which of the two walk-cycle images is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteFrame {
    #[default]
    First,
    Second,
}

impl SpriteFrame {
    pub fn toggled(self) -> Self {
        match self {
            SpriteFrame::First => SpriteFrame::Second,
            SpriteFrame::Second => SpriteFrame::First,
        }
    }
}

/// The player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing_left: bool,
    pub frame: SpriteFrame,
    /// Moving ticks seen so far. Never reset, so a stop-start keeps its phase.
    pub frame_counter: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            facing_left: false,
            frame: SpriteFrame::First,
            frame_counter: 0,
        }
    }
}

impl Player {
    /// Back to the start position, standing still and facing right
    ///
    /// The walk-cycle phase carries over between sessions.
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
        self.facing_left = false;
    }

    /// Move by the current velocity and clamp into the play area
    pub fn apply_velocity(&mut self) {
        self.pos = clamp_to_box(
            self.pos + self.vel,
            Vec2::new(PLAYER_MIN_X, PLAYER_MIN_Y),
            Vec2::new(PLAYER_MAX_X, PLAYER_MAX_Y),
        );
    }

    /// Replace the velocity with a single-axis move
    pub fn set_direction(&mut self, dir: Direction) {
        self.vel = dir.velocity();
        match dir {
            Direction::Left => self.facing_left = true,
            Direction::Right => self.facing_left = false,
            Direction::Up | Direction::Down => {}
        }
    }

    /// Stop moving
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.vel.x != 0.0 || self.vel.y != 0.0
    }

    /// Step the walk cycle; toggles the image every `ANIMATION_PERIOD` moving ticks
    pub fn advance_animation_frame(&mut self) {
        if !self.is_moving() {
            return;
        }
        self.frame_counter = self.frame_counter.wrapping_add(1);
        if self.frame_counter % ANIMATION_PERIOD == 0 {
            self.frame = self.frame.toggled();
        }
    }
}
