//! Drifting garbage pieces
//!
//! Each piece drifts left at a fixed speed, occasionally grows or shrinks,
//! and teleports back to the right edge when it leaves the field or is
//! collected.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Fill colors a piece may be painted with
pub const FILL_PALETTE: [&str; 7] = [
    "#FEE715", "#FBEAEB", "#F9E795", "#FCF6F5", "#FFFFFF", "#CADCFC", "#EA738D",
];

/// Outline colors a piece may be painted with
pub const STROKE_PALETTE: [&str; 7] = [
    "#101820", "#2F3C7E", "#F96167", "#990011", "#8AAAE5", "#00246B", "#89ABE3",
];

/// A single piece of drifting garbage
#[derive(Debug, Clone, PartialEq)]
pub struct Garbage {
    pub pos: Vec2,
    pub radius: u32,
    pub fill: &'static str,
    pub stroke: &'static str,
}

impl Garbage {
    pub fn new(pos: Vec2, fill: &'static str, stroke: &'static str) -> Self {
        Self {
            pos,
            radius: GARBAGE_INITIAL_RADIUS,
            fill,
            stroke,
        }
    }

    /// Create a piece somewhere across the field width (attract screen layout)
    pub fn scattered(rng: &mut impl Rng) -> Self {
        let x = rng.random_range(0.0..FIELD_WIDTH);
        let y = random_spawn_y(rng);
        Self::new(Vec2::new(x, y), random_fill(rng), random_stroke(rng))
    }

    /// Advance one tick: drift left, maybe resize, respawn once off-screen
    ///
    /// Returns true if the piece respawned.
    pub fn drift(&mut self, rng: &mut impl Rng) -> bool {
        self.pos.x -= GARBAGE_DRIFT;

        if rng.random_bool(GARBAGE_RESIZE_CHANCE) {
            let change = rng.random_range(-GARBAGE_RESIZE_STEP..=GARBAGE_RESIZE_STEP);
            self.radius = (self.radius as i32 + change)
                .clamp(GARBAGE_MIN_RADIUS as i32, GARBAGE_MAX_RADIUS as i32)
                as u32;
        }

        if self.pos.x < -(self.radius as f32) {
            self.respawn(rng);
            return true;
        }
        false
    }

    /// Teleport back to the right edge with a fresh size and colors
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        self.pos = Vec2::new(GARBAGE_SPAWN_X, random_spawn_y(rng));
        self.fill = random_fill(rng);
        self.stroke = random_stroke(rng);
        self.radius = rng.random_range(GARBAGE_SPAWN_MIN_RADIUS..=GARBAGE_SPAWN_MAX_RADIUS);
    }
}

fn random_spawn_y(rng: &mut impl Rng) -> f32 {
    rng.random_range(GARBAGE_SPAWN_MIN_Y..=GARBAGE_SPAWN_MAX_Y) as f32
}

fn random_fill(rng: &mut impl Rng) -> &'static str {
    FILL_PALETTE[rng.random_range(0..FILL_PALETTE.len())]
}

fn random_stroke(rng: &mut impl Rng) -> &'static str {
    STROKE_PALETTE[rng.random_range(0..STROKE_PALETTE.len())]
}
