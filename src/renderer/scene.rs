//! Scene description
//!
//! Turns game state into a flat list of draw commands so the drawing order
//! and geometry can be checked without a browser.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, SpriteFrame};

/// Colors for the stand-in diver drawn until the sprite images load
const PLACEHOLDER_FILL: &str = "#F2A541";
const PLACEHOLDER_STROKE: &str = "#101820";

/// One drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole field
    Clear { size: Vec2 },
    /// Upper half-disc, filled then outlined
    HalfDisc {
        center: Vec2,
        radius: f32,
        fill: &'static str,
        stroke: &'static str,
        line_width: f32,
    },
    /// Filled and outlined rectangle, top-left at `pos`
    Rect {
        pos: Vec2,
        size: Vec2,
        fill: &'static str,
        stroke: &'static str,
    },
    /// Player sprite, top-left at `pos`; mirrored sprites face left
    Sprite {
        frame: SpriteFrame,
        pos: Vec2,
        size: Vec2,
        mirrored: bool,
    },
}

/// Build the draw list for one frame
///
/// Garbage is drawn first so the player passes in front of it. Until the
/// sprite images have loaded, a plain box stands in for the diver.
pub fn build_scene(state: &GameState, sprites_ready: bool) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.garbage.len() + 2);
    commands.push(DrawCommand::Clear {
        size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
    });

    commands.extend(state.garbage.iter().map(|piece| DrawCommand::HalfDisc {
        center: piece.pos,
        radius: piece.radius as f32,
        fill: piece.fill,
        stroke: piece.stroke,
        line_width: GARBAGE_LINE_WIDTH,
    }));

    let player = &state.player;
    let size = Vec2::new(SPRITE_WIDTH, SPRITE_HEIGHT);
    if sprites_ready {
        commands.push(DrawCommand::Sprite {
            frame: player.frame,
            pos: player.pos,
            size,
            mirrored: player.facing_left,
        });
    } else {
        commands.push(DrawCommand::Rect {
            pos: player.pos,
            size,
            fill: PLACEHOLDER_FILL,
            stroke: PLACEHOLDER_STROKE,
        });
    }

    commands
}

/// Destination x for a sprite drawn after `scale(-1, 1)`
#[inline]
pub fn mirrored_x(pos: Vec2, size: Vec2) -> f32 {
    -pos.x - size.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;

    #[test]
    fn test_draw_order() {
        let state = GameState::new(4);
        let scene = build_scene(&state, true);
        assert_eq!(scene.len(), GARBAGE_COUNT + 2);
        assert!(matches!(scene[0], DrawCommand::Clear { .. }));
        assert!(scene[1..=GARBAGE_COUNT]
            .iter()
            .all(|c| matches!(c, DrawCommand::HalfDisc { .. })));
        assert!(matches!(scene.last(), Some(DrawCommand::Sprite { .. })));
    }

    #[test]
    fn test_placeholder_until_images_load() {
        let mut state = GameState::new(4);
        state.begin(30);
        state.player.set_direction(Direction::Right);
        state.player.apply_velocity();

        let scene = build_scene(&state, false);
        assert_eq!(scene.len(), GARBAGE_COUNT + 2);
        assert!(!scene.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));
        match scene.last() {
            Some(DrawCommand::Rect { pos, size, .. }) => {
                assert_eq!(*pos, Vec2::new(15.0, 200.0));
                assert_eq!(*size, Vec2::new(90.0, 120.0));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_geometry() {
        let state = GameState::new(8);
        let scene = build_scene(&state, false);
        for (cmd, piece) in scene[1..=GARBAGE_COUNT].iter().zip(&state.garbage) {
            match cmd {
                DrawCommand::HalfDisc {
                    center,
                    radius,
                    fill,
                    stroke,
                    line_width,
                } => {
                    assert_eq!(*center, piece.pos);
                    assert_eq!(*radius, piece.radius as f32);
                    assert_eq!(*fill, piece.fill);
                    assert_eq!(*stroke, piece.stroke);
                    assert_eq!(*line_width, 2.5);
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn test_left_facing_sprite_is_mirrored() {
        let mut state = GameState::new(4);
        state.begin(30);
        state.player.set_direction(Direction::Left);
        let scene = build_scene(&state, true);
        match scene.last() {
            Some(DrawCommand::Sprite { mirrored, pos, size, .. }) => {
                assert!(*mirrored);
                assert_eq!(mirrored_x(*pos, *size), -100.0);
            }
            other => panic!("expected sprite, got {:?}", other),
        }
    }
}
