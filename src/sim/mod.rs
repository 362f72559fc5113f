//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (garbage is scanned in creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod garbage;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{is_colliding, reference_point};
pub use garbage::{FILL_PALETTE, Garbage, STROKE_PALETTE};
pub use player::{Direction, Player, SpriteFrame};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, collect, countdown, tick};
