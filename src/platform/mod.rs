//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Repeating frame and timer loops
//! - Input events

pub mod input;
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputAction, action_for_key};
pub use scheduler::{LoopHandle, LoopKind, LoopSlot, ManualScheduler, Scheduler};
