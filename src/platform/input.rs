//! Keyboard bindings

use crate::sim::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    Collect,
    ToggleAutopilot,
}

/// Map a DOM `KeyboardEvent.key` value to an action
pub fn action_for_key(key: &str) -> Option<InputAction> {
    match key {
        "ArrowUp" => Some(InputAction::Move(Direction::Up)),
        "ArrowDown" => Some(InputAction::Move(Direction::Down)),
        "ArrowLeft" => Some(InputAction::Move(Direction::Left)),
        "ArrowRight" => Some(InputAction::Move(Direction::Right)),
        " " => Some(InputAction::Collect),
        "i" | "I" => Some(InputAction::ToggleAutopilot),
        _ => None,
    }
}
