//! Gamepad button names used in the configuration
//!
//! Buttons are named by physical position so a binding means the same thing
//! on every controller family:
//!
//! ```text
//!        [north]
//!   [west]     [east]
//!        [south]
//! ```
//!
//! Xbox-style letters are accepted as aliases (`a` = south, `b` = east,
//! `x` = west, `y` = north).

use gilrs::Button;

use crate::error::ConfigError;

/// Map a config button name to a gilrs button (case-insensitive)
pub fn button_from_name(name: &str) -> Result<Button, ConfigError> {
    let button = match name.trim().to_lowercase().as_str() {
        // Face buttons
        "south" | "a" | "cross" => Button::South,
        "east" | "b" | "circle" => Button::East,
        "west" | "x" | "square" => Button::West,
        "north" | "y" | "triangle" => Button::North,

        // Shoulder buttons
        "lb" | "l1" => Button::LeftTrigger,
        "rb" | "r1" => Button::RightTrigger,
        "lt" | "l2" => Button::LeftTrigger2,
        "rt" | "r2" => Button::RightTrigger2,

        // Menu buttons
        "select" | "back" | "minus" => Button::Select,
        "start" | "plus" => Button::Start,
        "mode" | "home" => Button::Mode,

        // Stick clicks
        "l3" => Button::LeftThumb,
        "r3" => Button::RightThumb,

        // Other buttons
        "c" => Button::C,
        "z" => Button::Z,

        _ => return Err(ConfigError::UnknownGamepadButton(name.to_string())),
    };

    Ok(button)
}

/// Canonical config name of a gilrs button, `None` for d-pad and unknown buttons
pub fn button_name(button: Button) -> Option<&'static str> {
    match button {
        Button::South => Some("south"),
        Button::East => Some("east"),
        Button::West => Some("west"),
        Button::North => Some("north"),
        Button::LeftTrigger => Some("lb"),
        Button::RightTrigger => Some("rb"),
        Button::LeftTrigger2 => Some("lt"),
        Button::RightTrigger2 => Some("rt"),
        Button::Select => Some("select"),
        Button::Start => Some("start"),
        Button::Mode => Some("mode"),
        Button::LeftThumb => Some("l3"),
        Button::RightThumb => Some("r3"),
        Button::C => Some("c"),
        Button::Z => Some("z"),
        _ => None,
    }
}

/// Buttons a player can bind, in diagnostics order
pub const BINDABLE_BUTTONS: [Button; 15] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::C,
    Button::Z,
];
