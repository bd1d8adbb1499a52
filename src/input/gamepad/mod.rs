//! Gamepad input through gilrs
//!
//! Each player with a `gamepad` binding claims one connected pad. The d-pad
//! feeds the digital direction, the left stick feeds the analog one and the
//! configured buttons feed the action list.

pub mod buttons;
pub mod diagnostics;

use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use tracing::{debug, info, warn};

use crate::config::PlayerConfig;
use crate::engine::{ActionId, DigitalDirection};
use crate::error::ConfigError;

pub use buttons::{button_from_name, button_name};

/// Read-only view of one pad, implemented for gilrs pads and test doubles
pub trait PadState {
    fn is_pressed(&self, button: Button) -> bool;
    fn axis(&self, axis: Axis) -> f32;
}

impl PadState for Gamepad<'_> {
    fn is_pressed(&self, button: Button) -> bool {
        Gamepad::is_pressed(self, button)
    }

    fn axis(&self, axis: Axis) -> f32 {
        self.value(axis)
    }
}

/// Gamepad bindings of one player
#[derive(Debug, Clone, PartialEq)]
pub struct PadBindings {
    /// Lowercased name pattern, `None` takes any pad
    product_match: Option<String>,
    use_analog: bool,
    /// Indexed by action id
    actions: Vec<Option<Button>>,
}

impl PadBindings {
    /// `Ok(None)` when the player has no gamepad section
    pub fn from_player(player: &PlayerConfig) -> Result<Option<Self>, ConfigError> {
        let Some(binding) = &player.gamepad else {
            return Ok(None);
        };

        let actions = player
            .actions
            .iter()
            .map(|action| action.gamepad_button.as_deref().map(button_from_name).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self {
            product_match: binding.product_match.as_ref().map(|p| p.to_lowercase()),
            use_analog: binding.use_analog,
            actions,
        }))
    }

    /// Case-insensitive substring match on the pad name
    pub fn matches(&self, name: &str) -> bool {
        match &self.product_match {
            Some(pattern) => name.to_lowercase().contains(pattern.as_str()),
            None => true,
        }
    }

    /// D-pad as a digital direction
    pub fn direction(&self, pad: &impl PadState) -> DigitalDirection {
        DigitalDirection {
            up: pad.is_pressed(Button::DPadUp),
            down: pad.is_pressed(Button::DPadDown),
            left: pad.is_pressed(Button::DPadLeft),
            right: pad.is_pressed(Button::DPadRight),
        }
    }

    /// Left stick in screen orientation (y down), `None` when analog is off
    pub fn analog(&self, pad: &impl PadState) -> Option<(f32, f32)> {
        if !self.use_analog {
            return None;
        }
        // gilrs reports stick up as positive
        Some((pad.axis(Axis::LeftStickX), -pad.axis(Axis::LeftStickY)))
    }

    /// Append the ids of held action buttons to `held`
    pub fn held_actions(&self, pad: &impl PadState, held: &mut Vec<ActionId>) {
        for (index, button) in self.actions.iter().enumerate() {
            if button.is_some_and(|b| pad.is_pressed(b)) {
                held.push(ActionId(index));
            }
        }
    }
}

/// Give each player the first matching pad not already claimed by an earlier player
///
/// `pads` lists connected pads in enumeration order as `(id, name)`.
pub fn assign_pads<I: Copy + PartialEq>(
    bindings: &[Option<PadBindings>],
    pads: &[(I, String)],
) -> Vec<Option<I>> {
    let mut claimed: Vec<I> = Vec::new();

    bindings
        .iter()
        .map(|binding| {
            let binding = binding.as_ref()?;
            let (id, _) = pads
                .iter()
                .find(|(id, name)| !claimed.contains(id) && binding.matches(name))?;
            claimed.push(*id);
            Some(*id)
        })
        .collect()
}

/// Owner of the gilrs context
pub struct GamepadInput {
    gilrs: Option<Gilrs>,
}

impl GamepadInput {
    /// Start gilrs; on failure gamepads are disabled and the keyboard keeps working
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (id, gamepad) in gilrs.gamepads() {
                    info!("🎮 Gamepad {:?} connected: {}", id, gamepad.name());
                }
                Some(gilrs)
            },
            Err(e) => {
                warn!("Gamepad support disabled, failed to initialize gilrs: {}", e);
                None
            },
        };

        Self { gilrs }
    }

    /// Drain pending gilrs events; returns true when a pad connected or disconnected
    pub fn poll(&mut self) -> bool {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return false;
        };

        let mut changed = false;
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("🎮 Gamepad {:?} connected: {}", id, gilrs.gamepad(id).name());
                    changed = true;
                },
                EventType::Disconnected => {
                    info!("🎮 Gamepad {:?} disconnected", id);
                    changed = true;
                },
                _ => {},
            }
        }

        if changed {
            debug!("{} gamepad(s) connected", gilrs.gamepads().count());
        }
        changed
    }

    /// Connected pads as `(id, name)` in enumeration order
    pub fn connected(&self) -> Vec<(GamepadId, String)> {
        match &self.gilrs {
            Some(gilrs) => gilrs
                .gamepads()
                .filter(|(_, pad)| pad.is_connected())
                .map(|(id, pad)| (id, pad.name().to_string()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn gamepad(&self, id: GamepadId) -> Option<Gamepad<'_>> {
        self.gilrs.as_ref()?.connected_gamepad(id)
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}
