//! Per-player input sampling
//!
//! Keyboard and gamepad are read together: their digital directions are
//! OR-ed, the pad's left stick is passed on as the analog direction and
//! held actions from both sources are merged.

pub mod gamepad;
pub mod keyboard;

use egui::Key;

use crate::config::PlayerConfig;
use crate::engine::{ActionId, DigitalDirection, TickInput};
use crate::error::ConfigError;

use gamepad::{PadBindings, PadState};
use keyboard::KeyBindings;

/// Input read for one player in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledInput {
    pub digital: DigitalDirection,
    pub analog: Option<(f32, f32)>,
    /// Sorted, without duplicates
    pub held: Vec<ActionId>,
}

impl SampledInput {
    pub fn tick_input(&self, delta: f32) -> TickInput<'_> {
        TickInput {
            delta,
            digital: self.digital,
            analog: self.analog,
            held_actions: &self.held,
        }
    }
}

/// All bindings of one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInput {
    pub keys: KeyBindings,
    pub pad: Option<PadBindings>,
}

impl PlayerInput {
    pub fn from_player(player: &PlayerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            keys: KeyBindings::from_player(player)?,
            pad: PadBindings::from_player(player)?,
        })
    }

    /// Read keyboard through `is_key_down` and the assigned pad, if any, into `out`
    pub fn sample<P: PadState>(
        &self,
        is_key_down: impl Fn(Key) -> bool,
        pad: Option<&P>,
        out: &mut SampledInput,
    ) {
        out.held.clear();
        out.digital = self.keys.direction(&is_key_down);
        out.analog = None;
        self.keys.held_actions(&is_key_down, &mut out.held);

        if let (Some(bindings), Some(pad)) = (&self.pad, pad) {
            out.digital = out.digital.merge(bindings.direction(pad));
            out.analog = bindings.analog(pad);
            bindings.held_actions(pad, &mut out.held);
        }

        out.held.sort_unstable();
        out.held.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::gamepad::tests::FakePad;
    use super::*;
    use crate::config::AppConfig;
    use crate::engine::Direction;
    use gilrs::Button;

    fn player() -> PlayerInput {
        PlayerInput::from_player(&AppConfig::default().players[0]).unwrap()
    }

    #[test]
    fn test_keyboard_only() {
        let input = player();
        let mut out = SampledInput::default();
        input.sample::<FakePad>(|k| k == Key::S || k == Key::U, None, &mut out);

        assert_eq!(Direction::from_digital(out.digital), Direction::Down);
        assert_eq!(out.analog, None);
        assert_eq!(out.held, vec![ActionId(0)]);
    }

    #[test]
    fn test_keyboard_and_pad_merge() {
        let input = player();
        let pad = FakePad {
            pressed: vec![Button::DPadRight, Button::West, Button::South],
            left_x: 0.0,
            left_y: 0.0,
        };
        let mut out = SampledInput::default();
        // Punch is held on both the key and the pad
        input.sample(|k| k == Key::W || k == Key::U, Some(&pad), &mut out);

        assert_eq!(Direction::from_digital(out.digital), Direction::UpRight);
        assert_eq!(out.analog, Some((0.0, -0.0)));
        assert_eq!(out.held, vec![ActionId(0), ActionId(1)]);
    }

    #[test]
    fn test_sample_resets_previous_tick() {
        let input = player();
        let mut out = SampledInput::default();
        input.sample::<FakePad>(|k| k == Key::I, None, &mut out);
        assert_eq!(out.held, vec![ActionId(2)]);

        input.sample::<FakePad>(|_| false, None, &mut out);
        assert!(out.held.is_empty());
        assert_eq!(out.digital, DigitalDirection::default());
    }

    #[test]
    fn test_tick_input_borrows_sample() {
        let out = SampledInput {
            held: vec![ActionId(3)],
            ..Default::default()
        };
        let tick = out.tick_input(0.25);
        assert_eq!(tick.delta, 0.25);
        assert_eq!(tick.held_actions, &[ActionId(3)]);
    }
}
