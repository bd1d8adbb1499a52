//! Keyboard bindings resolved from config key names

use egui::Key;

use crate::config::PlayerConfig;
use crate::engine::{ActionId, DigitalDirection};
use crate::error::ConfigError;

/// Look up an egui key by name ("W", "ArrowUp", "Space", ...)
pub fn key_from_name(name: &str) -> Result<Key, ConfigError> {
    Key::from_name(name.trim()).ok_or_else(|| ConfigError::UnknownKey(name.to_string()))
}

/// Keys of one player
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    /// Indexed by action id; `None` when the action has no key
    pub actions: Vec<Option<Key>>,
}

impl KeyBindings {
    pub fn from_player(player: &PlayerConfig) -> Result<Self, ConfigError> {
        let actions = player
            .actions
            .iter()
            .map(|action| action.key.as_deref().map(key_from_name).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            up: key_from_name(&player.keys.up)?,
            down: key_from_name(&player.keys.down)?,
            left: key_from_name(&player.keys.left)?,
            right: key_from_name(&player.keys.right)?,
            actions,
        })
    }

    /// Read the direction keys through `is_down`
    pub fn direction(&self, is_down: impl Fn(Key) -> bool) -> DigitalDirection {
        DigitalDirection {
            up: is_down(self.up),
            down: is_down(self.down),
            left: is_down(self.left),
            right: is_down(self.right),
        }
    }

    /// Append the ids of held action keys to `held`
    pub fn held_actions(&self, is_down: impl Fn(Key) -> bool, held: &mut Vec<ActionId>) {
        for (index, key) in self.actions.iter().enumerate() {
            if key.is_some_and(&is_down) {
                held.push(ActionId(index));
            }
        }
    }
}
