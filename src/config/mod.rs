//! Configuration management for Stick Trail
//!
//! Handles loading, parsing, validation and hot-reloading of the YAML
//! configuration file. Every field has a default, so an empty file is a valid
//! single-player setup (WASD + five action buttons).

pub mod watcher;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::easing::{Gradient, STICK_TWEEN_POWER};
use crate::engine::{EngineSettings, DEFAULT_BUTTON_LIFETIME, DEFAULT_HISTORY_CAPACITY};
use crate::error::ConfigError;
use crate::geometry::BoardRect;
use crate::input::gamepad::button_from_name;
use crate::input::keyboard::key_from_name;

pub use watcher::ConfigWatcher;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub stick: StickConfig,
    #[serde(default)]
    pub buttons: ButtonsConfig,
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
}

/// Overlay window configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_true")]
    pub decorations: bool,
    /// Clear colour behind the boards (chroma-key green for capture software)
    #[serde(default = "default_background")]
    pub background: Rgba,
    #[serde(default)]
    pub show_fps_in_title: bool,
    /// Draw a sampled strip of the trail gradient under each board
    #[serde(default)]
    pub gradient_test_strip: bool,
}

/// Logic tick configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Logic ticks per second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    /// Catch-up limit after a long frame; the rest of the backlog is dropped
    #[serde(default = "default_max_ticks_per_frame")]
    pub max_ticks_per_frame: u32,
}

/// Direction trail configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrailConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Seconds of history drawn
    #[serde(default = "default_trail_window")]
    pub window: f32,
    /// Segments older than `window - shrink_lookahead` are drawn thin
    #[serde(default = "default_shrink_lookahead")]
    pub shrink_lookahead: f32,
    #[serde(default = "default_full_thickness")]
    pub full_thickness: f32,
    #[serde(default = "default_thin_thickness")]
    pub thin_thickness: f32,
    #[serde(default = "default_point_radius")]
    pub point_radius: f32,
    #[serde(default)]
    pub gradient: Gradient,
}

/// Octagon board appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoardConfig {
    /// How far corners stay out towards the box corner, in (0, 1)
    #[serde(default = "default_round_ratio")]
    pub round_ratio: f32,
    #[serde(default = "default_inset")]
    pub inset: f32,
    #[serde(default = "default_board_fill")]
    pub fill: Rgba,
    #[serde(default = "default_board_accent")]
    pub accent: Rgba,
    #[serde(default = "default_outline_thickness")]
    pub outline_thickness: f32,
    #[serde(default = "default_anchor_radius")]
    pub anchor_radius: f32,
}

/// Stick glyph appearance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StickConfig {
    #[serde(default = "default_stick_radius")]
    pub radius: f32,
    #[serde(default = "default_stick_color")]
    pub color: Rgba,
    #[serde(default = "default_ghost_opacity")]
    pub ghost_opacity: f32,
    #[serde(default = "default_tween_power")]
    pub tween_power: f32,
}

/// Button press glyph configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ButtonsConfig {
    /// Seconds a press stays visible
    #[serde(default = "default_button_lifetime")]
    pub lifetime: f32,
    #[serde(default = "default_button_radius")]
    pub radius: f32,
    #[serde(default = "default_grow_power")]
    pub grow_power: f32,
    #[serde(default = "default_fade_power")]
    pub fade_power: f32,
    /// Vertical spacing between glyphs sharing an anchor
    #[serde(default = "default_stack_offset")]
    pub stack_offset: f32,
    #[serde(default = "default_label_size")]
    pub label_size: f32,
}

/// One displayed stick with its own bindings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub board: BoardRect,
    #[serde(default)]
    pub keys: DirectionKeys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad: Option<GamepadBinding>,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// Keyboard keys for the four directions (egui key names)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DirectionKeys {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

/// Gamepad used by a player
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GamepadBinding {
    /// Case-insensitive substring of the gamepad name; first connected pad when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_match: Option<String>,
    /// Read the left stick in addition to the d-pad
    #[serde(default = "default_true")]
    pub use_analog: bool,
}

/// One action button with its bindings and glyph
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionConfig {
    pub id: String,
    pub label: String,
    pub color: Rgba,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad_button: Option<String>,
}

impl AppConfig {
    /// Load configuration from file with validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parse and validate YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes as null, treat it as all defaults
        let config: AppConfig = if contents.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        ConfigError::check_positive("window.width", self.window.width)?;
        ConfigError::check_positive("window.height", self.window.height)?;

        ConfigError::check_between(
            "timing.tick_rate",
            self.timing.tick_rate,
            MIN_TICK_RATE,
            MAX_TICK_RATE,
            "in [1, 1000] Hz",
        )?;
        if self.timing.max_ticks_per_frame == 0 {
            anyhow::bail!("timing.max_ticks_per_frame must be at least 1");
        }

        self.trail.validate()?;
        self.board.validate()?;

        ConfigError::check_positive("stick.radius", self.stick.radius)?;
        ConfigError::check_positive("stick.tween_power", self.stick.tween_power)?;
        if !(0.0..=1.0).contains(&self.stick.ghost_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "stick.ghost_opacity",
                expected: "in [0, 1]",
                value: self.stick.ghost_opacity,
            }
            .into());
        }

        ConfigError::check_positive("buttons.lifetime", self.buttons.lifetime)?;
        ConfigError::check_positive("buttons.radius", self.buttons.radius)?;
        ConfigError::check_positive("buttons.grow_power", self.buttons.grow_power)?;
        ConfigError::check_positive("buttons.fade_power", self.buttons.fade_power)?;
        ConfigError::check_positive("buttons.label_size", self.buttons.label_size)?;

        if self.players.is_empty() {
            anyhow::bail!("At least one player must be defined");
        }

        let mut names = HashSet::new();
        for (index, player) in self.players.iter().enumerate() {
            if player.name.is_empty() {
                anyhow::bail!("Player {} name cannot be empty", index);
            }
            if !names.insert(player.name.to_lowercase()) {
                anyhow::bail!("Duplicate player name '{}'", player.name);
            }
            player
                .validate()
                .with_context(|| format!("Invalid player '{}'", player.name))?;
        }

        Ok(())
    }

    /// Engine sizes for one player
    pub fn engine_settings(&self, player: &PlayerConfig) -> EngineSettings {
        EngineSettings {
            history_capacity: self.trail.history_capacity,
            button_lifetime: self.buttons.lifetime,
            action_count: player.actions.len(),
        }
    }
}

impl TrailConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::OutOfRange {
                field: "trail.history_capacity",
                expected: ">= 1",
                value: 0.0,
            });
        }
        ConfigError::check_positive("trail.window", self.window)?;
        ConfigError::check_non_negative("trail.shrink_lookahead", self.shrink_lookahead)?;
        if self.shrink_lookahead > self.window {
            return Err(ConfigError::OutOfRange {
                field: "trail.shrink_lookahead",
                expected: "<= trail.window",
                value: self.shrink_lookahead,
            });
        }
        ConfigError::check_positive("trail.full_thickness", self.full_thickness)?;
        ConfigError::check_positive("trail.thin_thickness", self.thin_thickness)?;
        ConfigError::check_non_negative("trail.point_radius", self.point_radius)?;
        Ok(())
    }
}

impl BoardConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_unit_open("board.round_ratio", self.round_ratio)?;
        ConfigError::check_non_negative("board.inset", self.inset)?;
        ConfigError::check_non_negative("board.outline_thickness", self.outline_thickness)?;
        ConfigError::check_non_negative("board.anchor_radius", self.anchor_radius)?;
        Ok(())
    }
}

impl PlayerConfig {
    fn validate(&self) -> Result<()> {
        ConfigError::check_positive("board.width", self.board.width)?;
        ConfigError::check_positive("board.height", self.board.height)?;

        for key in [
            &self.keys.up,
            &self.keys.down,
            &self.keys.left,
            &self.keys.right,
        ] {
            key_from_name(key)?;
        }

        let mut ids = HashSet::new();
        for action in &self.actions {
            if action.id.is_empty() {
                anyhow::bail!("Action id cannot be empty");
            }
            if !ids.insert(action.id.as_str()) {
                return Err(ConfigError::DuplicateAction(action.id.clone()).into());
            }
            if let Some(key) = &action.key {
                key_from_name(key)
                    .with_context(|| format!("Invalid key for action '{}'", action.id))?;
            }
            if let Some(button) = &action.gamepad_button {
                button_from_name(button)
                    .with_context(|| format!("Invalid gamepad button for action '{}'", action.id))?;
            }
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            timing: TimingConfig::default(),
            trail: TrailConfig::default(),
            board: BoardConfig::default(),
            stick: StickConfig::default(),
            buttons: ButtonsConfig::default(),
            players: default_players(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_width(),
            height: default_window_height(),
            transparent: false,
            decorations: true,
            background: default_background(),
            show_fps_in_title: false,
            gradient_test_strip: false,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            max_ticks_per_frame: default_max_ticks_per_frame(),
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            window: default_trail_window(),
            shrink_lookahead: default_shrink_lookahead(),
            full_thickness: default_full_thickness(),
            thin_thickness: default_thin_thickness(),
            point_radius: default_point_radius(),
            gradient: Gradient::default(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            round_ratio: default_round_ratio(),
            inset: default_inset(),
            fill: default_board_fill(),
            accent: default_board_accent(),
            outline_thickness: default_outline_thickness(),
            anchor_radius: default_anchor_radius(),
        }
    }
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            radius: default_stick_radius(),
            color: default_stick_color(),
            ghost_opacity: default_ghost_opacity(),
            tween_power: default_tween_power(),
        }
    }
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            lifetime: default_button_lifetime(),
            radius: default_button_radius(),
            grow_power: default_grow_power(),
            fade_power: default_fade_power(),
            stack_offset: default_stack_offset(),
            label_size: default_label_size(),
        }
    }
}

impl Default for DirectionKeys {
    fn default() -> Self {
        Self {
            up: "W".to_string(),
            down: "S".to_string(),
            left: "A".to_string(),
            right: "D".to_string(),
        }
    }
}

/// Default action table: punch, kick, slash, heavy slash, dust
pub fn default_actions() -> Vec<ActionConfig> {
    let action = |id: &str, label: &str, color: Rgba, key: &str, button: &str| ActionConfig {
        id: id.to_string(),
        label: label.to_string(),
        color,
        key: Some(key.to_string()),
        gamepad_button: Some(button.to_string()),
    };

    vec![
        action("punch", "P", Rgba::rgb(255, 105, 180), "U", "west"),
        action("kick", "K", Rgba::rgb(70, 130, 255), "J", "south"),
        action("slash", "S", Rgba::rgb(60, 200, 90), "I", "north"),
        action("heavy", "H", Rgba::rgb(230, 50, 50), "K", "east"),
        action("dust", "D", Rgba::rgb(255, 160, 30), "O", "rb"),
    ]
}

// Default value functions
fn default_players() -> Vec<PlayerConfig> {
    vec![PlayerConfig {
        name: "P1".to_string(),
        board: BoardRect::default(),
        keys: DirectionKeys::default(),
        gamepad: Some(GamepadBinding {
            product_match: None,
            use_analog: true,
        }),
        actions: default_actions(),
    }]
}
fn default_true() -> bool { true }
fn default_title() -> String { "Stick Trail".to_string() }
fn default_window_width() -> f32 { 320.0 }
fn default_window_height() -> f32 { 320.0 }
fn default_background() -> Rgba { Rgba::rgb(0, 255, 0) }
/// Accepted `timing.tick_rate` range, in Hz
const MIN_TICK_RATE: f32 = 1.0;
const MAX_TICK_RATE: f32 = 1000.0;

fn default_tick_rate() -> f32 { 60.0 }
fn default_max_ticks_per_frame() -> u32 { 5 }
fn default_history_capacity() -> usize { DEFAULT_HISTORY_CAPACITY }
fn default_trail_window() -> f32 { 0.5 }
fn default_shrink_lookahead() -> f32 { 0.05 }
fn default_full_thickness() -> f32 { 6.0 }
fn default_thin_thickness() -> f32 { 2.0 }
fn default_point_radius() -> f32 { 5.0 }
fn default_round_ratio() -> f32 { 0.85 }
fn default_inset() -> f32 { 2.0 }
fn default_board_fill() -> Rgba { Rgba::rgb(153, 153, 153) }
fn default_board_accent() -> Rgba { Rgba::rgb(242, 242, 242) }
fn default_outline_thickness() -> f32 { 3.0 }
fn default_anchor_radius() -> f32 { 4.0 }
fn default_stick_radius() -> f32 { 10.0 }
fn default_stick_color() -> Rgba { Rgba::rgb(255, 0, 0) }
fn default_ghost_opacity() -> f32 { 0.5 }
fn default_tween_power() -> f32 { STICK_TWEEN_POWER }
fn default_button_lifetime() -> f32 { DEFAULT_BUTTON_LIFETIME }
fn default_button_radius() -> f32 { 12.0 }
fn default_grow_power() -> f32 { 5.0 }
fn default_fade_power() -> f32 { 5.0 }
fn default_stack_offset() -> f32 { 8.0 }
fn default_label_size() -> f32 { 12.0 }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.players.len(), 1);
        assert_eq!(config.players[0].actions.len(), 5);
        assert_eq!(config.trail.window, 0.5);
        assert_eq!(config.trail.shrink_lookahead, 0.05);
        assert_eq!(config.timing.tick_rate, 60.0);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let yaml = r##"
trail:
  window: 0.75
  gradient: ["#000000", "#FFFFFF"]
players:
  - name: "Left"
    board: { x: 0, y: 0, width: 120, height: 120 }
  - name: "Right"
    board: { x: 200, y: 0, width: 120, height: 120 }
    keys: { up: ArrowUp, down: ArrowDown, left: ArrowLeft, right: ArrowRight }
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.trail.window, 0.75);
        assert_eq!(config.trail.full_thickness, 6.0);
        assert_eq!(config.trail.gradient.stops().len(), 2);
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.players[0].keys, DirectionKeys::default());
        assert_eq!(config.players[1].keys.up, "ArrowUp");
        assert!(config.players[1].actions.is_empty());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            "board: { round_ratio: 1.5 }",
            "trail: { window: 0 }",
            "trail: { window: 0.1, shrink_lookahead: 0.2 }",
            "trail: { gradient: [\"#FF0000\"] }",
            "timing: { tick_rate: -60 }",
            "timing: { tick_rate: 1e-40 }",
            "timing: { tick_rate: 5000 }",
            "players: []",
            "players: [{ name: A }, { name: a }]",
            "players: [{ name: A, keys: { up: Nope, down: S, left: A, right: D } }]",
        ];

        for yaml in cases {
            assert!(AppConfig::from_yaml(yaml).is_err(), "accepted: {}", yaml);
        }
    }

    #[test]
    fn test_action_validation() {
        let duplicate = r##"
players:
  - name: P1
    actions:
      - { id: punch, label: P, color: "#FF0000" }
      - { id: punch, label: P, color: "#FF0000" }
"##;
        let err = AppConfig::from_yaml(duplicate).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate action id 'punch'"));

        let bad_button = r##"
players:
  - name: P1
    actions:
      - { id: punch, label: P, color: "#FF0000", gamepad_button: triangle_plus }
"##;
        assert!(AppConfig::from_yaml(bad_button).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.yaml");

        let mut config = AppConfig::default();
        config.trail.window = 0.625;
        config.window.transparent = true;
        config.save(&path)?;

        let loaded = AppConfig::load(&path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn test_engine_settings_per_player() {
        let config = AppConfig::default();
        let settings = config.engine_settings(&config.players[0]);
        assert_eq!(settings.history_capacity, 50);
        assert_eq!(settings.button_lifetime, 0.8);
        assert_eq!(settings.action_count, 5);
    }
}
