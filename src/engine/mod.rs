//! Input history and temporal animation engine
//!
//! One [`InputEngine`] per displayed stick. The host calls [`InputEngine::tick`]
//! at a fixed rate with the sampled input; rendering only borrows the engine
//! immutably, so a frame can never disturb history or timing.
//!
//! - [`direction`]: 9-way direction model
//! - [`history`]: bounded log of direction changes
//! - [`buttons`]: button press lifecycle queue
//! - [`trail`]: time-to-geometry/colour mapping of the history
//! - [`tween`]: ghost stick easing between the last two directions

pub mod buttons;
pub mod direction;
pub mod history;
pub mod trail;
pub mod tween;


use tracing::debug;

use crate::config::TrailConfig;
use crate::geometry::{AnchorLayout, Point};

pub use buttons::{ActionId, ButtonPressEvent, ButtonQueue, DEFAULT_BUTTON_LIFETIME};
pub use direction::{DigitalDirection, Direction};
pub use history::{HistoryBuffer, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use trail::TrailSegment;

/// `since_change` stops growing here; longer holds look the same
pub const MAX_SINCE_CHANGE: f32 = 1.0;

/// Direction currently held and how long ago it changed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrentInput {
    pub direction: Direction,
    pub since_change: f32,
}

/// Everything the engine reads in one logic tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Seconds since the previous tick
    pub delta: f32,
    pub digital: DigitalDirection,
    /// Analog stick in screen orientation (y down), each axis in `[-1, 1]`
    pub analog: Option<(f32, f32)>,
    pub held_actions: &'a [ActionId],
}

/// Sizes and lifetimes an engine is built with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub history_capacity: usize,
    pub button_lifetime: f32,
    pub action_count: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            button_lifetime: DEFAULT_BUTTON_LIFETIME,
            action_count: 0,
        }
    }
}

/// Logic state for one stick display
#[derive(Debug, Clone)]
pub struct InputEngine {
    settings: EngineSettings,
    current: CurrentInput,
    history: HistoryBuffer,
    buttons: ButtonQueue,
}

impl InputEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            current: CurrentInput::default(),
            history: HistoryBuffer::new(settings.history_capacity),
            buttons: ButtonQueue::new(settings.action_count, settings.button_lifetime),
        }
    }

    /// Advance one logic tick
    ///
    /// `since_change` grows by `delta` first. If the resolved direction
    /// differs from the held one, the held direction goes into the history
    /// with that duration and the timer restarts at 0. Button presses are
    /// then recorded against the (possibly new) direction.
    ///
    /// Returns the new direction when it changed.
    pub fn tick(&mut self, input: &TickInput<'_>) -> Option<Direction> {
        let delta = if input.delta.is_finite() {
            input.delta.max(0.0)
        } else {
            0.0
        };

        self.current.since_change = (self.current.since_change + delta).min(MAX_SINCE_CHANGE);

        let direction = Direction::resolve(input.digital, input.analog);
        let changed = direction != self.current.direction;

        if changed {
            self.history.push(HistoryEntry::new(
                self.current.direction,
                self.current.since_change,
            ));
            debug!(
                "direction {} -> {} (held {:.3}s)",
                self.current.direction, direction, self.current.since_change
            );
            self.current = CurrentInput {
                direction,
                since_change: 0.0,
            };
        }

        self.buttons
            .tick(delta, input.held_actions, self.current.direction);

        changed.then_some(direction)
    }

    /// Apply new settings without losing state
    ///
    /// History is trimmed to the new capacity (oldest first).
    pub fn reconfigure(&mut self, settings: EngineSettings) {
        self.history.set_capacity(settings.history_capacity);
        self.buttons.set_action_count(settings.action_count);
        self.buttons.set_lifetime(settings.button_lifetime);
        self.settings = settings;
    }

    /// Forget history and presses, back to neutral
    pub fn reset(&mut self) {
        self.current = CurrentInput::default();
        self.history.clear();
        self.buttons.clear();
    }

    pub fn current(&self) -> &CurrentInput {
        &self.current
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn buttons(&self) -> &ButtonQueue {
        &self.buttons
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Trail segments, newest first
    pub fn trail(&self, config: &TrailConfig) -> Vec<TrailSegment> {
        trail::compute_segments(&self.current, &self.history, config)
    }

    /// Ghost stick position, `None` before the first direction change
    pub fn ghost(&self, layout: &AnchorLayout, power: f32) -> Option<Point> {
        tween::stick_ghost(&self.current, &self.history, layout, power)
    }
}

impl Default for InputEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
