//! Button press lifecycle queue
//!
//! A press creates a [`ButtonPressEvent`] on the rising edge of an action.
//! Every event starts with the same lifetime and ages by the same tick delta,
//! so events always expire in the order they were inserted and expiry only
//! ever has to look at the front of the queue.

use std::collections::VecDeque;
use tracing::trace;

use super::Direction;

/// Default seconds a press glyph stays on screen
pub const DEFAULT_BUTTON_LIFETIME: f32 = 0.8;

/// Index of an action in the owning player's action table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub usize);

/// One visible button press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPressEvent {
    pub action: ActionId,
    /// Stick direction held when the button went down
    pub direction: Direction,
    pub remaining: f32,
    pub lifetime: f32,
}

impl ButtonPressEvent {
    /// Fraction of the lifetime already used, `0` at press, `1` at expiry
    pub fn progress(&self) -> f32 {
        1.0 - self.remaining_ratio()
    }

    /// Fraction of the lifetime still left, `1` at press, `0` at expiry
    pub fn remaining_ratio(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.lifetime).clamp(0.0, 1.0)
    }
}

/// FIFO of live button presses plus the edge detector feeding it
#[derive(Debug, Clone)]
pub struct ButtonQueue {
    events: VecDeque<ButtonPressEvent>,
    lifetime: f32,
    was_held: Vec<bool>,
}

impl ButtonQueue {
    pub fn new(action_count: usize, lifetime: f32) -> Self {
        Self {
            events: VecDeque::new(),
            lifetime,
            was_held: vec![false; action_count],
        }
    }

    /// Advance one logic tick
    ///
    /// Ages every event by `delta`, pops expired events off the front (an
    /// event with exactly 0 remaining counts as expired), then enqueues a new
    /// event for each action that is held now but was not held last tick.
    /// Unknown action ids are ignored.
    pub fn tick(&mut self, delta: f32, held: &[ActionId], direction: Direction) {
        for event in &mut self.events {
            event.remaining -= delta;
        }

        while let Some(front) = self.events.front() {
            if front.remaining > 0.0 {
                break;
            }
            trace!("button {:?} expired", front.action);
            self.events.pop_front();
        }

        for (index, was_held) in self.was_held.iter_mut().enumerate() {
            let action = ActionId(index);
            let is_held = held.contains(&action);

            if is_held && !*was_held {
                trace!("button {:?} pressed at {}", action, direction);
                self.events.push_back(ButtonPressEvent {
                    action,
                    direction,
                    remaining: self.lifetime,
                    lifetime: self.lifetime,
                });
            }
            *was_held = is_held;
        }
    }

    /// Live events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ButtonPressEvent> + '_ {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Lifetime for presses enqueued from now on
    ///
    /// Live events keep their own lifetime; shortening it could otherwise
    /// break insertion-order expiry, so live events are cleared when the
    /// lifetime changes.
    pub fn set_lifetime(&mut self, lifetime: f32) {
        if lifetime != self.lifetime {
            self.events.clear();
            self.lifetime = lifetime;
        }
    }

    /// Resize the edge detector for a new action table
    pub fn set_action_count(&mut self, action_count: usize) {
        self.was_held.resize(action_count, false);
        self.events.retain(|e| e.action.0 < action_count);
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.was_held.iter_mut().for_each(|held| *held = false);
    }
}
