//! Stick Trail - fighting-game stick input display
//!
//! The [`engine`] turns sampled input into a bounded history of direction
//! changes and button presses; [`render`] turns that state into an ordered
//! [`draw::DrawList`] for any rasteriser. The [`viewer`] wires both to an
//! eframe overlay window with keyboard and gamepad input.

pub mod color;
pub mod config;
pub mod draw;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod paths;
pub mod render;
pub mod timing;
pub mod viewer;
