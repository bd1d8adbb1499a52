//! Overlay window
//!
//! An eframe window that clears to the configured background (or to full
//! transparency) and paints every player's board each frame.

mod app;
mod painter;

pub use app::{FrameCounter, StickTrailApp};

use anyhow::Result;

use crate::config::{AppConfig, ConfigWatcher, WindowConfig};

/// Application id handed to eframe (window class, persistence key)
const APP_ID: &str = "stick-trail";

/// Native window options for the overlay
pub fn native_options(window: &WindowConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_transparent(window.transparent)
            .with_decorations(window.decorations),
        ..Default::default()
    }
}

/// Open the overlay window
///
/// Blocks until the window is closed.
pub fn run_viewer(config: AppConfig, watcher: Option<ConfigWatcher>) -> Result<()> {
    let options = native_options(&config.window);

    eframe::run_native(
        APP_ID,
        options,
        Box::new(move |_cc| Ok(Box::new(StickTrailApp::new(config, watcher)?))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run overlay window: {}", e))
}
