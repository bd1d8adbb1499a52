//! Gamepad diagnostics for `--list-gamepads`

use gilrs::{Axis, Button, Event, EventType, Gilrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use super::buttons::{button_name, BINDABLE_BUTTONS};

/// Print every detected gamepad with its current button and stick state
///
/// Events are pumped for `wait` first so Bluetooth pads have time to show up.
pub fn print_gamepad_diagnostics(wait: Duration) {
    info!("=== Gamepad Diagnostics ===");
    info!("Platform: {}", std::env::consts::OS);

    let mut gilrs = match Gilrs::new() {
        Ok(g) => g,
        Err(e) => {
            info!("❌ Failed to initialize gilrs: {}", e);
            info!("This may indicate missing system libraries or permissions issues.");
            return;
        },
    };

    info!("⏳ Waiting {:.1}s for gamepads to connect...", wait.as_secs_f32());

    let start = Instant::now();
    while start.elapsed() < wait {
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => info!("   📶 Gamepad {:?} connected", id),
                EventType::Disconnected => info!("   📵 Gamepad {:?} disconnected", id),
                _ => {},
            }
        }
        thread::sleep(Duration::from_millis(100));
    }

    let gamepads: Vec<_> = gilrs.gamepads().collect();
    if gamepads.is_empty() {
        info!("⚠️  No gamepads detected");
        info!("   Check the pad is plugged in or paired, then run again.");
        return;
    }

    info!("✅ Found {} gamepad(s):", gamepads.len());

    for (id, gamepad) in gamepads {
        info!("");
        info!("📋 Gamepad {:?}: \"{}\"", id, gamepad.name());
        info!("   Connected: {}", gamepad.is_connected());
        info!("   Config: gamepad: {{ product_match: \"{}\" }}", gamepad.name());

        let pressed: Vec<&str> = BINDABLE_BUTTONS
            .iter()
            .filter(|b| gamepad.is_pressed(**b))
            .filter_map(|b| button_name(*b))
            .collect();
        if pressed.is_empty() {
            info!("   Buttons held: (none)");
        } else {
            info!("   Buttons held: {}", pressed.join(", "));
        }

        let dpad: Vec<&str> = [
            (Button::DPadUp, "up"),
            (Button::DPadDown, "down"),
            (Button::DPadLeft, "left"),
            (Button::DPadRight, "right"),
        ]
        .into_iter()
        .filter(|(b, _)| gamepad.is_pressed(*b))
        .map(|(_, name)| name)
        .collect();
        if !dpad.is_empty() {
            info!("   D-pad: {}", dpad.join("+"));
        }

        info!(
            "   Left stick: x={:.3} y={:.3}",
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY)
        );
    }

    info!("");
    info!("💡 product_match is a case-insensitive substring of the name above");
}
