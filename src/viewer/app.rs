//! Overlay application: per-player engines driven by a fixed tick loop
//!
//! Every frame the app
//!
//! 1. applies a hot-reloaded config, if one arrived,
//! 2. drains gilrs events and re-assigns pads on (dis)connect,
//! 3. samples keyboard and pad once per player,
//! 4. runs the fixed ticks the frame time pays for,
//! 5. builds and paints one draw list per board.

use gilrs::GamepadId;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::painter;
use crate::color::Rgba;
use crate::config::{AppConfig, ConfigWatcher, PlayerConfig};
use crate::engine::InputEngine;
use crate::error::ConfigError;
use crate::geometry::LayoutCache;
use crate::input::gamepad::{assign_pads, GamepadInput};
use crate::input::{PlayerInput, SampledInput};
use crate::render::{build_frame, RenderStyle};
use crate::timing::FixedStep;

/// One displayed stick
struct Board {
    player: PlayerConfig,
    input: PlayerInput,
    engine: InputEngine,
    style: RenderStyle,
    layout: LayoutCache,
    pad: Option<GamepadId>,
    sample: SampledInput,
}

impl Board {
    fn new(config: &AppConfig, player: &PlayerConfig, input: PlayerInput) -> Self {
        Self {
            player: player.clone(),
            input,
            engine: InputEngine::new(config.engine_settings(player)),
            style: RenderStyle::from_config(config, player),
            layout: LayoutCache::new(),
            pad: None,
            sample: SampledInput::default(),
        }
    }

    /// Take new bindings and styles, keeping history and live presses
    fn reconfigure(&mut self, config: &AppConfig, player: &PlayerConfig, input: PlayerInput) {
        self.input = input;
        self.engine.reconfigure(config.engine_settings(player));
        self.style = RenderStyle::from_config(config, player);
        self.player = player.clone();
    }
}

fn player_inputs(config: &AppConfig) -> Result<Vec<PlayerInput>, ConfigError> {
    config.players.iter().map(PlayerInput::from_player).collect()
}

/// Frame rate averaged over roughly one second
#[derive(Debug, Default)]
pub struct FrameCounter {
    frames: u32,
    elapsed: Duration,
}

impl FrameCounter {
    /// Count one frame; returns the average rate whenever a full second has passed
    pub fn record(&mut self, frame: Duration) -> Option<f32> {
        self.frames += 1;
        self.elapsed += frame;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed.as_secs_f32();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(fps)
    }
}

pub struct StickTrailApp {
    config: AppConfig,
    watcher: Option<ConfigWatcher>,
    boards: Vec<Board>,
    gamepads: GamepadInput,
    step: FixedStep,
    last_frame: Instant,
    frame_counter: FrameCounter,
}

impl StickTrailApp {
    pub fn new(config: AppConfig, watcher: Option<ConfigWatcher>) -> Result<Self, ConfigError> {
        let boards = config
            .players
            .iter()
            .zip(player_inputs(&config)?)
            .map(|(player, input)| Board::new(&config, player, input))
            .collect();

        let mut app = Self {
            step: FixedStep::new(config.timing.tick_rate, config.timing.max_ticks_per_frame),
            config,
            watcher,
            boards,
            gamepads: GamepadInput::new(),
            last_frame: Instant::now(),
            frame_counter: FrameCounter::default(),
        };
        app.assign_pads();

        info!(
            "Viewer ready: {} board(s) at {} Hz",
            app.boards.len(),
            app.config.timing.tick_rate
        );
        Ok(app)
    }

    /// Swap in a reloaded config
    ///
    /// Boards are matched to players by name, so a renamed or removed player
    /// loses its history while everyone else keeps theirs.
    fn apply_config(&mut self, config: AppConfig) {
        let inputs = match player_inputs(&config) {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!("Ignoring reloaded config: {}", e);
                return;
            },
        };

        let mut old = std::mem::take(&mut self.boards);
        for (player, input) in config.players.iter().zip(inputs) {
            let board = match old.iter().position(|b| b.player.name == player.name) {
                Some(index) => {
                    let mut board = old.swap_remove(index);
                    board.reconfigure(&config, player, input);
                    board
                },
                None => Board::new(&config, player, input),
            };
            self.boards.push(board);
        }

        self.step
            .reconfigure(config.timing.tick_rate, config.timing.max_ticks_per_frame);
        self.config = config;
        self.assign_pads();
        info!("Applied new configuration ({} board(s))", self.boards.len());
    }

    fn assign_pads(&mut self) {
        let bindings: Vec<_> = self.boards.iter().map(|b| b.input.pad.clone()).collect();
        let connected = self.gamepads.connected();
        let assigned = assign_pads(&bindings, &connected);

        for (board, pad) in self.boards.iter_mut().zip(assigned) {
            if board.pad != pad {
                match pad.and_then(|id| connected.iter().find(|(c, _)| *c == id)) {
                    Some((_, name)) => info!("🎮 {} uses gamepad \"{}\"", board.player.name, name),
                    None if board.input.pad.is_some() => {
                        debug!("{} has no matching gamepad", board.player.name)
                    },
                    None => {},
                }
            }
            board.pad = pad;
        }
    }

    fn sample_inputs(&mut self, ctx: &egui::Context) {
        let gamepads = &self.gamepads;
        for board in &mut self.boards {
            let pad = board.pad.and_then(|id| gamepads.gamepad(id));
            ctx.input(|i| {
                board
                    .input
                    .sample(|key| i.key_down(key), pad.as_ref(), &mut board.sample)
            });
        }
    }

    fn run_ticks(&mut self, frame: Duration) {
        let plan = self.step.advance(frame);
        let delta = self.step.delta();

        for _ in 0..plan.ticks {
            for board in &mut self.boards {
                board.engine.tick(&board.sample.tick_input(delta));
            }
        }
    }
}

impl eframe::App for StickTrailApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let frame = now - self.last_frame;
        self.last_frame = now;

        if let Some(config) = self.watcher.as_ref().and_then(|w| w.poll()) {
            self.apply_config(config);
        }

        if self.gamepads.poll() {
            self.assign_pads();
        }

        self.sample_inputs(ctx);
        self.run_ticks(frame);

        let painter = ctx.layer_painter(egui::LayerId::background());
        let (round_ratio, inset) = (self.config.board.round_ratio, self.config.board.inset);
        for board in &mut self.boards {
            let layout = board.layout.get(&board.player.board, round_ratio, inset);
            let list = build_frame(&board.engine, layout, &board.style);
            painter::paint(&painter, &list);
        }

        if self.config.window.show_fps_in_title {
            if let Some(fps) = self.frame_counter.record(frame) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                    "{} ({:.0} fps)",
                    self.config.window.title, fps
                )));
            }
        }

        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        let color = if self.config.window.transparent {
            Rgba::TRANSPARENT
        } else {
            self.config.window.background
        };
        egui::Rgba::from(egui::Color32::from(color)).to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counter_reports_each_second() {
        let mut counter = FrameCounter::default();
        let frame = Duration::from_millis(250);

        assert_eq!(counter.record(frame), None);
        assert_eq!(counter.record(frame), None);
        assert_eq!(counter.record(frame), None);
        assert_eq!(counter.record(frame), Some(4.0));

        // Counter restarts after reporting
        assert_eq!(counter.record(frame), None);
    }
}
