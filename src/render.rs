//! Frame builder: engine state in, ordered primitives out
//!
//! Submission order, back to front:
//!
//! 1. board octagon and anchor dots
//! 2. trail, oldest segment first
//! 3. tween ghost stick
//! 4. current stick
//! 5. button glyphs, in queue order
//! 6. gradient test strip (optional)
//!
//! Building a frame only borrows the engine, so it can run any number of
//! times between logic ticks.

use crate::color::Rgba;
use crate::config::{AppConfig, BoardConfig, ButtonsConfig, PlayerConfig, StickConfig, TrailConfig};
use crate::draw::DrawList;
use crate::easing::{ease_in_pow, ease_out_pow};
use crate::engine::{trail, ButtonPressEvent, InputEngine};
use crate::geometry::{AnchorLayout, Point};

/// Number of samples in the gradient test strip
pub const GRADIENT_STRIP_SEGMENTS: usize = 30;
/// Length of one gradient strip sample, in pixels
pub const GRADIENT_STRIP_SEGMENT_LEN: f32 = 20.0;
/// Gap between the board's bottom edge and the gradient strip
const GRADIENT_STRIP_GAP: f32 = 50.0;

/// Label and colour of one action glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStyle {
    pub label: String,
    pub color: Rgba,
}

/// Everything a frame needs besides engine state and anchors
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub trail: TrailConfig,
    pub board: BoardConfig,
    pub stick: StickConfig,
    pub buttons: ButtonsConfig,
    /// Indexed by action id
    pub actions: Vec<ActionStyle>,
    /// Left end of the gradient test strip, `None` when disabled
    pub gradient_strip: Option<Point>,
}

impl RenderStyle {
    pub fn from_config(config: &AppConfig, player: &PlayerConfig) -> Self {
        let actions = player
            .actions
            .iter()
            .map(|action| ActionStyle {
                label: action.label.clone(),
                color: action.color,
            })
            .collect();

        let gradient_strip = config.window.gradient_test_strip.then(|| {
            let rect = &player.board;
            Point::new(rect.x, rect.max().y + GRADIENT_STRIP_GAP)
        });

        Self {
            trail: config.trail.clone(),
            board: config.board.clone(),
            stick: config.stick.clone(),
            buttons: config.buttons.clone(),
            actions,
            gradient_strip,
        }
    }
}

/// Build the full frame for one board
pub fn build_frame(engine: &InputEngine, layout: &AnchorLayout, style: &RenderStyle) -> DrawList {
    let mut list = DrawList::new();

    draw_board(&mut list, layout, &style.board);
    draw_trail(&mut list, engine, layout, &style.trail);
    draw_stick(&mut list, engine, layout, &style.stick);
    draw_buttons(&mut list, engine, layout, style);

    if let Some(origin) = style.gradient_strip {
        draw_gradient_strip(&mut list, origin, &style.trail);
    }

    list
}

fn draw_board(list: &mut DrawList, layout: &AnchorLayout, board: &BoardConfig) {
    list.polygon(
        layout.perimeter().to_vec(),
        board.fill,
        board.accent,
        board.outline_thickness,
    );

    for anchor in layout.all() {
        list.circle(*anchor, board.anchor_radius, board.accent);
    }
}

fn draw_trail(list: &mut DrawList, engine: &InputEngine, layout: &AnchorLayout, config: &TrailConfig) {
    let segments = engine.trail(config);

    for segment in trail::draw_order(&segments) {
        let from = layout.anchor(segment.from);
        let to = layout.anchor(segment.to);
        list.line(from, to, segment.color, segment.thickness);
        list.circle(to, segment.radius, segment.color);
    }
}

fn draw_stick(list: &mut DrawList, engine: &InputEngine, layout: &AnchorLayout, stick: &StickConfig) {
    if let Some(ghost) = engine.ghost(layout, stick.tween_power) {
        list.circle(ghost, stick.radius, stick.color.with_opacity(stick.ghost_opacity));
    }

    let current = layout.anchor(engine.current().direction);
    list.circle(current, stick.radius, stick.color);
}

fn draw_buttons(list: &mut DrawList, engine: &InputEngine, layout: &AnchorLayout, style: &RenderStyle) {
    // Glyphs already placed per anchor, for stacking
    let mut stacked = [0usize; 9];

    for event in engine.buttons().iter() {
        let Some(action) = style.actions.get(event.action.0) else {
            continue;
        };

        let slot = &mut stacked[event.direction.index()];
        let anchor = layout.anchor(event.direction);
        let center = anchor - Point::new(0.0, *slot as f32 * style.buttons.stack_offset);
        *slot += 1;

        let glyph = button_glyph(event, &style.buttons);
        list.circle(center, glyph.radius, action.color.with_opacity(glyph.opacity));
        list.text(
            action.label.clone(),
            center,
            Rgba::WHITE.with_opacity(glyph.opacity),
            style.buttons.label_size,
        );
    }
}

/// Radius and opacity of a press glyph at its current age
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonGlyph {
    pub radius: f32,
    pub opacity: f32,
}

/// Radius follows `ease_out(remaining_ratio)`, opacity `1 - ease_in(progress)`
pub fn button_glyph(event: &ButtonPressEvent, config: &ButtonsConfig) -> ButtonGlyph {
    ButtonGlyph {
        radius: config.radius * ease_out_pow(event.remaining_ratio(), config.grow_power),
        opacity: 1.0 - ease_in_pow(event.progress(), config.fade_power),
    }
}

fn draw_gradient_strip(list: &mut DrawList, origin: Point, config: &TrailConfig) {
    for i in 0..GRADIENT_STRIP_SEGMENTS {
        let start = origin + Point::new(i as f32 * GRADIENT_STRIP_SEGMENT_LEN, 0.0);
        let end = start + Point::new(GRADIENT_STRIP_SEGMENT_LEN, 0.0);
        let t = i as f32 / GRADIENT_STRIP_SEGMENTS as f32;
        list.line(start, end, config.gradient.sample(t), config.full_thickness);
    }
}
