//! Decaying trail of recent direction changes
//!
//! Walks the history from newest to oldest, starting from the live stick
//! position, and turns accumulated age into colour, thickness and radius.
//!
//! Once the accumulated time passes `window - shrink_lookahead`, that segment
//! and every older one are drawn thin. This shrinks slightly more than just
//! the final segment, which is the accepted look.

use crate::color::Rgba;
use crate::config::TrailConfig;

use super::{CurrentInput, Direction, HistoryBuffer, HistoryEntry};

/// Slack on the window and shrink thresholds for ages summed from f32 ticks
pub const WINDOW_EPSILON: f32 = 1e-4;

/// One line + end dot of the trail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    /// Newer end of the line
    pub from: Direction,
    /// Older end of the line, where the dot is drawn
    pub to: Direction,
    /// Accumulated age at the newer end, in seconds
    pub elapsed: f32,
    pub color: Rgba,
    pub thickness: f32,
    pub radius: f32,
    pub shrunk: bool,
}

/// Compute trail segments, newest first
///
/// Pairs are `(current, next)` where `current` is the live stick (held for
/// `since_change`) and then each stored entry, and `next` is the entry after
/// it. No segment is emitted once the accumulated time exceeds the window,
/// and an empty history yields nothing.
pub fn compute_segments(
    current: &CurrentInput,
    history: &HistoryBuffer,
    config: &TrailConfig,
) -> Vec<TrailSegment> {
    let live = HistoryEntry::new(current.direction, current.since_change);
    let currents = std::iter::once(&live).chain(history.iter_newest_first());
    let nexts = history.iter_newest_first();

    let window = config.window;
    let shrink_from = window - config.shrink_lookahead;

    let mut segments = Vec::new();
    let mut total = 0.0f32;
    let mut shrunk = false;

    for (cur, next) in currents.zip(nexts) {
        total += cur.held;

        if total > window + WINDOW_EPSILON {
            break;
        }
        if total > shrink_from + WINDOW_EPSILON {
            shrunk = true;
        }

        let (thickness, radius) = if shrunk {
            (config.thin_thickness, config.point_radius / 2.0)
        } else {
            (config.full_thickness, config.point_radius)
        };

        segments.push(TrailSegment {
            from: cur.direction,
            to: next.direction,
            elapsed: total,
            color: config.gradient.sample(total / window),
            thickness,
            radius,
            shrunk,
        });
    }

    segments
}

/// Submission order for the rasteriser: oldest segment first, newest last
///
/// Newer (larger, brighter) segments are drawn over older, shrunk ones.
pub fn draw_order(segments: &[TrailSegment]) -> impl Iterator<Item = &TrailSegment> + '_ {
    segments.iter().rev()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrailConfig {
        TrailConfig::default()
    }

    fn history(entries: &[(Direction, f32)]) -> HistoryBuffer {
        let mut buffer = HistoryBuffer::new(50);
        for (dir, held) in entries {
            buffer.push(HistoryEntry::new(*dir, *held));
        }
        buffer
    }

    fn live(direction: Direction, since_change: f32) -> CurrentInput {
        CurrentInput {
            direction,
            since_change,
        }
    }

    #[test]
    fn test_empty_history_has_no_segments() {
        let segments = compute_segments(&live(Direction::Up, 0.1), &HistoryBuffer::new(5), &config());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_pairs_walk_newest_to_oldest() {
        let buffer = history(&[(Direction::Neutral, 1.0), (Direction::Down, 0.125)]);
        let segments = compute_segments(&live(Direction::DownRight, 0.0625), &buffer, &config());

        // live(3) -> 2, then 2 -> 5; the oldest entry has no successor
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from, Direction::DownRight);
        assert_eq!(segments[0].to, Direction::Down);
        assert_eq!(segments[0].elapsed, 0.0625);
        assert_eq!(segments[1].from, Direction::Down);
        assert_eq!(segments[1].to, Direction::Neutral);
        assert_eq!(segments[1].elapsed, 0.1875);
    }

    #[test]
    fn test_window_truncates_whole_segments() {
        let buffer = history(&[
            (Direction::Neutral, 1.0),
            (Direction::Down, 0.25),
            (Direction::Right, 0.25),
        ]);
        // 0.125 + 0.25 = 0.375 fits, + 0.25 = 0.625 does not
        let segments = compute_segments(&live(Direction::Up, 0.125), &buffer, &config());
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.elapsed <= 0.5));
    }

    #[test]
    fn test_window_tolerates_summing_error() {
        // 0.3 + 0.2 summed from 1/60 ticks lands a hair above 0.5
        let buffer = history(&[(Direction::Neutral, 1.0), (Direction::Right, 0.2)]);
        let segments = compute_segments(&live(Direction::UpRight, 0.30000004), &buffer, &config());

        assert_eq!(segments.len(), 2);
        assert!(segments[1].elapsed > 0.5);
        assert!(segments[1].shrunk);

        let past = compute_segments(&live(Direction::UpRight, 0.31), &buffer, &config());
        assert_eq!(past.len(), 1);
    }

    #[test]
    fn test_shrink_is_sticky() {
        let buffer = history(&[
            (Direction::Neutral, 0.0),
            (Direction::Down, 0.015625),
            (Direction::Right, 0.46875),
        ]);
        let segments = compute_segments(&live(Direction::Up, 0.0), &buffer, &config());

        assert_eq!(segments.len(), 3);
        assert!(!segments[0].shrunk);
        assert_eq!(segments[0].thickness, 6.0);
        assert_eq!(segments[0].radius, 5.0);

        // 0.46875 crosses 0.45
        assert!(segments[1].shrunk);
        assert_eq!(segments[1].thickness, 2.0);
        assert_eq!(segments[1].radius, 2.5);

        // Every older segment stays shrunk
        assert!(segments[2].shrunk);
    }

    #[test]
    fn test_color_follows_elapsed() {
        let buffer = history(&[(Direction::Neutral, 1.0)]);
        let cfg = config();

        let fresh = compute_segments(&live(Direction::Up, 0.0), &buffer, &cfg);
        assert_eq!(fresh[0].color, cfg.gradient.sample(0.0));

        let half = compute_segments(&live(Direction::Up, 0.25), &buffer, &cfg);
        assert_eq!(half[0].color, Rgba::rgb(0, 0, 255));

        let at_window = compute_segments(&live(Direction::Up, 0.5), &buffer, &cfg);
        assert_eq!(at_window[0].color, *cfg.gradient.stops().last().unwrap());
    }

    #[test]
    fn test_draw_order_is_reversed() {
        let buffer = history(&[(Direction::Neutral, 1.0), (Direction::Down, 0.125)]);
        let segments = compute_segments(&live(Direction::DownRight, 0.0625), &buffer, &config());

        let drawn: Vec<_> = draw_order(&segments).map(|s| s.from).collect();
        assert_eq!(drawn, vec![Direction::Down, Direction::DownRight]);
    }
}
