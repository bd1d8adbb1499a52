//! Ghost stick tween between the previous and the current direction

use crate::easing::ease_out_pow;
use crate::geometry::{AnchorLayout, Point};

use super::{CurrentInput, HistoryBuffer};

/// Point between `from` and `to` after easing `t` with `1 - (1 - t)^power`
pub fn ghost_position(from: Point, to: Point, t: f32, power: f32) -> Point {
    from.lerp(to, ease_out_pow(t, power))
}

/// Where the ghost stick is drawn, `None` when there is no previous direction
pub fn stick_ghost(
    current: &CurrentInput,
    history: &HistoryBuffer,
    layout: &AnchorLayout,
    power: f32,
) -> Option<Point> {
    let previous = history.peek_newest()?;
    Some(ghost_position(
        layout.anchor(previous.direction),
        layout.anchor(current.direction),
        current.since_change,
        power,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Direction, HistoryEntry};
    use crate::easing::STICK_TWEEN_POWER;
    use crate::geometry::BoardRect;

    fn layout() -> AnchorLayout {
        AnchorLayout::compute(&BoardRect::new(0.0, 0.0, 100.0, 100.0), 0.85, 0.0)
    }

    #[test]
    fn test_ghost_endpoints() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);

        assert_eq!(ghost_position(from, to, 0.0, STICK_TWEEN_POWER), from);
        let end = ghost_position(from, to, 1.0, STICK_TWEEN_POWER);
        assert!((end.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_ghost_without_history() {
        let current = CurrentInput {
            direction: Direction::Right,
            since_change: 0.0,
        };
        assert!(stick_ghost(&current, &HistoryBuffer::new(5), &layout(), 30.0).is_none());
    }

    #[test]
    fn test_ghost_starts_at_previous_direction() {
        let mut history = HistoryBuffer::new(5);
        history.push(HistoryEntry::new(Direction::Left, 0.3));
        let layout = layout();

        let at_change = CurrentInput {
            direction: Direction::Right,
            since_change: 0.0,
        };
        assert_eq!(
            stick_ghost(&at_change, &history, &layout, STICK_TWEEN_POWER),
            Some(layout.anchor(Direction::Left))
        );

        let settled = CurrentInput {
            direction: Direction::Right,
            since_change: 1.0,
        };
        let pos = stick_ghost(&settled, &history, &layout, STICK_TWEEN_POWER).unwrap();
        assert!(pos.distance(layout.anchor(Direction::Right)) < 1e-3);
    }
}
