//! Discrete 8-way stick direction
//!
//! Every input source (keyboard, d-pad, analog stick) is reduced to one of
//! nine [`Direction`] values before it reaches the history. Offsets use screen
//! orientation: `x` grows to the right and `y` grows downwards, so "up" is
//! `(0, -1)`.

use std::fmt;

use crate::geometry::Point;

/// Analog axis magnitude that must be exceeded before the stick leaves neutral
pub const ANALOG_THRESHOLD: f32 = 0.5;

/// One of the 9 cells of the 3x3 stick grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    #[default]
    Neutral,
}

/// Digital direction signals for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalDirection {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DigitalDirection {
    /// Merge two digital sources (e.g. keyboard and d-pad) by OR-ing each key
    pub fn merge(self, other: DigitalDirection) -> Self {
        Self {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

impl Direction {
    /// All directions, perimeter clockwise from up-left, then neutral.
    ///
    /// The position of a direction in this array is its [`Direction::index`].
    pub const ALL: [Direction; 9] = [
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::Neutral,
    ];

    /// The 8 non-neutral directions in polygon order
    pub const PERIMETER: [Direction; 8] = [
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
    ];

    /// Build from signed offsets; any positive value counts as `1`, any negative as `-1`
    pub fn from_offset(x: i8, y: i8) -> Self {
        match (x.signum(), y.signum()) {
            (-1, -1) => Direction::UpLeft,
            (0, -1) => Direction::Up,
            (1, -1) => Direction::UpRight,
            (1, 0) => Direction::Right,
            (1, 1) => Direction::DownRight,
            (0, 1) => Direction::Down,
            (-1, 1) => Direction::DownLeft,
            (-1, 0) => Direction::Left,
            _ => Direction::Neutral,
        }
    }

    /// Signed `(x, y)` grid offset, each in `{-1, 0, 1}`
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::Neutral => (0, 0),
        }
    }

    /// Position in [`Direction::ALL`]
    pub fn index(self) -> usize {
        match self {
            Direction::UpLeft => 0,
            Direction::Up => 1,
            Direction::UpRight => 2,
            Direction::Right => 3,
            Direction::DownRight => 4,
            Direction::Down => 5,
            Direction::DownLeft => 6,
            Direction::Left => 7,
            Direction::Neutral => 8,
        }
    }

    /// Opposite keys cancel each other (left+right nets to `x = 0`)
    pub fn from_digital(input: DigitalDirection) -> Self {
        let x = input.right as i8 - input.left as i8;
        let y = input.down as i8 - input.up as i8;
        Self::from_offset(x, y)
    }

    /// Quantise an analog pair (screen orientation, each in `[-1, 1]`)
    ///
    /// Stays neutral unless one axis exceeds [`ANALOG_THRESHOLD`]; then each
    /// axis is rounded independently, halves away from zero.
    pub fn from_analog(x: f32, y: f32) -> Self {
        let x = if x.is_finite() { x.clamp(-1.0, 1.0) } else { 0.0 };
        let y = if y.is_finite() { y.clamp(-1.0, 1.0) } else { 0.0 };

        if x.abs() <= ANALOG_THRESHOLD && y.abs() <= ANALOG_THRESHOLD {
            return Direction::Neutral;
        }

        Self::from_offset(x.round() as i8, y.round() as i8)
    }

    /// Combine digital and optional analog sources; non-neutral digital input wins
    pub fn resolve(digital: DigitalDirection, analog: Option<(f32, f32)>) -> Self {
        let from_keys = Self::from_digital(digital);
        if from_keys != Direction::Neutral {
            return from_keys;
        }

        match analog {
            Some((x, y)) => Self::from_analog(x, y),
            None => Direction::Neutral,
        }
    }

    /// Numpad notation used by fighting game communities (5 = neutral, 6 = forward)
    pub fn numpad(self) -> u8 {
        match self {
            Direction::UpLeft => 7,
            Direction::Up => 8,
            Direction::UpRight => 9,
            Direction::Right => 6,
            Direction::DownRight => 3,
            Direction::Down => 2,
            Direction::DownLeft => 1,
            Direction::Left => 4,
            Direction::Neutral => 5,
        }
    }

    /// Grid offset as a vector
    pub fn to_vector(self) -> Point {
        let (x, y) = self.offset();
        Point::new(x as f32, y as f32)
    }

    /// Nearest direction for an arbitrary vector, each component rounded and clamped
    pub fn from_vector(v: Point) -> Self {
        let axis = |value: f32| {
            if value.is_finite() {
                value.round().clamp(-1.0, 1.0) as i8
            } else {
                0
            }
        };
        Self::from_offset(axis(v.x), axis(v.y))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numpad())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> DigitalDirection {
        DigitalDirection {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_offset_roundtrip() {
        for dir in Direction::ALL {
            let (x, y) = dir.offset();
            assert_eq!(Direction::from_offset(x, y), dir);
            assert_eq!(Direction::from_vector(dir.to_vector()), dir);
            assert_eq!(Direction::ALL[dir.index()], dir);
        }
    }

    #[test]
    fn test_digital_up_alone() {
        let dir = Direction::from_digital(keys(true, false, false, false));
        assert_eq!(dir, Direction::Up);
        assert_eq!(dir.offset(), (0, -1));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let dir = Direction::from_digital(keys(false, false, true, true));
        assert_eq!(dir.offset().0, 0);
        assert_eq!(dir, Direction::Neutral);

        // Left+right with down still reads as down
        let dir = Direction::from_digital(keys(false, true, true, true));
        assert_eq!(dir, Direction::Down);

        let dir = Direction::from_digital(keys(true, true, true, true));
        assert_eq!(dir, Direction::Neutral);
    }

    #[test]
    fn test_analog_rounding() {
        assert_eq!(Direction::from_analog(0.6, 0.1), Direction::Right);
        assert_eq!(Direction::from_analog(0.7, 0.7), Direction::DownRight);
        assert_eq!(Direction::from_analog(-0.6, -0.5), Direction::UpLeft);
        // Neither axis beyond the threshold
        assert_eq!(Direction::from_analog(0.5, 0.45), Direction::Neutral);
        assert_eq!(Direction::from_analog(f32::NAN, 0.9), Direction::Down);
        assert_eq!(Direction::from_analog(3.0, 0.0), Direction::Right);
    }

    #[test]
    fn test_digital_takes_precedence() {
        let left = keys(false, false, true, false);
        assert_eq!(Direction::resolve(left, Some((0.9, 0.0))), Direction::Left);

        let none = DigitalDirection::default();
        assert_eq!(Direction::resolve(none, Some((0.9, 0.0))), Direction::Right);
        assert_eq!(Direction::resolve(none, None), Direction::Neutral);
    }

    #[test]
    fn test_numpad_display() {
        assert_eq!(Direction::Neutral.to_string(), "5");
        assert_eq!(Direction::UpRight.to_string(), "9");
        assert_eq!(Direction::DownLeft.to_string(), "1");
    }

    #[test]
    fn test_merge_digital_sources() {
        let keyboard = keys(true, false, false, false);
        let dpad = keys(false, false, false, true);
        assert_eq!(
            Direction::from_digital(keyboard.merge(dpad)),
            Direction::UpRight
        );
    }
}
