//! Board geometry: screen points and the 9 direction anchors
//!
//! The board is an octagon built from a bounding box. Corners are pulled in
//! by `quadrant * (1 - round_ratio)` on both axes, edge midpoints and the
//! centre sit exactly on the (inset) box.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::engine::Direction;

/// 2D screen-space point (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `t` of the way from `self` to `other`
    pub fn lerp(self, other: Point, t: f32) -> Point {
        self + (other - self) * t
    }

    pub fn distance(self, other: Point) -> f32 {
        let d = other - self;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Point> for egui::Pos2 {
    fn from(p: Point) -> Self {
        egui::pos2(p.x, p.y)
    }
}

/// Bounding box of a board, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoardRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoardRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner
    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

impl Default for BoardRect {
    fn default() -> Self {
        Self::new(100.0, 100.0, 100.0, 100.0)
    }
}

/// Screen position of every direction, indexed by [`Direction::index`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorLayout {
    anchors: [Point; 9],
}

impl AnchorLayout {
    /// Compute the 9 anchors for a box
    ///
    /// `inset` shrinks the box on every side before placing anchors. The
    /// corner pull-in is measured from the full box: `quadrant = size / 2`
    /// and `offset = quadrant * (1 - round_ratio)`.
    pub fn compute(rect: &BoardRect, round_ratio: f32, inset: f32) -> Self {
        let origin = rect.origin() + Point::new(inset, inset);
        let inner_w = (rect.width - 2.0 * inset).max(0.0);
        let inner_h = (rect.height - 2.0 * inset).max(0.0);

        let ox = rect.width / 2.0 * (1.0 - round_ratio);
        let oy = rect.height / 2.0 * (1.0 - round_ratio);
        let mid_x = inner_w / 2.0;
        let mid_y = inner_h / 2.0;

        let at = |x: f32, y: f32| origin + Point::new(x, y);

        let mut anchors = [Point::ZERO; 9];
        for dir in Direction::ALL {
            anchors[dir.index()] = match dir {
                Direction::UpLeft => at(ox, oy),
                Direction::Up => at(mid_x, 0.0),
                Direction::UpRight => at(inner_w - ox, oy),
                Direction::Right => at(inner_w, mid_y),
                Direction::DownRight => at(inner_w - ox, inner_h - oy),
                Direction::Down => at(mid_x, inner_h),
                Direction::DownLeft => at(ox, inner_h - oy),
                Direction::Left => at(0.0, mid_y),
                Direction::Neutral => at(mid_x, mid_y),
            };
        }

        Self { anchors }
    }

    pub fn anchor(&self, dir: Direction) -> Point {
        self.anchors[dir.index()]
    }

    pub fn center(&self) -> Point {
        self.anchor(Direction::Neutral)
    }

    /// Octagon vertices, clockwise from up-left
    pub fn perimeter(&self) -> [Point; 8] {
        Direction::PERIMETER.map(|dir| self.anchor(dir))
    }

    /// All anchors in [`Direction::ALL`] order
    pub fn all(&self) -> &[Point; 9] {
        &self.anchors
    }
}

/// Keeps the last computed layout until the box or its parameters change
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    cached: Option<((BoardRect, f32, f32), AnchorLayout)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, rect: &BoardRect, round_ratio: f32, inset: f32) -> &AnchorLayout {
        let key = (*rect, round_ratio, inset);
        if !matches!(&self.cached, Some((held, _)) if *held == key) {
            self.cached = Some((key, AnchorLayout::compute(rect, round_ratio, inset)));
        }
        match &self.cached {
            Some((_, layout)) => layout,
            None => unreachable!(),
        }
    }

    /// Whether a layout for exactly these parameters is held
    pub fn is_current(&self, rect: &BoardRect, round_ratio: f32, inset: f32) -> bool {
        matches!(&self.cached, Some((held, _)) if *held == (*rect, round_ratio, inset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_top_left_corner_offset() {
        let rect = BoardRect::new(0.0, 0.0, 100.0, 100.0);
        let layout = AnchorLayout::compute(&rect, 0.85, 2.0);

        // quadrant = 50, offset = 50 * 0.15 = 7.5, measured from the inset origin (2, 2)
        let inset_origin = Point::new(2.0, 2.0);
        assert!(approx(
            layout.anchor(Direction::UpLeft) - inset_origin,
            Point::new(7.5, 7.5)
        ));
    }

    #[test]
    fn test_midpoints_and_center_without_inset() {
        let rect = BoardRect::new(10.0, 20.0, 100.0, 60.0);
        let layout = AnchorLayout::compute(&rect, 0.85, 0.0);

        assert!(approx(layout.anchor(Direction::Up), Point::new(60.0, 20.0)));
        assert!(approx(layout.anchor(Direction::Down), Point::new(60.0, 80.0)));
        assert!(approx(layout.anchor(Direction::Left), Point::new(10.0, 50.0)));
        assert!(approx(layout.anchor(Direction::Right), Point::new(110.0, 50.0)));
        assert!(approx(layout.center(), Point::new(60.0, 50.0)));
    }

    #[test]
    fn test_corners_are_symmetric() {
        let rect = BoardRect::new(0.0, 0.0, 100.0, 100.0);
        let layout = AnchorLayout::compute(&rect, 0.85, 0.0);

        assert!(approx(layout.anchor(Direction::UpLeft), Point::new(7.5, 7.5)));
        assert!(approx(layout.anchor(Direction::UpRight), Point::new(92.5, 7.5)));
        assert!(approx(layout.anchor(Direction::DownRight), Point::new(92.5, 92.5)));
        assert!(approx(layout.anchor(Direction::DownLeft), Point::new(7.5, 92.5)));
    }

    #[test]
    fn test_center_with_inset_is_box_center() {
        let rect = BoardRect::new(100.0, 100.0, 100.0, 100.0);
        let layout = AnchorLayout::compute(&rect, 0.85, 2.0);
        assert!(approx(layout.center(), Point::new(150.0, 150.0)));
    }

    #[test]
    fn test_perimeter_order() {
        let rect = BoardRect::new(0.0, 0.0, 100.0, 100.0);
        let layout = AnchorLayout::compute(&rect, 0.85, 0.0);
        let perimeter = layout.perimeter();

        assert_eq!(perimeter[0], layout.anchor(Direction::UpLeft));
        assert_eq!(perimeter[3], layout.anchor(Direction::Right));
        assert_eq!(perimeter[7], layout.anchor(Direction::Left));
    }

    #[test]
    fn test_layout_cache_recomputes_on_change() {
        let mut cache = LayoutCache::new();
        let a = BoardRect::new(0.0, 0.0, 100.0, 100.0);
        let b = BoardRect::new(50.0, 0.0, 100.0, 100.0);

        assert!(!cache.is_current(&a, 0.85, 2.0));
        let first = *cache.get(&a, 0.85, 2.0);
        assert_eq!(first, AnchorLayout::compute(&a, 0.85, 2.0));
        assert!(cache.is_current(&a, 0.85, 2.0));
        assert_eq!(*cache.get(&a, 0.85, 2.0), first);

        let moved = *cache.get(&b, 0.85, 2.0);
        assert!(!cache.is_current(&a, 0.85, 2.0));
        assert!(cache.is_current(&b, 0.85, 2.0));
        assert_eq!(*cache.get(&b, 0.9, 2.0), AnchorLayout::compute(&b, 0.9, 2.0));
        assert!(approx(
            moved.center() - first.center(),
            Point::new(50.0, 0.0)
        ));
    }

    #[test]
    fn test_point_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -20.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, -10.0));
        assert_eq!(a.distance(Point::new(3.0, 4.0)), 5.0);
    }
}
