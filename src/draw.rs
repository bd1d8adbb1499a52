//! Drawable primitives handed to the rasteriser
//!
//! A [`DrawList`] is filled in submission order; the painter draws it front
//! to back without reordering, so later primitives cover earlier ones.

use crate::color::Rgba;
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Closed polygon, filled then stroked
    Polygon {
        points: Vec<Point>,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        thickness: f32,
    },
    /// Text centred on `pos`
    Text {
        text: String,
        pos: Point,
        color: Rgba,
        size: f32,
    },
}

/// Ordered primitive sink
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn polygon(&mut self, points: Vec<Point>, fill: Rgba, stroke: Rgba, stroke_width: f32) {
        self.push(Primitive::Polygon {
            points,
            fill,
            stroke,
            stroke_width,
        });
    }

    /// Skips fully transparent or zero-size circles
    pub fn circle(&mut self, center: Point, radius: f32, fill: Rgba) {
        if radius <= 0.0 || fill.a == 0 {
            return;
        }
        self.push(Primitive::Circle {
            center,
            radius,
            fill,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba, thickness: f32) {
        self.push(Primitive::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Point, color: Rgba, size: f32) {
        if color.a == 0 {
            return;
        }
        self.push(Primitive::Text {
            text: text.into(),
            pos,
            color,
            size,
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}
