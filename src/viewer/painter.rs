//! Rasterise a [`DrawList`] with an egui painter

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};

use crate::draw::{DrawList, Primitive};

/// Paint every primitive in submission order
pub fn paint(painter: &Painter, list: &DrawList) {
    for primitive in list {
        paint_primitive(painter, primitive);
    }
}

fn paint_primitive(painter: &Painter, primitive: &Primitive) {
    match primitive {
        Primitive::Polygon {
            points,
            fill,
            stroke,
            stroke_width,
        } => {
            let points: Vec<Pos2> = points.iter().map(|p| Pos2::from(*p)).collect();
            painter.add(Shape::convex_polygon(
                points,
                Color32::from(*fill),
                Stroke::new(*stroke_width, Color32::from(*stroke)),
            ));
        },
        Primitive::Circle {
            center,
            radius,
            fill,
        } => {
            painter.circle_filled(Pos2::from(*center), *radius, Color32::from(*fill));
        },
        Primitive::Line {
            from,
            to,
            color,
            thickness,
        } => {
            painter.line_segment(
                [Pos2::from(*from), Pos2::from(*to)],
                Stroke::new(*thickness, Color32::from(*color)),
            );
        },
        Primitive::Text {
            text,
            pos,
            color,
            size,
        } => {
            painter.text(
                Pos2::from(*pos),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(*size),
                Color32::from(*color),
            );
        },
    }
}
