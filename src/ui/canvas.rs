//! Render-surface capability.
//!
//! The viewer only ever issues these primitives, at integer screen
//! coordinates. [`EguiCanvas`] forwards them to an `egui::Painter`.

use eframe::egui::{self, pos2, Align2, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind};

use crate::mapping::{Rgb, ScreenPoint, ViewportRect};

/// Angular resolution used to flatten arcs into polylines.
const ARC_DEGREES_PER_POINT: f32 = 2.0;

pub trait Canvas {
    fn fill_rect(&mut self, rect: ViewportRect, color: Rgb);
    fn stroke_rect(&mut self, rect: ViewportRect, width: f32, color: Rgb);
    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Rgb);
    fn circle(&mut self, center: ScreenPoint, radius: f32, color: Rgb);
    /// Arc between two angles in degrees, counter-clockwise with 0° pointing right.
    fn arc(
        &mut self,
        center: ScreenPoint,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Rgb,
    );
    /// Text anchored at its top-left corner.
    fn text(&mut self, at: ScreenPoint, text: &str, size: f32, color: Rgb);
}

pub struct EguiCanvas<'p> {
    painter: &'p Painter,
}

impl<'p> EguiCanvas<'p> {
    pub fn new(painter: &'p Painter) -> Self {
        Self { painter }
    }
}

fn to_pos(point: ScreenPoint) -> Pos2 {
    pos2(point.x as f32, point.y as f32)
}

fn to_rect(rect: ViewportRect) -> Rect {
    Rect::from_min_size(
        pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

/// Points along an arc; screen y grows downward, so the sine is subtracted.
fn arc_points(center: ScreenPoint, radius: f32, start_deg: f32, end_deg: f32) -> Vec<Pos2> {
    let sweep = end_deg - start_deg;
    let count = ((sweep.abs() / ARC_DEGREES_PER_POINT).ceil() as usize).max(1);
    (0..=count)
        .map(|i| {
            let angle = (start_deg + sweep * i as f32 / count as f32).to_radians();
            pos2(
                center.x as f32 + radius * angle.cos(),
                center.y as f32 - radius * angle.sin(),
            )
        })
        .collect()
}

impl Canvas for EguiCanvas<'_> {
    fn fill_rect(&mut self, rect: ViewportRect, color: Rgb) {
        self.painter.rect_filled(to_rect(rect), 0.0, color);
    }

    fn stroke_rect(&mut self, rect: ViewportRect, width: f32, color: Rgb) {
        self.painter.rect_stroke(
            to_rect(rect),
            0.0,
            Stroke::new(width, color),
            StrokeKind::Inside,
        );
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Rgb) {
        self.painter
            .line_segment([to_pos(from), to_pos(to)], Stroke::new(width, color));
    }

    fn circle(&mut self, center: ScreenPoint, radius: f32, color: Rgb) {
        self.painter.circle_filled(to_pos(center), radius, color);
    }

    fn arc(
        &mut self,
        center: ScreenPoint,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Rgb,
    ) {
        // Keep the band inside the bounding circle, like a thick arc stroke would
        let mid_radius = (radius - width / 2.0).max(0.0);
        let points = arc_points(center, mid_radius, start_deg, end_deg);
        self.painter
            .add(Shape::line(points, Stroke::new(width, color)));
    }

    fn text(&mut self, at: ScreenPoint, text: &str, size: f32, color: Rgb) {
        self.painter.text(
            to_pos(at),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(size),
            color.into(),
        );
    }
}

/// Canvas that records every call, for asserting on frame output.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect(ViewportRect, Rgb),
    StrokeRect(ViewportRect, Rgb),
    Line(ScreenPoint, ScreenPoint, Rgb),
    Circle(ScreenPoint, Rgb),
    Arc { start: f32, end: f32, color: Rgb },
    Text(ScreenPoint, String),
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_at(&self, text: &str) -> Option<ScreenPoint> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Text(at, t) if t == text => Some(*at),
            _ => None,
        })
    }

    pub fn arcs(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Arc { .. }))
            .count()
    }
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: ViewportRect, color: Rgb) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }
    fn stroke_rect(&mut self, rect: ViewportRect, _width: f32, color: Rgb) {
        self.calls.push(DrawCall::StrokeRect(rect, color));
    }
    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, _width: f32, color: Rgb) {
        self.calls.push(DrawCall::Line(from, to, color));
    }
    fn circle(&mut self, center: ScreenPoint, _radius: f32, color: Rgb) {
        self.calls.push(DrawCall::Circle(center, color));
    }
    fn arc(
        &mut self,
        _center: ScreenPoint,
        _radius: f32,
        start_deg: f32,
        end_deg: f32,
        _width: f32,
        color: Rgb,
    ) {
        self.calls.push(DrawCall::Arc {
            start: start_deg,
            end: end_deg,
            color,
        });
    }
    fn text(&mut self, at: ScreenPoint, text: &str, _size: f32, _color: Rgb) {
        self.calls.push(DrawCall::Text(at, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_points_follow_screen_orientation() {
        let points = arc_points(ScreenPoint::new(100, 100), 10.0, 0.0, 180.0);
        let first = points[0];
        let middle = points[points.len() / 2];
        let last = points[points.len() - 1];
        assert!((first.x - 110.0).abs() < 1e-3 && (first.y - 100.0).abs() < 1e-3);
        assert!((middle.y - 90.0).abs() < 1e-3, "upper half is above the center");
        assert!((last.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn tiny_arcs_still_have_two_points() {
        assert_eq!(arc_points(ScreenPoint::new(0, 0), 5.0, 10.0, 10.5).len(), 2);
    }
}
