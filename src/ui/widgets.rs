//! Drawing of the per-device visuals: stick plots, trigger gauges and the
//! button checkbox row.

use crate::mapping::{AxisMapper, Rgb, ScreenPoint, TriggerGauge, ViewportRect};

use super::canvas::Canvas;
use super::common::Palette;

/// Stick plot: frame, a line from the center to the current position, and a
/// dot on the position.
pub fn draw_stick(
    canvas: &mut dyn Canvas,
    raw_x: f32,
    raw_y: f32,
    viewport: ViewportRect,
    invert_y: bool,
) {
    let position = AxisMapper::map(raw_x, raw_y, viewport, invert_y);
    let center = AxisMapper::center(viewport);

    canvas.stroke_rect(viewport, 2.0, Palette::STICK_FRAME);
    canvas.line(center, position, 3.0, Palette::STICK_LINE);
    canvas.circle(position, 10.0, Palette::STICK_DOT);
}

/// Gradient arc plus the pointer for `raw`.
pub fn draw_gauge(canvas: &mut dyn Canvas, gauge: &TriggerGauge, raw: f32, invert: bool) {
    let center = gauge.center();
    for segment in gauge.segments(invert) {
        canvas.arc(
            center,
            gauge.radius,
            segment.start_angle,
            segment.end_angle,
            gauge.thickness,
            segment.color,
        );
    }
    canvas.line(center, gauge.tip(raw, invert), 2.0, Palette::GAUGE_POINTER);
}

/// One box per button, laid out left to right; pressed buttons are filled.
pub fn draw_button_row(
    canvas: &mut dyn Canvas,
    pressed: impl IntoIterator<Item = bool>,
    origin: ScreenPoint,
    size: i32,
    spacing: i32,
) {
    for (i, is_pressed) in pressed.into_iter().enumerate() {
        let cell = ViewportRect::new(origin.x + i as i32 * spacing, origin.y, size, size);
        canvas.stroke_rect(cell, 2.0, Palette::CHECKBOX);
        if is_pressed {
            canvas.fill_rect(cell.inset(4), Palette::CHECKBOX);
        }
    }
}

/// Background panel behind the visuals: a colored border around a filled body.
pub fn draw_panel(canvas: &mut dyn Canvas, rect: ViewportRect, border: i32, border_color: Rgb, fill: Rgb) {
    canvas.stroke_rect(rect, border as f32, border_color);
    canvas.fill_rect(rect.inset(border), fill);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::{DrawCall, RecordingCanvas};

    #[test]
    fn stick_line_runs_from_center_to_position() {
        let mut canvas = RecordingCanvas::default();
        let viewport = ViewportRect::new(550, 50, 140, 140);
        draw_stick(&mut canvas, -1.0, -1.0, viewport, false);

        assert!(canvas.calls.contains(&DrawCall::Line(
            ScreenPoint::new(620, 120),
            ScreenPoint::new(550, 50),
            Palette::STICK_LINE
        )));
        assert!(canvas
            .calls
            .contains(&DrawCall::Circle(ScreenPoint::new(550, 50), Palette::STICK_DOT)));
    }

    #[test]
    fn only_pressed_buttons_are_filled() {
        let mut canvas = RecordingCanvas::default();
        draw_button_row(
            &mut canvas,
            [false, true, false],
            ScreenPoint::new(510, 250),
            20,
            30,
        );
        let fills: Vec<&DrawCall> = canvas
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect(..)))
            .collect();
        assert_eq!(
            fills,
            vec![&DrawCall::FillRect(
                ViewportRect::new(544, 254, 12, 12),
                Palette::CHECKBOX
            )]
        );
    }

    #[test]
    fn gauge_draws_every_band_then_the_pointer() {
        let mut canvas = RecordingCanvas::default();
        let gauge = TriggerGauge {
            origin: ScreenPoint::new(550, 300),
            radius: 50.0,
            steps: 12,
            thickness: 14.0,
            rest: Rgb::GREEN,
            active: Rgb::RED,
        };
        draw_gauge(&mut canvas, &gauge, 0.0, false);

        assert_eq!(canvas.arcs(), 12);
        assert_eq!(
            canvas.calls.last(),
            Some(&DrawCall::Line(
                ScreenPoint::new(600, 350),
                ScreenPoint::new(600, 300),
                Palette::GAUGE_POINTER
            ))
        );
    }
}
