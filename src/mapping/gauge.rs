//! Trigger → semicircular gauge.
//!
//! Angles are in degrees using the mathematical convention (0° points right,
//! 90° points up on screen). A released trigger (-1) points at 180°, a fully
//! pressed one (+1) at 0°. The inverted gauge draws its arc over the lower
//! half, [180°, 360°], and mirrors the pointer into it.

use super::{clamp_unit, Rgb, ScreenPoint};

/// Axis indices used for triggers on conventional dual-stick layouts.
pub const LEFT_TRIGGER_AXIS: usize = 4;
pub const RIGHT_TRIGGER_AXIS: usize = 5;

/// Devices reporting fewer axes than this are treated as having no analog triggers.
pub const MIN_TRIGGER_AXES: usize = 6;

/// One colored sub-range of the gauge arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: Rgb,
}

/// Geometry and palette of a single gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerGauge {
    /// Top-left corner of the gauge's bounding square.
    pub origin: ScreenPoint,
    pub radius: f32,
    pub steps: usize,
    pub thickness: f32,
    pub rest: Rgb,
    pub active: Rgb,
}

impl TriggerGauge {
    pub fn center(&self) -> ScreenPoint {
        let r = self.radius.round() as i32;
        self.origin.offset(r, r)
    }

    /// Gradient segments for the background arc.
    pub fn segments(&self, invert: bool) -> Vec<ArcSegment> {
        let (start, end) = arc_span(invert);
        gradient_arc(start, end, self.steps, self.rest, self.active)
    }

    /// Where the pointer for `raw` ends, in screen pixels.
    pub fn tip(&self, raw: f32, invert: bool) -> ScreenPoint {
        let angle = pointer_angle(raw, invert);
        pointer_tip(self.center(), self.radius, angle, invert)
    }
}

pub fn pointer_angle(raw: f32, invert: bool) -> f32 {
    let pressed = (clamp_unit(raw) + 1.0) / 2.0;
    if invert {
        180.0 * (1.0 - pressed)
    } else {
        180.0 - 180.0 * pressed
    }
}

/// Angular range the background arc covers.
pub fn arc_span(invert: bool) -> (f32, f32) {
    if invert {
        (180.0, 360.0)
    } else {
        (0.0, 180.0)
    }
}

/// Splits `[start_angle, end_angle]` into `steps` equal sub-ranges whose colors
/// step linearly from `rest` to `active`.
///
/// The first segment is exactly `rest` and the last exactly `active`; `steps`
/// only changes the banding in between.
pub fn gradient_arc(
    start_angle: f32,
    end_angle: f32,
    steps: usize,
    rest: Rgb,
    active: Rgb,
) -> Vec<ArcSegment> {
    if steps == 0 {
        return Vec::new();
    }
    let angle_step = (end_angle - start_angle) / steps as f32;
    let last = (steps - 1).max(1) as f32;

    (0..steps)
        .map(|i| {
            let from = start_angle + i as f32 * angle_step;
            ArcSegment {
                start_angle: from,
                end_angle: from + angle_step,
                color: rest.lerp(active, i as f32 / last),
            }
        })
        .collect()
}

/// Pointer tip for `angle_deg`. Not inverted, the tip rises above the center;
/// inverted, it drops below it.
pub fn pointer_tip(center: ScreenPoint, radius: f32, angle_deg: f32, invert: bool) -> ScreenPoint {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let dy = if invert { radius * sin } else { -radius * sin };
    ScreenPoint::new(
        (center.x as f32 + radius * cos).round() as i32,
        (center.y as f32 + dy).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge() -> TriggerGauge {
        TriggerGauge {
            origin: ScreenPoint::new(550, 300),
            radius: 50.0,
            steps: 50,
            thickness: 14.0,
            rest: Rgb::GREEN,
            active: Rgb::RED,
        }
    }

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(pointer_angle(-1.0, false), 180.0);
        assert_eq!(pointer_angle(1.0, false), 0.0);
        assert_eq!(pointer_angle(-1.0, true), 180.0);
        assert_eq!(pointer_angle(1.0, true), 0.0);
    }

    #[test]
    fn half_pressed_points_straight_up() {
        assert_eq!(pointer_angle(0.0, false), 90.0);
        assert_eq!(gauge().tip(0.0, false), ScreenPoint::new(600, 300));
        assert_eq!(gauge().tip(0.0, true), ScreenPoint::new(600, 400));
    }

    #[test]
    fn angle_decreases_as_the_trigger_is_pulled() {
        let mut previous = pointer_angle(-1.0, false);
        for i in 1..=100 {
            let raw = -1.0 + i as f32 * 0.02;
            let angle = pointer_angle(raw, false);
            assert!(angle <= previous, "{angle} > {previous} at {raw}");
            previous = angle;
        }
    }

    #[test]
    fn tip_stays_on_the_gauge_circle() {
        let g = gauge();
        let center = g.center();
        for i in 0..=20 {
            let raw = -1.0 + i as f32 * 0.1;
            for invert in [false, true] {
                let tip = g.tip(raw, invert);
                let dx = (tip.x - center.x) as f32;
                let dy = (tip.y - center.y) as f32;
                assert!(((dx * dx + dy * dy).sqrt() - g.radius).abs() <= 1.0);
                if invert {
                    assert!(tip.y >= center.y);
                } else {
                    assert!(tip.y <= center.y);
                }
            }
        }
    }

    #[test]
    fn gradient_covers_the_span_in_equal_steps() {
        let segments = gradient_arc(0.0, 180.0, 4, Rgb::GREEN, Rgb::RED);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].start_angle, 0.0);
        assert_eq!(segments[0].end_angle, 45.0);
        assert_eq!(segments[3].end_angle, 180.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    #[test]
    fn gradient_endpoints_do_not_depend_on_steps() {
        for steps in [2, 7, 50, 360] {
            let segments = gradient_arc(180.0, 360.0, steps, Rgb::GREEN, Rgb::RED);
            assert_eq!(segments.first().map(|s| s.color), Some(Rgb::GREEN));
            assert_eq!(segments.last().map(|s| s.color), Some(Rgb::RED));
        }
    }

    #[test]
    fn degenerate_step_counts() {
        assert!(gradient_arc(0.0, 180.0, 0, Rgb::GREEN, Rgb::RED).is_empty());
        let single = gradient_arc(0.0, 180.0, 1, Rgb::GREEN, Rgb::RED);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].color, Rgb::GREEN);
        assert_eq!(single[0].end_angle, 180.0);
    }

    #[test]
    fn inverted_gauge_uses_the_lower_half() {
        let segments = gauge().segments(true);
        assert_eq!(segments.first().map(|s| s.start_angle), Some(180.0));
        let end = segments.last().map(|s| s.end_angle).unwrap_or_default();
        assert!((end - 360.0).abs() < 1e-3);
    }
}
