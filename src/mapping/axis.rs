//! Analog stick → cartesian plot position.

use super::{clamp_unit, ScreenPoint, ViewportRect};

/// Maps a raw axis pair onto a viewport.
///
/// A raw value of -1 lands on the left/top edge, +1 on the right/bottom edge
/// and 0 on the center. Positive vertical values point down, matching screen
/// coordinates; `invert_y` flips that for pads whose vertical axis reads the
/// other way round.
///
/// Callers must only map a pair the device actually reports: a left stick
/// needs more than one axis, a right stick more than three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisMapper;

impl AxisMapper {
    pub fn map(raw_x: f32, raw_y: f32, viewport: ViewportRect, invert_y: bool) -> ScreenPoint {
        let raw_x = clamp_unit(raw_x);
        let raw_y = clamp_unit(raw_y);
        let raw_y = if invert_y { -raw_y } else { raw_y };

        ScreenPoint::new(
            project(raw_x, viewport.width) + viewport.x,
            project(raw_y, viewport.height) + viewport.y,
        )
    }

    /// Reference point for the direction line; identical to `map(0, 0, ..)`.
    pub fn center(viewport: ViewportRect) -> ScreenPoint {
        Self::map(0.0, 0.0, viewport, false)
    }
}

fn project(raw: f32, extent: i32) -> i32 {
    ((raw + 1.0) * extent as f32 / 2.0).round() as i32
}
