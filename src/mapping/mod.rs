//! Mapping of raw controller samples into screen space.
//!
//! Every mapping in this module is a pure function of the raw sample, the
//! target geometry and the inversion flag. Nothing here keeps state between
//! frames, so the same input always lands on the same pixel.
//!
//! - [`axis`] - analog stick pair to a point inside a [`ViewportRect`]
//! - [`gauge`] - trigger value to a pointer angle on a semicircular gauge

pub mod axis;
pub mod gauge;

pub use axis::AxisMapper;
pub use gauge::{ArcSegment, TriggerGauge};

use serde::{Deserialize, Serialize};

/// Integer pixel position on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in screen pixels, supplied by the caller per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewportRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    /// Inclusive containment: points on the border count as inside.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        self.x <= point.x
            && point.x <= self.x + self.width
            && self.y <= point.y
            && point.y <= self.y + self.height
    }

    /// Shrinks the rectangle by `by` pixels on every side.
    pub fn inset(&self, by: i32) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            self.width - 2 * by,
            self.height - 2 * by,
        )
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// RGB color as stored in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const DARK_GRAY: Rgb = Rgb(64, 64, 64);

    /// Linear interpolation of each channel independently, truncating toward zero.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + t * (b as f32 - a as f32)) as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

impl From<Rgb> for egui::Color32 {
    fn from(color: Rgb) -> Self {
        egui::Color32::from_rgb(color.0, color.1, color.2)
    }
}

/// Clamps a raw sample to [-1, 1]. NaN is read as the neutral position.
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let rect = ViewportRect::new(10, 20, 30, 40);
        assert!(rect.contains(ScreenPoint::new(10, 20)));
        assert!(rect.contains(ScreenPoint::new(40, 60)));
        assert!(!rect.contains(ScreenPoint::new(41, 60)));
        assert!(!rect.contains(ScreenPoint::new(10, 19)));
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        assert_eq!(Rgb::GREEN.lerp(Rgb::RED, 0.0), Rgb::GREEN);
        assert_eq!(Rgb::GREEN.lerp(Rgb::RED, 1.0), Rgb::RED);
        assert_eq!(Rgb::GREEN.lerp(Rgb::RED, 0.5), Rgb(127, 127, 0));
    }

    #[test]
    fn clamp_unit_handles_overshoot_and_nan() {
        assert_eq!(clamp_unit(1.02), 1.0);
        assert_eq!(clamp_unit(-3.0), -1.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }
}
