//! Shared colors for the viewer.

use crate::mapping::Rgb;

/// Fixed colors of the drawn elements. Layout colors (background, panel,
/// text, gauge gradient) come from the configuration instead.
pub struct Palette;

impl Palette {
    pub const STICK_FRAME: Rgb = Rgb::BLACK;
    pub const STICK_LINE: Rgb = Rgb::YELLOW;
    pub const STICK_DOT: Rgb = Rgb::RED;

    pub const GAUGE_POINTER: Rgb = Rgb::BLUE;

    pub const CHECKBOX: Rgb = Rgb::BLACK;

    pub const TOGGLE_BOX: Rgb = Rgb::BLACK;
    pub const TOGGLE_CHECK: Rgb = Rgb::RED;
    pub const TOGGLE_LABEL: Rgb = Rgb::BLACK;
}
