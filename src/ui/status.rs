//! Textual device summary and the cursor that writes it.

use std::ops::{Deref, DerefMut};

use crate::controller::InputDevice;
use crate::mapping::gauge::{LEFT_TRIGGER_AXIS, MIN_TRIGGER_AXES, RIGHT_TRIGGER_AXIS};
use crate::mapping::{Rgb, ScreenPoint};

use super::canvas::Canvas;

pub const NO_TRIGGERS_NOTICE: &str = "This joystick has no analog triggers.";

/// One report line, indented relative to wherever the report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub indent: usize,
    pub text: String,
}

impl StatusLine {
    fn new(indent: usize, text: impl Into<String>) -> Self {
        Self {
            indent,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(0, "")
    }
}

/// Summary of one device: identity, triggers, axes, buttons and hats.
///
/// [`lines`](Self::lines) is lazy and can be called again for a fresh pass;
/// samples are read from the device while the iterator advances.
pub struct StatusReport<'d, D: InputDevice> {
    device: &'d D,
}

impl<'d, D: InputDevice> StatusReport<'d, D> {
    pub fn new(device: &'d D) -> Self {
        Self { device }
    }

    pub fn lines(&self) -> impl Iterator<Item = StatusLine> + 'd {
        let device = self.device;
        identity(device)
            .chain(triggers(device))
            .chain(axes(device))
            .chain(buttons(device))
            .chain(hats(device))
    }
}

fn identity<D: InputDevice>(device: &D) -> impl Iterator<Item = StatusLine> {
    [
        StatusLine::new(0, format!("Joystick {}", device.instance_id())),
        StatusLine::blank(),
        StatusLine::new(1, "Joystick name:"),
        StatusLine::new(1, format!("- {}", device.name())),
        StatusLine::new(1, format!("GUID: {}", device.guid())),
        StatusLine::new(1, format!("Power level: {}", device.power_level())),
    ]
    .into_iter()
}

fn triggers<D: InputDevice>(device: &D) -> impl Iterator<Item = StatusLine> {
    let lines = if device.axis_count() < MIN_TRIGGER_AXES {
        vec![StatusLine::new(1, NO_TRIGGERS_NOTICE)]
    } else {
        vec![
            StatusLine::blank(),
            StatusLine::new(1, "Triggers:"),
            StatusLine::new(
                2,
                format!("Left: {:>6.3}", device.axis(LEFT_TRIGGER_AXIS)),
            ),
            StatusLine::new(
                2,
                format!("Right: {:>6.3}", device.axis(RIGHT_TRIGGER_AXIS)),
            ),
        ]
    };
    lines.into_iter()
}

fn axes<'d, D: InputDevice>(device: &'d D) -> impl Iterator<Item = StatusLine> + 'd {
    let count = device.axis_count();
    [
        StatusLine::blank(),
        StatusLine::new(1, format!("Number of axes: {count}")),
    ]
    .into_iter()
    .chain((0..count).map(move |i| {
        StatusLine::new(2, format!("Axis {i} value: {:>6.3}", device.axis(i)))
    }))
}

fn buttons<'d, D: InputDevice>(device: &'d D) -> impl Iterator<Item = StatusLine> + 'd {
    let count = device.button_count();
    [
        StatusLine::blank(),
        StatusLine::new(1, format!("Number of buttons: {count}")),
    ]
    .into_iter()
    .chain((0..count).map(move |i| {
        StatusLine::new(
            2,
            format!("Button {i:>2} value: {}", u8::from(device.button(i))),
        )
    }))
}

fn hats<'d, D: InputDevice>(device: &'d D) -> impl Iterator<Item = StatusLine> + 'd {
    let count = device.hat_count();
    [
        StatusLine::blank(),
        StatusLine::new(1, format!("Number of hats: {count}")),
    ]
    .into_iter()
    .chain(
        (0..count).map(move |i| StatusLine::new(2, format!("Hat {i} value: {}", device.hat(i)))),
    )
}

/// Write position for status text.
///
/// Indentation is only available through [`indent`](Self::indent), whose
/// guard restores the previous level when dropped.
#[derive(Debug, Clone)]
pub struct TextCursor {
    origin: ScreenPoint,
    position: ScreenPoint,
    level: usize,
    line_height: i32,
    indent_width: i32,
    font_size: f32,
    color: Rgb,
}

impl TextCursor {
    pub fn new(
        origin: ScreenPoint,
        line_height: i32,
        indent_width: i32,
        font_size: f32,
        color: Rgb,
    ) -> Self {
        Self {
            origin,
            position: origin,
            level: 0,
            line_height,
            indent_width,
            font_size,
            color,
        }
    }

    /// Back to the top-left origin with no indentation.
    pub fn reset(&mut self) {
        self.position = self.origin;
        self.level = 0;
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn position(&self) -> ScreenPoint {
        self.position
    }

    pub fn indent(&mut self) -> Indented<'_> {
        self.level += 1;
        Indented { cursor: self }
    }

    /// Writes one line at the current indentation and advances.
    pub fn write(&mut self, canvas: &mut dyn Canvas, text: &str) {
        self.write_at(canvas, 0, text);
    }

    /// Writes a report line, indented by its own level on top of the current one.
    pub fn write_line(&mut self, canvas: &mut dyn Canvas, line: &StatusLine) {
        self.write_at(canvas, line.indent, &line.text);
    }

    fn write_at(&mut self, canvas: &mut dyn Canvas, extra: usize, text: &str) {
        let x = self.position.x + (self.level + extra) as i32 * self.indent_width;
        if !text.is_empty() {
            canvas.text(
                ScreenPoint::new(x, self.position.y),
                text,
                self.font_size,
                self.color,
            );
        }
        self.position.y += self.line_height;
    }
}

/// One level of indentation, undone on drop.
pub struct Indented<'c> {
    cursor: &'c mut TextCursor,
}

impl Deref for Indented<'_> {
    type Target = TextCursor;

    fn deref(&self) -> &TextCursor {
        self.cursor
    }
}

impl DerefMut for Indented<'_> {
    fn deref_mut(&mut self) -> &mut TextCursor {
        self.cursor
    }
}

impl Drop for Indented<'_> {
    fn drop(&mut self) {
        self.cursor.level -= 1;
    }
}
