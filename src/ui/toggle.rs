//! Clickable on/off switch with click debounce.

use chrono::{DateTime, Duration, Local};
use tracing::debug;

use crate::mapping::{Rgb, ScreenPoint, ViewportRect};

use super::canvas::Canvas;
use super::common::Palette;

/// Session-owned state of one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleState {
    pub checked: bool,
    /// Time of the last accepted click; `None` until the first one.
    pub last_toggle_time: Option<DateTime<Local>>,
}

/// A checkbox with a label to its right.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleControl {
    pub rect: ViewportRect,
    pub label: String,
    pub min_interval: Duration,
    pub box_color: Rgb,
    pub check_color: Rgb,
    pub label_color: Rgb,
    pub font_size: f32,
}

impl ToggleControl {
    pub fn new(rect: ViewportRect, label: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            rect,
            label: label.into(),
            min_interval,
            box_color: Palette::TOGGLE_BOX,
            check_color: Palette::TOGGLE_CHECK,
            label_color: Palette::TOGGLE_LABEL,
            font_size: 14.0,
        }
    }

    pub fn hit_test(&self, point: ScreenPoint) -> bool {
        self.rect.contains(point)
    }

    /// Debounced toggle.
    ///
    /// Flips `checked` only if `point` hits the box and more than
    /// `min_interval` has passed since `last_click_time`; otherwise both values
    /// pass through unchanged.
    pub fn try_toggle(
        &self,
        checked: bool,
        point: ScreenPoint,
        click_time: DateTime<Local>,
        last_click_time: Option<DateTime<Local>>,
        min_interval: Duration,
    ) -> (bool, Option<DateTime<Local>>) {
        if !self.hit_test(point) {
            return (checked, last_click_time);
        }
        let elapsed_enough = match last_click_time {
            Some(last) => click_time - last > min_interval,
            None => true,
        };
        if elapsed_enough {
            (!checked, Some(click_time))
        } else {
            debug!(
                "Ignoring click on '{}' {}ms after the previous one",
                self.label,
                last_click_time.map_or(0, |last| (click_time - last).num_milliseconds())
            );
            (checked, last_click_time)
        }
    }

    /// Applies a click to `state` with this control's interval. Returns
    /// whether the state flipped.
    pub fn apply_click(
        &self,
        state: &mut ToggleState,
        point: ScreenPoint,
        click_time: DateTime<Local>,
    ) -> bool {
        let before = state.checked;
        let (checked, last) = self.try_toggle(
            state.checked,
            point,
            click_time,
            state.last_toggle_time,
            self.min_interval,
        );
        state.checked = checked;
        state.last_toggle_time = last;
        before != checked
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, state: &ToggleState) {
        canvas.stroke_rect(self.rect, 2.0, self.box_color);
        if state.checked {
            canvas.fill_rect(self.rect.inset(4), self.check_color);
        }
        canvas.text(
            ScreenPoint::new(self.rect.x + self.rect.width + 5, self.rect.y),
            &self.label,
            self.font_size,
            self.label_color,
        );
    }
}
