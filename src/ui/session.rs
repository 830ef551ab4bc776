//! Per-session viewer state and frame layout.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::controller::{DeviceRegistry, InputDevice, InputEvent, InputSource};
use crate::mapping::gauge::{LEFT_TRIGGER_AXIS, MIN_TRIGGER_AXES, RIGHT_TRIGGER_AXIS};
use crate::mapping::{ScreenPoint, TriggerGauge, ViewportRect};

use super::canvas::Canvas;
use super::status::{StatusReport, TextCursor};
use super::toggle::{ToggleControl, ToggleState};
use super::widgets;

/// Everything that lives for the whole session: connected devices, the
/// invert-Y switch and the configuration the layout is drawn from.
pub struct ViewerSession {
    config: ViewerConfig,
    registry: DeviceRegistry,
    invert_toggle: ToggleControl,
    invert_state: ToggleState,
    cursor: TextCursor,
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let layout = &config.layout;
        let invert_toggle = ToggleControl::new(
            layout.toggle,
            layout.toggle_label.clone(),
            config.click_interval(),
        );
        let cursor = TextCursor::new(
            layout.text_origin,
            layout.line_height,
            layout.indent_width,
            layout.font_size,
            layout.text_color,
        );

        Self {
            registry: DeviceRegistry::new(),
            invert_toggle,
            invert_state: ToggleState::default(),
            cursor,
            config,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn invert_y(&self) -> bool {
        self.invert_state.checked
    }

    pub fn handle_event<S: InputSource>(&mut self, source: &mut S, event: InputEvent) {
        match event {
            InputEvent::Connected { index } => {
                self.registry.on_connect(source, index);
            }
            InputEvent::Disconnected { id } => {
                self.registry.on_disconnect(id);
            }
            InputEvent::ButtonDown { id, button } => {
                info!("Joystick {} button {} pressed", id, button);
                if button != self.config.input.rumble_button || !self.registry.contains(id) {
                    return;
                }
                let input = &self.config.input;
                match source.rumble(id, input.rumble_strength, input.rumble_duration_ms) {
                    Ok(()) => info!("Rumble effect played on joystick {}", id),
                    Err(e) => warn!("Rumble failed: {}", e),
                }
            }
            InputEvent::ButtonUp { id, button } => {
                info!("Joystick {} button {} released", id, button);
            }
        }
    }

    /// Drains and dispatches everything the source has queued.
    pub fn pump<S: InputSource>(&mut self, source: &mut S) {
        for event in source.poll_events() {
            self.handle_event(source, event);
        }
    }

    /// Routes a primary-button click to the invert-Y toggle.
    pub fn handle_click(&mut self, point: ScreenPoint, time: DateTime<Local>) {
        if self
            .invert_toggle
            .apply_click(&mut self.invert_state, point, time)
        {
            info!("Invert Y axis: {}", self.invert_state.checked);
        }
    }

    /// Lays out one frame. Devices are drawn in connection order and each one
    /// is finished before the next starts.
    pub fn render_frame<S: InputSource>(&mut self, source: &S, canvas: &mut dyn Canvas) {
        let layout = &self.config.layout;
        canvas.fill_rect(
            ViewportRect::new(
                0,
                0,
                self.config.window.width as i32,
                self.config.window.height as i32,
            ),
            layout.background,
        );
        widgets::draw_panel(
            canvas,
            layout.panel,
            layout.panel_border,
            layout.panel_border_color,
            layout.panel_fill,
        );

        self.cursor.reset();
        self.cursor.write(
            canvas,
            &format!("Number of joysticks connected: {}", self.registry.len()),
        );

        let mut cursor = self.cursor.indent();
        for info in self.registry.enumerate() {
            let Some(device) = source.device(info.instance_id) else {
                debug!("Joystick {} is registered but unavailable this frame", info.instance_id);
                continue;
            };
            draw_device(
                &self.config,
                &self.invert_toggle,
                &self.invert_state,
                &device,
                canvas,
            );
            for line in StatusReport::new(&device).lines() {
                cursor.write_line(canvas, &line);
            }
        }
    }
}

fn draw_device<D: InputDevice>(
    config: &ViewerConfig,
    toggle: &ToggleControl,
    toggle_state: &ToggleState,
    device: &D,
    canvas: &mut dyn Canvas,
) {
    let layout = &config.layout;
    let invert = toggle_state.checked;

    widgets::draw_button_row(
        canvas,
        (0..device.button_count()).map(|i| device.button(i)),
        layout.checkbox_origin,
        layout.checkbox_size,
        layout.checkbox_spacing,
    );

    let axis_count = device.axis_count();
    if axis_count >= MIN_TRIGGER_AXES {
        let left = gauge_at(config, layout.gauge_origin);
        let right = gauge_at(config, layout.gauge_origin.offset(layout.gauge_spacing, 0));
        widgets::draw_gauge(canvas, &left, device.axis(LEFT_TRIGGER_AXIS), invert);
        widgets::draw_gauge(canvas, &right, device.axis(RIGHT_TRIGGER_AXIS), invert);
    }

    toggle.draw(canvas, toggle_state);

    let stick = ViewportRect::new(
        layout.stick_origin.x,
        layout.stick_origin.y,
        layout.stick_size,
        layout.stick_size,
    );
    if axis_count > 1 {
        widgets::draw_stick(canvas, device.axis(0), device.axis(1), stick, invert);
    }
    if axis_count > 3 {
        let right = stick.translated(layout.stick_spacing, 0);
        widgets::draw_stick(canvas, device.axis(2), device.axis(3), right, invert);
    }
}

fn gauge_at(config: &ViewerConfig, origin: ScreenPoint) -> TriggerGauge {
    TriggerGauge {
        origin,
        radius: config.gauge.radius,
        steps: config.gauge.steps,
        thickness: config.gauge.thickness,
        rest: config.gauge.rest_color,
        active: config.gauge.active_color,
    }
}
