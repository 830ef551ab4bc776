use std::collections::{HashMap, VecDeque};

use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Repeat, Replay, Ticks};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs, PowerInfo};
use tracing::{debug, error, info, warn};

use super::device::{
    DeviceIndex, HatDirection, InputDevice, InputEvent, InputSource, InstanceId, PowerLevel,
    RumbleError,
};

// Where an axis index reads its value from
#[derive(Debug, Clone, Copy)]
enum AxisSource {
    // Stick axis; `flip` turns gilrs' up-positive Y into screen-down-positive
    Stick { axis: Axis, flip: bool },
    // Analog trigger, read from the pressure button first, then the Z axis
    Trigger { button: Button, axis: Axis },
}

const AXIS_LAYOUT: [AxisSource; 6] = [
    AxisSource::Stick {
        axis: Axis::LeftStickX,
        flip: false,
    },
    AxisSource::Stick {
        axis: Axis::LeftStickY,
        flip: true,
    },
    AxisSource::Stick {
        axis: Axis::RightStickX,
        flip: false,
    },
    AxisSource::Stick {
        axis: Axis::RightStickY,
        flip: true,
    },
    AxisSource::Trigger {
        button: Button::LeftTrigger2,
        axis: Axis::LeftZ,
    },
    AxisSource::Trigger {
        button: Button::RightTrigger2,
        axis: Axis::RightZ,
    },
];

// Face buttons first, then menu buttons, thumbs and bumpers.
// D-pad buttons are reported through hat 0, analog triggers through axes 4/5.
const BUTTON_LAYOUT: [Button; 13] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::Select,
    Button::Mode,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::C,
    Button::Z,
];

const DPAD_BUTTONS: [Button; 4] = [
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

// Collector errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to initialize gilrs: {0}")]
    InitializationError(String),
}

/// Input source bound to gilrs.
///
/// gilrs ids are never reused, so the id doubles as both the device index of a
/// `Connected` event and the instance id of everything after it.
pub struct GilrsSource {
    gilrs: Gilrs,

    // Pads present at startup, announced on the first poll
    pending: VecDeque<InputEvent>,

    // Running rumble effects; dropping an effect stops it
    effects: HashMap<GamepadId, Effect>,
}

impl GilrsSource {
    pub fn new() -> Result<Self, SourceError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(SourceError::InitializationError(e.to_string()));
            }
        };

        let pending: VecDeque<InputEvent> = gilrs
            .gamepads()
            .map(|(id, gamepad)| {
                info!("Found gamepad at startup: {} ({})", gamepad.name(), id);
                InputEvent::Connected {
                    index: DeviceIndex(usize::from(id)),
                }
            })
            .collect();

        if pending.is_empty() {
            warn!("No gamepad connected, waiting for hotplug");
        }

        Ok(Self {
            gilrs,
            pending,
            effects: HashMap::new(),
        })
    }

    fn gamepad_id(&self, raw: usize) -> Option<GamepadId> {
        self.gilrs
            .gamepads()
            .map(|(id, _)| id)
            .find(|id| usize::from(*id) == raw)
    }

    fn wrap(&self, raw: usize) -> Option<GilrsDevice<'_>> {
        let id = self.gamepad_id(raw)?;
        self.gilrs.connected_gamepad(id).map(|gamepad| GilrsDevice {
            id: InstanceId(raw),
            gamepad,
        })
    }

    // Convert gilrs event to internal event type
    fn convert_gilrs_event(&mut self, id: GamepadId, event: EventType) -> Option<InputEvent> {
        let instance = InstanceId(usize::from(id));

        match event {
            EventType::Connected => {
                info!("Controller connected event detected for {}", id);
                Some(InputEvent::Connected {
                    index: DeviceIndex(usize::from(id)),
                })
            }
            EventType::Disconnected => {
                warn!("Controller disconnected event detected for {}", id);
                self.effects.remove(&id);
                Some(InputEvent::Disconnected { id: instance })
            }
            EventType::ButtonPressed(button, _) => {
                let index = self.button_index(id, button)?;
                Some(InputEvent::ButtonDown {
                    id: instance,
                    button: index,
                })
            }
            EventType::ButtonReleased(button, _) => {
                let index = self.button_index(id, button)?;
                Some(InputEvent::ButtonUp {
                    id: instance,
                    button: index,
                })
            }
            _ => {
                debug!("Unhandled event type: {:?}", event);
                None
            }
        }
    }

    fn button_index(&self, id: GamepadId, button: Button) -> Option<usize> {
        let gamepad = self.gilrs.connected_gamepad(id)?;
        let index = present_buttons(&gamepad).iter().position(|b| *b == button);
        if index.is_none() {
            debug!("Button {:?} is not part of the reported layout", button);
        }
        index
    }
}

impl InputSource for GilrsSource {
    type Device<'a> = GilrsDevice<'a>;

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self.pending.drain(..).collect();

        while let Some(Event { id, event, time, .. }) = self.gilrs.next_event() {
            debug!("Processing gilrs event: {:?} at time: {:?}", event, time);
            if let Some(converted) = self.convert_gilrs_event(id, event) {
                events.push(converted);
            }
        }
        events
    }

    fn open(&self, index: DeviceIndex) -> Option<Self::Device<'_>> {
        self.wrap(index.0)
    }

    fn device(&self, id: InstanceId) -> Option<Self::Device<'_>> {
        self.wrap(id.0)
    }

    fn rumble(&mut self, id: InstanceId, strength: f32, duration_ms: u32) -> Result<(), RumbleError> {
        let gamepad_id = self.gamepad_id(id.0).ok_or(RumbleError::UnknownDevice(id))?;
        let supported = self
            .gilrs
            .connected_gamepad(gamepad_id)
            .is_some_and(|gamepad| gamepad.is_ff_supported());
        if !supported {
            return Err(RumbleError::Unsupported(id));
        }

        let magnitude = (strength.clamp(0.0, 1.0) * f32::from(u16::MAX)) as u16;
        let duration = Ticks::from_ms(duration_ms);
        let effect = EffectBuilder::new()
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong { magnitude },
                scheduling: Replay {
                    play_for: duration,
                    ..Default::default()
                },
                envelope: Default::default(),
            })
            .repeat(Repeat::For(duration))
            .gamepads(&[gamepad_id])
            .finish(&mut self.gilrs)
            .map_err(|e| RumbleError::Rejected {
                id,
                reason: e.to_string(),
            })?;

        effect.play().map_err(|e| RumbleError::Rejected {
            id,
            reason: e.to_string(),
        })?;

        // Replacing the previous effect stops it
        self.effects.insert(gamepad_id, effect);
        Ok(())
    }
}

/// One connected gilrs gamepad, borrowed for the current frame.
pub struct GilrsDevice<'a> {
    id: InstanceId,
    gamepad: Gamepad<'a>,
}

impl GilrsDevice<'_> {
    fn present_axes(&self) -> Vec<AxisSource> {
        AXIS_LAYOUT
            .into_iter()
            .filter(|source| match *source {
                AxisSource::Stick { axis, .. } => self.gamepad.axis_code(axis).is_some(),
                AxisSource::Trigger { button, axis } => {
                    self.gamepad.button_code(button).is_some()
                        || self.gamepad.axis_code(axis).is_some()
                }
            })
            .collect()
    }

    fn read_axis(&self, source: AxisSource) -> f32 {
        match source {
            AxisSource::Stick { axis, flip } => {
                let value = self.gamepad.value(axis);
                if flip {
                    -value
                } else {
                    value
                }
            }
            AxisSource::Trigger { button, axis } => match self.gamepad.button_data(button) {
                // Pressure buttons report 0..1; triggers rest at -1
                Some(data) => data.value() * 2.0 - 1.0,
                None if self.gamepad.button_code(button).is_some() => -1.0,
                None => self.gamepad.value(axis),
            },
        }
    }

    fn has_dpad(&self) -> bool {
        DPAD_BUTTONS
            .iter()
            .any(|b| self.gamepad.button_code(*b).is_some())
            || self.gamepad.axis_code(Axis::DPadX).is_some()
    }
}

fn present_buttons(gamepad: &Gamepad<'_>) -> Vec<Button> {
    BUTTON_LAYOUT
        .into_iter()
        .filter(|b| gamepad.button_code(*b).is_some())
        .collect()
}

impl InputDevice for GilrsDevice<'_> {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn name(&self) -> &str {
        self.gamepad.name()
    }

    fn guid(&self) -> String {
        self.gamepad
            .uuid()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }

    fn power_level(&self) -> PowerLevel {
        match self.gamepad.power_info() {
            PowerInfo::Wired => PowerLevel::Wired,
            PowerInfo::Charged => PowerLevel::Full,
            PowerInfo::Discharging(percent) | PowerInfo::Charging(percent) => {
                PowerLevel::from_percent(percent)
            }
            _ => PowerLevel::Unknown,
        }
    }

    fn axis_count(&self) -> usize {
        self.present_axes().len()
    }

    fn axis(&self, index: usize) -> f32 {
        self.present_axes()
            .get(index)
            .map(|source| self.read_axis(*source))
            .unwrap_or(0.0)
    }

    fn button_count(&self) -> usize {
        present_buttons(&self.gamepad).len()
    }

    fn button(&self, index: usize) -> bool {
        present_buttons(&self.gamepad)
            .get(index)
            .is_some_and(|b| self.gamepad.is_pressed(*b))
    }

    fn hat_count(&self) -> usize {
        usize::from(self.has_dpad())
    }

    fn hat(&self, index: usize) -> HatDirection {
        if index != 0 || !self.has_dpad() {
            return HatDirection::CENTERED;
        }
        let pressed = |b: Button| self.gamepad.is_pressed(b);
        let from_buttons = HatDirection::from_switches(
            pressed(Button::DPadUp),
            pressed(Button::DPadDown),
            pressed(Button::DPadLeft),
            pressed(Button::DPadRight),
        );
        if from_buttons != HatDirection::CENTERED {
            return from_buttons;
        }
        // Pads exposing the d-pad only as a hat axis
        let sign = |v: f32| {
            if v > 0.5 {
                1
            } else if v < -0.5 {
                -1
            } else {
                0
            }
        };
        HatDirection::new(
            sign(self.gamepad.value(Axis::DPadX)),
            sign(self.gamepad.value(Axis::DPadY)),
        )
    }
}
