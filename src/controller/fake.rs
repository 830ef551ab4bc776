//! In-memory input backend for tests.

use std::collections::VecDeque;

use super::device::{
    DeviceIndex, HatDirection, InputDevice, InputEvent, InputSource, InstanceId, PowerLevel,
    RumbleError,
};

#[derive(Debug, Clone, Default)]
pub struct FakeDevice {
    pub id: usize,
    pub name: String,
    pub guid: String,
    pub power: PowerLevel,
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
    pub hats: Vec<HatDirection>,
}

impl FakeDevice {
    pub fn new(id: usize, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            guid: format!("{id:032x}"),
            ..Default::default()
        }
    }

    pub fn with_axes(mut self, axes: &[f32]) -> Self {
        self.axes = axes.to_vec();
        self
    }

    pub fn with_buttons(mut self, count: usize) -> Self {
        self.buttons = vec![false; count];
        self
    }

    pub fn with_hats(mut self, hats: &[HatDirection]) -> Self {
        self.hats = hats.to_vec();
        self
    }

    pub fn press(mut self, button: usize) -> Self {
        if let Some(state) = self.buttons.get_mut(button) {
            *state = true;
        }
        self
    }
}

impl InputDevice for FakeDevice {
    fn instance_id(&self) -> InstanceId {
        InstanceId(self.id)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn guid(&self) -> String {
        self.guid.clone()
    }
    fn power_level(&self) -> PowerLevel {
        self.power
    }
    fn axis_count(&self) -> usize {
        self.axes.len()
    }
    fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
    fn button_count(&self) -> usize {
        self.buttons.len()
    }
    fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
    fn hat_count(&self) -> usize {
        self.hats.len()
    }
    fn hat(&self, index: usize) -> HatDirection {
        self.hats.get(index).copied().unwrap_or(HatDirection::CENTERED)
    }
}

/// Devices are opened by `DeviceIndex(id)`. Editing `devices` directly skips
/// the event queue, which models a backend that dropped a pad before telling
/// anyone.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub devices: Vec<FakeDevice>,
    pub pending: VecDeque<InputEvent>,
    pub rumbles: Vec<(InstanceId, f32, u32)>,
    pub reject_rumble: bool,
}

impl FakeSource {
    pub fn with_device(mut self, device: FakeDevice) -> Self {
        self.devices.push(device);
        self
    }

    pub fn plug(&mut self, device: FakeDevice) {
        self.pending.push_back(InputEvent::Connected {
            index: DeviceIndex(device.id),
        });
        self.devices.push(device);
    }

    pub fn unplug(&mut self, id: usize) {
        self.devices.retain(|d| d.id != id);
        self.pending
            .push_back(InputEvent::Disconnected { id: InstanceId(id) });
    }
}

impl InputSource for FakeSource {
    type Device<'a> = &'a FakeDevice;

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    fn open(&self, index: DeviceIndex) -> Option<Self::Device<'_>> {
        self.devices.iter().find(|d| d.id == index.0)
    }

    fn device(&self, id: InstanceId) -> Option<Self::Device<'_>> {
        self.devices.iter().find(|d| d.id == id.0)
    }

    fn rumble(&mut self, id: InstanceId, strength: f32, duration_ms: u32) -> Result<(), RumbleError> {
        if self.device(id).is_none() {
            return Err(RumbleError::UnknownDevice(id));
        }
        if self.reject_rumble {
            return Err(RumbleError::Rejected {
                id,
                reason: "effect slot busy".to_string(),
            });
        }
        self.rumbles.push((id, strength, duration_ms));
        Ok(())
    }
}
