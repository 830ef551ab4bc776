//! Device capability interface and the events an input backend delivers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the input subsystem assigns to a device for the lifetime of
/// its connection. Removal and button events are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-specific slot a newly connected device can be opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIndex(pub usize);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Battery state as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevel {
    #[default]
    Unknown,
    Empty,
    Low,
    Medium,
    High,
    Full,
    Wired,
    Max,
}

impl PowerLevel {
    /// Buckets a charge percentage.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            0..=5 => PowerLevel::Empty,
            6..=20 => PowerLevel::Low,
            21..=70 => PowerLevel::Medium,
            71..=99 => PowerLevel::High,
            _ => PowerLevel::Full,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerLevel::Unknown => "unknown",
            PowerLevel::Empty => "empty",
            PowerLevel::Low => "low",
            PowerLevel::Medium => "medium",
            PowerLevel::High => "high",
            PowerLevel::Full => "full",
            PowerLevel::Wired => "wired",
            PowerLevel::Max => "max",
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete d-pad position, each component in {-1, 0, 1}. `y = 1` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HatDirection {
    pub x: i8,
    pub y: i8,
}

impl HatDirection {
    pub const CENTERED: HatDirection = HatDirection { x: 0, y: 0 };

    pub fn new(x: i8, y: i8) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// Builds a direction from the four d-pad switches; opposite switches cancel.
    pub fn from_switches(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self::new(right as i8 - left as i8, up as i8 - down as i8)
    }
}

impl fmt::Display for HatDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Lifecycle and button events, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Connected { index: DeviceIndex },
    Disconnected { id: InstanceId },
    ButtonDown { id: InstanceId, button: usize },
    ButtonUp { id: InstanceId, button: usize },
}

/// Live view of one connected device.
///
/// Counts and samples are read on demand; implementations must not cache
/// samples across frames. Reads past the reported counts return the neutral
/// value (0.0, released, centered) rather than panicking.
pub trait InputDevice {
    fn instance_id(&self) -> InstanceId;
    fn name(&self) -> &str;
    fn guid(&self) -> String;
    fn power_level(&self) -> PowerLevel;

    fn axis_count(&self) -> usize;
    fn axis(&self, index: usize) -> f32;

    fn button_count(&self) -> usize;
    fn button(&self, index: usize) -> bool;

    fn hat_count(&self) -> usize;
    fn hat(&self, index: usize) -> HatDirection;
}

impl<D: InputDevice + ?Sized> InputDevice for &D {
    fn instance_id(&self) -> InstanceId {
        (**self).instance_id()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
    fn guid(&self) -> String {
        (**self).guid()
    }
    fn power_level(&self) -> PowerLevel {
        (**self).power_level()
    }
    fn axis_count(&self) -> usize {
        (**self).axis_count()
    }
    fn axis(&self, index: usize) -> f32 {
        (**self).axis(index)
    }
    fn button_count(&self) -> usize {
        (**self).button_count()
    }
    fn button(&self, index: usize) -> bool {
        (**self).button(index)
    }
    fn hat_count(&self) -> usize {
        (**self).hat_count()
    }
    fn hat(&self, index: usize) -> HatDirection {
        (**self).hat(index)
    }
}

/// Haptic command failures. Never fatal; the caller logs and moves on.
#[derive(Debug, thiserror::Error)]
pub enum RumbleError {
    #[error("Device {0} is not connected")]
    UnknownDevice(InstanceId),

    #[error("Device {0} does not support force feedback")]
    Unsupported(InstanceId),

    #[error("Device {id} rejected the rumble effect: {reason}")]
    Rejected { id: InstanceId, reason: String },
}

/// The platform input subsystem as seen by the viewer.
pub trait InputSource {
    type Device<'a>: InputDevice
    where
        Self: 'a;

    /// Drains every event that arrived since the previous call.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Opens the device announced by a `Connected` event.
    fn open(&self, index: DeviceIndex) -> Option<Self::Device<'_>>;

    /// Looks up a connected device by instance id.
    fn device(&self, id: InstanceId) -> Option<Self::Device<'_>>;

    /// Fire-and-forget vibration; `strength` in [0, 1].
    fn rumble(&mut self, id: InstanceId, strength: f32, duration_ms: u32) -> Result<(), RumbleError>;
}

/// Identity and capabilities captured once when a device connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub instance_id: InstanceId,
    pub name: String,
    pub guid: String,
    pub power_level: PowerLevel,
    pub axis_count: usize,
    pub button_count: usize,
    pub hat_count: usize,
}

impl DeviceInfo {
    pub fn capture<D: InputDevice>(device: &D) -> Self {
        Self {
            instance_id: device.instance_id(),
            name: device.name().to_string(),
            guid: device.guid(),
            power_level: device.power_level(),
            axis_count: device.axis_count(),
            button_count: device.button_count(),
            hat_count: device.hat_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeDevice;

    #[test]
    fn power_percent_buckets() {
        assert_eq!(PowerLevel::from_percent(0), PowerLevel::Empty);
        assert_eq!(PowerLevel::from_percent(20), PowerLevel::Low);
        assert_eq!(PowerLevel::from_percent(50), PowerLevel::Medium);
        assert_eq!(PowerLevel::from_percent(90), PowerLevel::High);
        assert_eq!(PowerLevel::from_percent(100), PowerLevel::Full);
        assert_eq!(PowerLevel::Wired.to_string(), "wired");
    }

    #[test]
    fn opposite_switches_cancel() {
        assert_eq!(
            HatDirection::from_switches(true, true, false, true),
            HatDirection::new(1, 0)
        );
        assert_eq!(
            HatDirection::from_switches(false, true, true, false).to_string(),
            "(-1, -1)"
        );
    }

    #[test]
    fn capture_copies_identity_and_counts() {
        let device = FakeDevice::new(7, "Pad").with_axes(&[0.0; 6]).with_buttons(10);
        let info = DeviceInfo::capture(&device);
        assert_eq!(info.instance_id, InstanceId(7));
        assert_eq!(info.name, "Pad");
        assert_eq!(info.axis_count, 6);
        assert_eq!(info.button_count, 10);
        assert_eq!(info.hat_count, 0);
    }
}
