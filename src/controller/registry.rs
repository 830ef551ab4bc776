//! Connected-device bookkeeping keyed by instance id.

use tracing::{debug, info, warn};

use super::device::{DeviceIndex, DeviceInfo, InputSource, InstanceId};

/// Devices in connection order. Display code iterates this every frame, so the
/// order is what keeps the layout stable while pads come and go.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceRegistry {
    devices: Vec<DeviceInfo>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the device at `index` and records its metadata.
    ///
    /// A second connect for an id already present replaces the entry in place.
    /// Returns `None` if the source can no longer open the device.
    pub fn on_connect<S: InputSource>(
        &mut self,
        source: &S,
        index: DeviceIndex,
    ) -> Option<DeviceInfo> {
        let Some(device) = source.open(index) else {
            warn!("Device at index {} vanished before it could be opened", index);
            return None;
        };
        let info = DeviceInfo::capture(&device);

        match self
            .devices
            .iter_mut()
            .find(|known| known.instance_id == info.instance_id)
        {
            Some(existing) => {
                debug!("Replacing metadata for already connected device {}", info.instance_id);
                *existing = info.clone();
            }
            None => self.devices.push(info.clone()),
        }

        info!(
            "Joystick {} connected: {} (axes: {}, buttons: {}, hats: {})",
            info.instance_id, info.name, info.axis_count, info.button_count, info.hat_count
        );
        Some(info)
    }

    /// Forgets a device. Unknown ids are ignored: removal events can race
    /// with teardown and arrive late or twice.
    pub fn on_disconnect(&mut self, id: InstanceId) -> Option<DeviceInfo> {
        match self.devices.iter().position(|known| known.instance_id == id) {
            Some(position) => {
                let removed = self.devices.remove(position);
                info!("Joystick {} disconnected", id);
                Some(removed)
            }
            None => {
                debug!("Ignoring disconnect for unknown device {}", id);
                None
            }
        }
    }

    pub fn enumerate(&self) -> impl Iterator<Item = &DeviceInfo> {
        self.devices.iter()
    }

    pub fn get(&self, id: InstanceId) -> Option<&DeviceInfo> {
        self.devices.iter().find(|known| known.instance_id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::{FakeDevice, FakeSource};

    fn source() -> FakeSource {
        FakeSource::default()
            .with_device(FakeDevice::new(3, "Alpha").with_axes(&[0.0; 6]).with_buttons(10))
            .with_device(FakeDevice::new(1, "Beta").with_axes(&[0.0; 2]))
            .with_device(FakeDevice::new(8, "Gamma"))
    }

    fn ids(registry: &DeviceRegistry) -> Vec<usize> {
        registry.enumerate().map(|d| d.instance_id.0).collect()
    }

    #[test]
    fn enumerate_keeps_connection_order() {
        let source = source();
        let mut registry = DeviceRegistry::new();
        for index in [8, 3, 1] {
            registry.on_connect(&source, DeviceIndex(index));
        }
        assert_eq!(ids(&registry), vec![8, 3, 1]);
    }

    #[test]
    fn unknown_disconnect_is_a_no_op() {
        let source = source();
        let mut registry = DeviceRegistry::new();
        registry.on_connect(&source, DeviceIndex(3));
        let before = registry.clone();

        assert!(registry.on_disconnect(InstanceId(42)).is_none());
        assert_eq!(registry, before);

        let mut empty = DeviceRegistry::new();
        assert!(empty.on_disconnect(InstanceId(0)).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn connect_then_disconnect_restores_previous_state() {
        let source = source();
        let mut registry = DeviceRegistry::new();
        registry.on_connect(&source, DeviceIndex(3));
        registry.on_connect(&source, DeviceIndex(8));
        let before: Vec<DeviceInfo> = registry.enumerate().cloned().collect();

        registry.on_connect(&source, DeviceIndex(1));
        registry.on_disconnect(InstanceId(1));

        let after: Vec<DeviceInfo> = registry.enumerate().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn duplicate_connect_overwrites_in_place() {
        let mut source = source();
        let mut registry = DeviceRegistry::new();
        registry.on_connect(&source, DeviceIndex(3));
        registry.on_connect(&source, DeviceIndex(1));

        source.devices[0].name = "Alpha (rev 2)".to_string();
        registry.on_connect(&source, DeviceIndex(3));

        assert_eq!(ids(&registry), vec![3, 1]);
        assert_eq!(
            registry.get(InstanceId(3)).map(|d| d.name.as_str()),
            Some("Alpha (rev 2)")
        );
    }

    #[test]
    fn connect_captures_metadata_once() {
        let source = source();
        let mut registry = DeviceRegistry::new();
        let info = registry.on_connect(&source, DeviceIndex(3));
        assert_eq!(info.as_ref().map(|d| d.axis_count), Some(6));
        assert_eq!(info.as_ref().map(|d| d.button_count), Some(10));
        assert!(registry.contains(InstanceId(3)));
    }

    #[test]
    fn vanished_device_is_not_registered() {
        let source = source();
        let mut registry = DeviceRegistry::new();
        assert!(registry.on_connect(&source, DeviceIndex(99)).is_none());
        assert_eq!(registry.len(), 0);
    }
}
