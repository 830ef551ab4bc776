//! Controller subsystem: device discovery, lifecycle and sample reads
//!
//! 1. [`device`] - capability traits, device metadata and input events
//! 2. [`registry`] - connected devices in connection order
//! 3. [`event_collector`] - gilrs-backed input source
//!
//! # Architecture
//!
//! ```text
//! gilrs ──► GilrsSource ──► InputEvent ──► DeviceRegistry
//!               │
//!               └──► GilrsDevice (live samples, read once per frame)
//! ```

pub mod device;
pub mod event_collector;
pub mod registry;

#[cfg(test)]
pub(crate) mod fake;

pub use device::{
    DeviceIndex, DeviceInfo, HatDirection, InputDevice, InputEvent, InputSource, InstanceId,
    PowerLevel, RumbleError,
};
pub use event_collector::{GilrsDevice, GilrsSource, SourceError};
pub use registry::DeviceRegistry;
