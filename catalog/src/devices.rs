//! Launchables for attached devices.
//!
//! Device enumeration is platform plumbing; this module only adapts a
//! [`DeviceSource`] to the provider contract.

use std::sync::Arc;

use azimuth_launchable::Launchable;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::notifier::{ChangeNotifier, ChangeSubscription};
use crate::provider::LaunchableProvider;

const NAME: &str = "devices";

/// A device as reported by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Human readable name.
    pub name: String,

    /// Platform device path, opened on launch.
    pub path: String,
}

impl DeviceInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Enumerates devices.
pub trait DeviceSource: Send + Sync {
    /// Whether the device layer is usable.
    fn is_available(&self) -> bool {
        true
    }

    /// Currently attached devices.
    fn devices(&self) -> Result<Vec<DeviceInfo>>;
}

/// A device source backed by a list the caller maintains.
#[derive(Debug, Default)]
pub struct StaticDeviceSource {
    devices: RwLock<Vec<DeviceInfo>>,
}

impl StaticDeviceSource {
    pub fn new(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices: RwLock::new(devices),
        }
    }

    /// Replace the device list.
    pub fn set(&self, devices: Vec<DeviceInfo>) {
        *self.devices.write() = devices;
    }
}

impl DeviceSource for StaticDeviceSource {
    fn devices(&self) -> Result<Vec<DeviceInfo>> {
        Ok(self.devices.read().clone())
    }
}

/// Adapts a [`DeviceSource`] to [`LaunchableProvider`].
pub struct DeviceProvider {
    source: Arc<dyn DeviceSource>,
    notifier: ChangeNotifier,
}

impl DeviceProvider {
    pub fn new(source: Arc<dyn DeviceSource>) -> Self {
        Self {
            source,
            notifier: ChangeNotifier::new(NAME),
        }
    }

    /// Signal that devices were attached or removed.
    pub fn device_changed(&self) -> bool {
        self.notifier.notify()
    }
}

impl LaunchableProvider for DeviceProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        self.source.is_available()
    }

    fn launchables(&self) -> Vec<Launchable> {
        match self.source.devices() {
            Ok(devices) => devices
                .into_iter()
                .map(|d| Launchable::device(d.name, d.path))
                .collect(),
            Err(e) => {
                warn!("Device enumeration failed: {e}");
                Vec::new()
            }
        }
    }

    fn subscribe(&self) -> ChangeSubscription {
        self.notifier.subscribe()
    }
}
