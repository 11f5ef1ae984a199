//! Device registration and lifecycle
//!
//! Start-up registers a `liveoc` device node and publishes the attribute
//! group under it. Failing to register the node aborts start-up; failing to
//! publish the attributes is logged and tolerated, leaving a device whose
//! attributes are unreachable from outside.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use live_oc::config::Settings;
//! use live_oc::device::{LiveOcDevice, LocalRegistry};
//! use live_oc::policy::LoggingPolicy;
//!
//! fn main() -> live_oc::Result<()> {
//!     let registry = LocalRegistry::default();
//!     let device = LiveOcDevice::init(&registry, &Settings::default(), Arc::new(LoggingPolicy))?;
//!     assert!(device.attributes_published());
//!     assert_eq!(device.attributes().show_by_name("oc_value")?, "100\n");
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{error, info};

use crate::attributes::{Attribute, AttributeGroup};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::policy::PolicySink;
use crate::store::ConfigStore;

#[cfg(test)]
use mockall::automock;

/// Handle to a registered device node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub name: String,
    /// Dynamically assigned minor number
    pub minor: u32,
}

/// Mechanism that makes the device discoverable
#[cfg_attr(test, automock)]
pub trait DeviceRegistry: Send + Sync {
    fn register_device(&self, name: &str) -> Result<DeviceHandle>;

    fn publish_group(&self, device: &DeviceHandle, attrs: &[Attribute]) -> Result<()>;
}

/// In-process registry keeping track of device nodes and their attributes.
///
/// Names are unique; registering a name twice fails.
#[derive(Debug, Default)]
pub struct LocalRegistry {
    devices: Mutex<HashMap<String, Vec<Attribute>>>,
}

impl LocalRegistry {
    pub fn is_registered(&self, name: &str) -> bool {
        self.devices.lock().contains_key(name)
    }

    /// Attributes published under `name`, empty if none were published
    pub fn published(&self, name: &str) -> Vec<Attribute> {
        self.devices.lock().get(name).cloned().unwrap_or_default()
    }
}

impl DeviceRegistry for LocalRegistry {
    fn register_device(&self, name: &str) -> Result<DeviceHandle> {
        let mut devices = self.devices.lock();
        if devices.contains_key(name) {
            return Err(Error::registration(format!("device name {name} is busy")));
        }
        let minor = next_minor(devices.len())?;
        devices.insert(name.to_string(), Vec::new());
        Ok(DeviceHandle { name: name.to_string(), minor })
    }

    fn publish_group(&self, device: &DeviceHandle, attrs: &[Attribute]) -> Result<()> {
        let mut devices = self.devices.lock();
        let published = devices
            .get_mut(&device.name)
            .ok_or_else(|| Error::Publish(format!("device {} is not registered", device.name)))?;
        published.extend_from_slice(attrs);
        Ok(())
    }
}

fn next_minor(registered: usize) -> Result<u32> {
    u32::try_from(registered).map_err(|_| Error::registration("no free minor numbers"))
}

static INSTANCE: OnceCell<LiveOcDevice> = OnceCell::new();

/// A started liveoc device
#[derive(Debug)]
pub struct LiveOcDevice {
    handle: DeviceHandle,
    attributes: AttributeGroup,
    attributes_published: bool,
}

impl LiveOcDevice {
    /// Registers the device node and publishes its attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid settings and
    /// [`Error::Registration`] when the node cannot be registered. A failed
    /// attribute publication is not an error.
    pub fn init(registry: &dyn DeviceRegistry, settings: &Settings, policy: Arc<dyn PolicySink>) -> Result<Self> {
        settings.validate()?;
        let name = settings.device_name.as_str();

        info!("liveoc_init register_device({})", name);
        let handle = registry.register_device(name).map_err(|e| {
            error!("liveoc_init register_device({}) fail: {}", name, e);
            match e {
                Error::Registration(_) => e,
                other => Error::registration(format!("{name}: {other}")),
            }
        })?;

        let attributes_published = match registry.publish_group(&handle, &Attribute::ALL) {
            Ok(()) => true,
            Err(e) => {
                error!("liveoc_init publish_group fail: {}", e);
                error!("Failed to create attribute group for device ({})!", name);
                false
            },
        };

        let store = Arc::new(ConfigStore::new(policy));
        Ok(Self { handle, attributes: AttributeGroup::new(store), attributes_published })
    }

    /// Starts the process-wide device once; later calls return the first
    /// instance and ignore their arguments.
    pub fn initcall(
        registry: &dyn DeviceRegistry,
        settings: &Settings,
        policy: Arc<dyn PolicySink>,
    ) -> Result<&'static LiveOcDevice> {
        INSTANCE.get_or_try_init(|| Self::init(registry, settings, policy))
    }

    /// The process-wide device, if [`initcall`](Self::initcall) succeeded
    pub fn global() -> Option<&'static LiveOcDevice> {
        INSTANCE.get()
    }

    pub fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    pub fn attributes(&self) -> &AttributeGroup {
        &self.attributes
    }

    pub fn attributes_published(&self) -> bool {
        self.attributes_published
    }
}
