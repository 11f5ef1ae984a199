//! Named attributes exposed by the liveoc device
//!
//! The transport (a sysfs-like file tree, a control socket, a shell) is not
//! part of this crate. It maps each file access to one [`AttributeGroup::show`]
//! or [`AttributeGroup::store`] call, identified by attribute name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::constants::{MODE_READ_ONLY, MODE_READ_WRITE};
use crate::error::{Error, Result};
use crate::store::{ConfigStore, WriteAck};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Overclock intensity, read/write
    OcValue,
    /// Lower band edge in kHz, read/write
    OcTargetLow,
    /// Upper band edge in kHz, read/write
    OcTargetHigh,
    /// Interface revision, read-only
    Version,
}

impl Attribute {
    /// Every attribute of the group, in publication order
    pub const ALL: [Attribute; 4] =
        [Attribute::OcValue, Attribute::OcTargetLow, Attribute::OcTargetHigh, Attribute::Version];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::OcValue => "oc_value",
            Attribute::OcTargetLow => "oc_target_low",
            Attribute::OcTargetHigh => "oc_target_high",
            Attribute::Version => "version",
        }
    }

    /// Unix permission bits the attribute is published with
    pub fn mode(self) -> u32 {
        if self.is_writable() {
            MODE_READ_WRITE
        } else {
            MODE_READ_ONLY
        }
    }

    pub fn is_writable(self) -> bool {
        !matches!(self, Attribute::Version)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| Error::UnknownAttribute(s.to_string()))
    }
}

/// Dispatcher from attribute accesses to the configuration store
#[derive(Debug, Clone)]
pub struct AttributeGroup {
    store: Arc<ConfigStore>,
}

impl AttributeGroup {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    pub fn store_handle(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Renders the current contents of `attr`
    pub fn show(&self, attr: Attribute) -> String {
        match attr {
            Attribute::OcValue => self.store.read_intensity(),
            Attribute::OcTargetLow => self.store.read_low_bound(),
            Attribute::OcTargetHigh => self.store.read_high_bound(),
            Attribute::Version => self.store.read_version(),
        }
    }

    /// Writes `input` to `attr`.
    ///
    /// Semantic rejections are carried in the returned [`WriteAck`]; only a
    /// write to a read-only attribute is an `Err`.
    pub fn store<I: AsRef<[u8]>>(&self, attr: Attribute, input: I) -> Result<WriteAck> {
        match attr {
            Attribute::OcValue => Ok(self.store.write_intensity(input)),
            Attribute::OcTargetLow => Ok(self.store.write_low_bound(input)),
            Attribute::OcTargetHigh => Ok(self.store.write_high_bound(input)),
            Attribute::Version => Err(Error::ReadOnly(attr)),
        }
    }

    pub fn show_by_name(&self, name: &str) -> Result<String> {
        Ok(self.show(name.parse()?))
    }

    pub fn store_by_name<I: AsRef<[u8]>>(&self, name: &str, input: I) -> Result<WriteAck> {
        self.store(name.parse()?, input)
    }
}
