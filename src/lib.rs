//! live-oc - runtime-tunable CPU overclock parameters
//!
//! This crate holds the three parameters of a CPU frequency-scaling
//! overclock policy and exposes them as named attributes that an outside
//! transport can read and write. Accepted changes are forwarded to the
//! frequency-scaling subsystem through a single callback.
//!
//! # Attributes
//!
//! - **`oc_value`**: overclock intensity, 100 (none) to 150, read/write
//! - **`oc_target_low`**: lower edge of the affected band in kHz, read/write
//! - **`oc_target_high`**: upper edge of the affected band in kHz, read/write
//! - **`version`**: interface revision, always `1`, read-only
//!
//! Every value is rendered as an unsigned decimal followed by a newline.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use live_oc::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let policy = FnPolicy::new(|value, low, high| {
//!         println!("apply {value} to {low}..={high} kHz");
//!     });
//!     let registry = LocalRegistry::default();
//!     let device = LiveOcDevice::init(&registry, &Settings::default(), Arc::new(policy))?;
//!
//!     let attrs = device.attributes();
//!     let ack = attrs.store(Attribute::OcValue, "120\n")?;
//!     assert!(ack.is_applied());
//!     assert_eq!(attrs.show(Attribute::OcValue), "120\n");
//!
//!     // Rejected values still consume the whole write.
//!     let ack = attrs.store(Attribute::OcValue, "200\n")?;
//!     assert_eq!(ack.consumed, 4);
//!     assert!(ack.is_rejected());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Writes never fail because of their content. A malformed or out-of-range
//! value is logged and reported through [`store::WriteOutcome`], while the
//! write itself reports the full input as consumed. [`Error`] is returned only
//! for dispatch misuse (unknown or read-only attributes), start-up failures
//! and bad settings.
//!
//! # Thread Safety
//!
//! The parameters live behind a single lock. Each write validates, updates and
//! notifies the policy sink atomically, so concurrent writers never cause a
//! mixed or duplicated propagation.

pub mod attributes;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod policy;
pub mod store;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::attributes::{Attribute, AttributeGroup};
    pub use crate::config::Settings;
    pub use crate::device::{DeviceRegistry, LiveOcDevice, LocalRegistry};
    pub use crate::policy::{FnPolicy, LoggingPolicy, PolicySink};
    pub use crate::store::{ConfigStore, OverclockSettings, WriteAck, WriteOutcome};
    pub use crate::{Error, Result};
}
