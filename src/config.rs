//! Host-side settings for the liveoc device
//!
//! Only the surroundings are configurable: the device node name and the log
//! filter. The overclock parameters always start from their compiled-in
//! defaults and change only through attribute writes.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::{DEFAULT_DEVICE_NAME, DEFAULT_LOG_FILTER};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Name the device node is registered under
    pub device_name: String,
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self { device_name: DEFAULT_DEVICE_NAME.to_string(), log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.device_name.is_empty() {
            return Err(Error::config("device_name must not be empty"));
        }
        if self.device_name.contains('/') {
            return Err(Error::config(format!("device_name must not contain '/': {}", self.device_name)));
        }
        if self.log_filter.parse::<EnvFilter>().is_err() {
            return Err(Error::config(format!("invalid log_filter: {}", self.log_filter)));
        }
        Ok(())
    }
}

pub fn load_from_str(s: &str) -> Result<Settings> {
    let settings: Settings =
        serde_json::from_str(s).map_err(|e| Error::config(format!("invalid settings json: {e}")))?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let s = fs::read_to_string(path)?;
    load_from_str(&s)
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `settings.log_filter`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    let _ = fmt().with_env_filter(filter).try_init();
}
