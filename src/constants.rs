/// Interface revision reported by the `version` attribute
pub const LIVEOC_VERSION: u32 = 1;

/// Lowest accepted overclock intensity (baseline, no overclock)
pub const MIN_OC_VALUE: u32 = 100;

/// Highest accepted overclock intensity
pub const MAX_OC_VALUE: u32 = 150;

/// Intensity applied at start-up
pub const DEFAULT_OC_VALUE: u32 = 100;

/// Apply the overclock to 800 MHz and above (kHz)
pub const DEFAULT_OC_LOW_FREQ_KHZ: u32 = 800_000;

/// Apply the overclock to 2000 MHz and below (kHz)
pub const DEFAULT_OC_HIGH_FREQ_KHZ: u32 = 2_000_000;

/// Name of the device node the attributes are published under
pub const DEFAULT_DEVICE_NAME: &str = "liveoc";

/// Log filter used when neither the settings nor `RUST_LOG` provide one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Permission bits for read/write attributes (world readable and writable)
pub const MODE_READ_WRITE: u32 = 0o666;

/// Permission bits for read-only attributes
pub const MODE_READ_ONLY: u32 = 0o444;
