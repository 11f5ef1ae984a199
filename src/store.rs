//! Configuration store for the overclock parameters
//!
//! The store owns the `(value, low_freq, high_freq)` triple and is the only
//! place it changes. Every write is validated, applied and propagated to the
//! [`PolicySink`] inside one critical section, so the sink always sees a
//! triple that was actually stored and sees it exactly once per change.
//!
//! Writes never fail at the transport level: each one reports the full input
//! length as consumed (see [`WriteAck`]). The semantic result travels in
//! [`WriteOutcome`] and in the log line every write emits.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use live_oc::policy::LoggingPolicy;
//! use live_oc::store::{ConfigStore, WriteOutcome};
//!
//! let store = ConfigStore::new(Arc::new(LoggingPolicy));
//! let ack = store.write_intensity("120\n");
//! assert_eq!(ack.consumed, 4);
//! assert!(matches!(ack.outcome, WriteOutcome::Applied));
//! assert_eq!(store.read_intensity(), "120\n");
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

use crate::constants::{
    DEFAULT_OC_HIGH_FREQ_KHZ, DEFAULT_OC_LOW_FREQ_KHZ, DEFAULT_OC_VALUE, LIVEOC_VERSION, MAX_OC_VALUE,
    MIN_OC_VALUE,
};
use crate::error::{Error, Result};
use crate::policy::PolicySink;

/// Snapshot of the overclock parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverclockSettings {
    /// Overclock intensity, 100 (none) to 150
    pub value: u32,
    /// Lower edge of the affected band in kHz
    pub low_freq: u32,
    /// Upper edge of the affected band in kHz
    pub high_freq: u32,
}

impl Default for OverclockSettings {
    fn default() -> Self {
        Self {
            value: DEFAULT_OC_VALUE,
            low_freq: DEFAULT_OC_LOW_FREQ_KHZ,
            high_freq: DEFAULT_OC_HIGH_FREQ_KHZ,
        }
    }
}

/// Semantic result of a write
#[derive(Debug)]
pub enum WriteOutcome {
    /// The field changed and the policy sink was notified
    Applied,
    /// The value equalled the stored intensity; accepted without propagation
    Unchanged,
    /// The value was refused; state is untouched
    Rejected(Error),
}

/// Transport-level acknowledgement of a write
#[derive(Debug)]
pub struct WriteAck {
    /// Bytes consumed from the input, always the full length
    pub consumed: usize,
    /// What the write did to the stored parameters
    pub outcome: WriteOutcome,
}

impl WriteAck {
    fn new(consumed: usize, outcome: WriteOutcome) -> Self {
        Self { consumed, outcome }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, WriteOutcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, WriteOutcome::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Low,
    High,
}

impl Bound {
    fn writer(self) -> &'static str {
        match self {
            Bound::Low => "write_low_bound",
            Bound::High => "write_high_bound",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Bound::Low => "oc-target-low",
            Bound::High => "oc-target-high",
        }
    }

    fn slot(self, settings: &mut OverclockSettings) -> &mut u32 {
        match self {
            Bound::Low => &mut settings.low_freq,
            Bound::High => &mut settings.high_freq,
        }
    }
}

/// Holder of the process-wide overclock parameters
pub struct ConfigStore {
    settings: Mutex<OverclockSettings>,
    policy: Arc<dyn PolicySink>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("settings", &self.snapshot())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ConfigStore {
    /// Creates a store holding the compiled-in defaults.
    ///
    /// The policy sink is not called at construction; it only hears about
    /// changes.
    pub fn new(policy: Arc<dyn PolicySink>) -> Self {
        Self { settings: Mutex::new(OverclockSettings::default()), policy }
    }

    /// Current parameter triple
    pub fn snapshot(&self) -> OverclockSettings {
        *self.settings.lock()
    }

    pub fn read_intensity(&self) -> String {
        format!("{}\n", self.settings.lock().value)
    }

    pub fn read_low_bound(&self) -> String {
        format!("{}\n", self.settings.lock().low_freq)
    }

    pub fn read_high_bound(&self) -> String {
        format!("{}\n", self.settings.lock().high_freq)
    }

    pub fn read_version(&self) -> String {
        format!("{}\n", LIVEOC_VERSION)
    }

    /// Sets the overclock intensity.
    ///
    /// Values outside `[MIN_OC_VALUE, MAX_OC_VALUE]` are rejected. Writing the
    /// current value is reported and logged as a successful set, but the sink
    /// is not called.
    pub fn write_intensity<I: AsRef<[u8]>>(&self, input: I) -> WriteAck {
        let input = input.as_ref();
        let outcome = match parse_leading_u32(input) {
            Ok(data) if (MIN_OC_VALUE..=MAX_OC_VALUE).contains(&data) => {
                let mut settings = self.settings.lock();
                let outcome = if data != settings.value {
                    settings.value = data;
                    self.propagate(&settings);
                    WriteOutcome::Applied
                } else {
                    WriteOutcome::Unchanged
                };
                info!("LIVEOC oc-value set to {}", settings.value);
                outcome
            },
            Ok(data) => reject("write_intensity", Error::InvalidRange(data)),
            Err(e) => reject("write_intensity", e),
        };
        WriteAck::new(input.len(), outcome)
    }

    /// Sets the lower edge of the band (kHz). No range check is applied;
    /// writing the current value is rejected as an invalid range.
    pub fn write_low_bound<I: AsRef<[u8]>>(&self, input: I) -> WriteAck {
        self.write_bound(Bound::Low, input.as_ref())
    }

    /// Sets the upper edge of the band (kHz). Same rules as
    /// [`write_low_bound`](Self::write_low_bound).
    pub fn write_high_bound<I: AsRef<[u8]>>(&self, input: I) -> WriteAck {
        self.write_bound(Bound::High, input.as_ref())
    }

    fn write_bound(&self, bound: Bound, input: &[u8]) -> WriteAck {
        let outcome = match parse_leading_u32(input) {
            Ok(data) => {
                let mut settings = self.settings.lock();
                let slot = bound.slot(&mut settings);
                if data != *slot {
                    *slot = data;
                    self.propagate(&settings);
                    info!("LIVEOC {} set to {}", bound.label(), data);
                    WriteOutcome::Applied
                } else {
                    // Reports the stored value, not the input.
                    reject(bound.writer(), Error::InvalidRange(*slot))
                }
            },
            Err(e) => reject(bound.writer(), e),
        };
        WriteAck::new(input.len(), outcome)
    }

    fn propagate(&self, settings: &OverclockSettings) {
        self.policy.apply_policy(settings.value, settings.low_freq, settings.high_freq);
    }
}

fn reject(writer: &str, err: Error) -> WriteOutcome {
    info!("{}: {}", writer, err);
    WriteOutcome::Rejected(err)
}

/// Parses the leading unsigned decimal integer of `input`.
///
/// Leading whitespace (as C `isspace`, vertical tab included) and a single
/// `+` are skipped; anything after the
/// digits is ignored. Negative numbers and values above `u32::MAX` are
/// rejected.
pub(crate) fn parse_leading_u32(input: &[u8]) -> Result<u32> {
    let start = input.iter().position(|b| !is_c_space(*b)).unwrap_or(input.len());
    let rest = &input[start..];
    let rest = rest.strip_prefix(b"+").unwrap_or(rest);
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return Err(Error::InvalidInput);
    }

    rest[..digits]
        .iter()
        .try_fold(0u32, |acc, b| acc.checked_mul(10)?.checked_add(u32::from(b - b'0')))
        .ok_or(Error::InvalidInput)
}

fn is_c_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}
