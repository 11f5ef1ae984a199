//! Downstream policy hook
//!
//! The frequency-scaling subsystem that actually applies the overclock lives
//! outside this crate. It is reached through a single entry point,
//! [`PolicySink::apply_policy`], which receives the complete current
//! parameter triple every time an accepted write changes it.
//!
//! # Examples
//!
//! ```rust
//! use live_oc::policy::{FnPolicy, PolicySink};
//!
//! let sink = FnPolicy::new(|value, low, high| {
//!     println!("overclock {value}% between {low} and {high} kHz");
//! });
//! sink.apply_policy(120, 800_000, 2_000_000);
//! ```

use std::fmt;

#[cfg(test)]
use mockall::automock;

/// Receiver of policy updates.
///
/// Implementations are called synchronously from the writing thread while the
/// store's lock is held, so they must not call back into the store.
#[cfg_attr(test, automock)]
pub trait PolicySink: Send + Sync + fmt::Debug {
    /// Apply overclock `value` to the band `[low_freq, high_freq]` (kHz)
    fn apply_policy(&self, value: u32, low_freq: u32, high_freq: u32);
}

/// Adapter turning a closure into a [`PolicySink`]
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(u32, u32, u32) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPolicy(<closure>)")
    }
}

impl<F> PolicySink for FnPolicy<F>
where
    F: Fn(u32, u32, u32) + Send + Sync,
{
    fn apply_policy(&self, value: u32, low_freq: u32, high_freq: u32) {
        (self.f)(value, low_freq, high_freq)
    }
}

/// Sink that only records updates as tracing events.
///
/// Used when no frequency-scaling backend is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPolicy;

impl PolicySink for LoggingPolicy {
    fn apply_policy(&self, value: u32, low_freq: u32, high_freq: u32) {
        tracing::debug!(value, low_freq, high_freq, "liveoc policy update");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[test]
    fn test_fn_policy_forwards_arguments() {
        let seen = Arc::new(AtomicU32::new(0));
        let captured = Arc::clone(&seen);
        let sink = FnPolicy::new(move |value, low, high| {
            assert_eq!((low, high), (800_000, 2_000_000));
            captured.store(value, Ordering::SeqCst);
        });

        sink.apply_policy(130, 800_000, 2_000_000);
        assert_eq!(seen.load(Ordering::SeqCst), 130);
        assert_eq!(format!("{:?}", sink), "FnPolicy(<closure>)");
    }

    #[test]
    fn test_mock_policy_sink() {
        let mut mock = MockPolicySink::new();
        mock.expect_apply_policy()
            .with(eq(110), eq(900_000), eq(1_800_000))
            .times(1)
            .return_const(());

        mock.apply_policy(110, 900_000, 1_800_000);
    }

    #[test]
    #[traced_test]
    fn test_logging_policy_emits_event() {
        LoggingPolicy.apply_policy(125, 800_000, 2_000_000);
        assert!(logs_contain("liveoc policy update"));
        assert!(logs_contain("value=125"));
    }
}
