//! Vibration feedback.
//!
//! This crate vibrates the device for a fixed short pulse or a caller-chosen
//! duration on iOS and Linux phones. Devices that cannot vibrate play an
//! audible alert instead.
//!
//! Every call first reads the user's vibrate-on-silent preference and does
//! nothing when it is turned off.

#![warn(missing_docs)]

use std::time::Duration;

// Internal platform-specific implementations.
mod sys;

pub use sys::NativeHaptics;

/// Length of the pulse played by [`vibrate`].
pub const DEFAULT_VIBRATION: Duration = Duration::from_millis(200);

/// Errors that can occur when triggering vibration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HapticError {
    /// Vibration is not supported on this device.
    #[error("vibration not supported")]
    NotSupported,
    /// The host OS call failed.
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// What a vibration request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationOutcome {
    /// The device vibrated (or played its alert sound).
    Vibrated,
    /// The vibrate-on-silent preference is off.
    Suppressed,
    /// The requested duration was zero, negative or not a number.
    Skipped,
}

/// Convert a duration in seconds into a pulse length.
///
/// Returns `None` for zero, negative, infinite and NaN values.
#[must_use]
pub fn pulse_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).ok()
    } else {
        None
    }
}

/// Raw platform calls behind [`Haptics`].
pub trait HapticBackend: Send + Sync {
    /// Whether the user allows vibration while the ringer is silenced.
    ///
    /// # Errors
    /// Returns a [`HapticError`] if the preference cannot be read.
    fn vibrate_on_silent(&self) -> Result<bool, HapticError>;

    /// Vibrate for `duration`, which is never zero.
    ///
    /// # Errors
    /// Returns a [`HapticError`] if the device cannot be driven.
    fn pulse(&self, duration: Duration) -> Result<(), HapticError>;
}

/// Vibration facade over a [`HapticBackend`].
#[derive(Debug, Clone, Default)]
pub struct Haptics<B = NativeHaptics> {
    backend: B,
}

impl Haptics {
    /// A facade over the running OS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: HapticBackend> Haptics<B> {
    /// A facade over `backend`.
    #[must_use]
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The backend this facade calls into.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Vibrate for [`DEFAULT_VIBRATION`].
    ///
    /// # Errors
    /// Returns a [`HapticError`] if the platform call fails.
    pub fn vibrate(&self) -> Result<VibrationOutcome, HapticError> {
        self.vibrate_for_duration(DEFAULT_VIBRATION)
    }

    /// Vibrate for `seconds`. Zero, negative and NaN durations do nothing.
    ///
    /// # Errors
    /// Returns a [`HapticError`] if the platform call fails.
    pub fn vibrate_for(&self, seconds: f64) -> Result<VibrationOutcome, HapticError> {
        match pulse_duration(seconds) {
            Some(duration) => self.vibrate_for_duration(duration),
            None => {
                log::debug!("ignoring vibration of {seconds}s");
                Ok(VibrationOutcome::Skipped)
            }
        }
    }

    /// Vibrate for `duration`. A zero duration does nothing.
    ///
    /// # Errors
    /// Returns a [`HapticError`] if the platform call fails.
    pub fn vibrate_for_duration(&self, duration: Duration) -> Result<VibrationOutcome, HapticError> {
        if duration.is_zero() {
            return Ok(VibrationOutcome::Skipped);
        }
        if !self.backend.vibrate_on_silent()? {
            log::debug!("vibrate on silent is off, not vibrating");
            return Ok(VibrationOutcome::Suppressed);
        }
        self.backend.pulse(duration)?;
        Ok(VibrationOutcome::Vibrated)
    }
}

/// Vibrate for 0.2 seconds.
///
/// # Errors
/// Returns an error if vibration is not supported or fails to trigger.
pub fn vibrate() -> Result<VibrationOutcome, HapticError> {
    Haptics::new().vibrate()
}

/// Vibrate for `seconds`.
///
/// # Errors
/// Returns an error if vibration is not supported or fails to trigger.
pub fn vibrate_for(seconds: f64) -> Result<VibrationOutcome, HapticError> {
    Haptics::new().vibrate_for(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeMotor {
        muted: bool,
        pulses: Mutex<Vec<Duration>>,
    }

    impl HapticBackend for FakeMotor {
        fn vibrate_on_silent(&self) -> Result<bool, HapticError> {
            Ok(!self.muted)
        }

        fn pulse(&self, duration: Duration) -> Result<(), HapticError> {
            self.pulses.lock().unwrap().push(duration);
            Ok(())
        }
    }

    #[test]
    fn default_pulse_is_short() {
        let haptics = Haptics::with_backend(FakeMotor::default());
        assert_eq!(haptics.vibrate(), Ok(VibrationOutcome::Vibrated));
        assert_eq!(
            *haptics.backend().pulses.lock().unwrap(),
            vec![Duration::from_millis(200)]
        );
    }

    #[test]
    fn custom_duration() {
        let haptics = Haptics::with_backend(FakeMotor::default());
        assert_eq!(haptics.vibrate_for(1.5), Ok(VibrationOutcome::Vibrated));
        assert_eq!(
            *haptics.backend().pulses.lock().unwrap(),
            vec![Duration::from_millis(1500)]
        );
    }

    #[test]
    fn zero_or_negative_duration_is_noop() {
        let haptics = Haptics::with_backend(FakeMotor::default());
        for seconds in [0.0, -0.0, -2.0, f64::NAN, f64::NEG_INFINITY] {
            assert_eq!(haptics.vibrate_for(seconds), Ok(VibrationOutcome::Skipped));
        }
        assert_eq!(
            haptics.vibrate_for_duration(Duration::ZERO),
            Ok(VibrationOutcome::Skipped)
        );
        assert!(haptics.backend().pulses.lock().unwrap().is_empty());
    }

    #[test]
    fn silent_preference_suppresses_both_calls() {
        let haptics = Haptics::with_backend(FakeMotor {
            muted: true,
            ..FakeMotor::default()
        });
        assert_eq!(haptics.vibrate(), Ok(VibrationOutcome::Suppressed));
        assert_eq!(haptics.vibrate_for(3.0), Ok(VibrationOutcome::Suppressed));
        assert!(haptics.backend().pulses.lock().unwrap().is_empty());
    }

    #[test]
    fn pulse_duration_conversion() {
        assert_eq!(pulse_duration(0.25), Some(Duration::from_millis(250)));
        assert_eq!(pulse_duration(0.0), None);
        assert_eq!(pulse_duration(f64::INFINITY), None);
    }
}
