//! Platform-specific haptic implementations.

use std::time::Duration;

use crate::{HapticBackend, HapticError};

#[cfg(target_os = "ios")]
mod apple;

#[cfg(target_os = "linux")]
mod linux;

// Re-export platform implementations
#[cfg(target_os = "ios")]
use apple::{pulse, vibrate_on_silent};

#[cfg(target_os = "linux")]
use linux::{pulse, vibrate_on_silent};

// Fallback for unsupported platforms
#[cfg(not(any(target_os = "ios", target_os = "linux")))]
const fn vibrate_on_silent() -> Result<bool, HapticError> {
    Ok(true)
}

#[cfg(not(any(target_os = "ios", target_os = "linux")))]
const fn pulse(_duration: Duration) -> Result<(), HapticError> {
    Err(HapticError::NotSupported)
}

/// [`HapticBackend`] for the running OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHaptics;

impl HapticBackend for NativeHaptics {
    fn vibrate_on_silent(&self) -> Result<bool, HapticError> {
        vibrate_on_silent()
    }

    fn pulse(&self, duration: Duration) -> Result<(), HapticError> {
        pulse(duration)
    }
}
