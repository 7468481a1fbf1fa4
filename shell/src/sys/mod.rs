//! Platform-specific shell actions.

use crate::{BundleId, ShellBackend, ShellError};

#[cfg(target_os = "ios")]
mod apple;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "ios")]
use apple as platform;

#[cfg(target_os = "linux")]
use linux as platform;

// Fallback for unsupported platforms
#[cfg(not(any(target_os = "ios", target_os = "linux")))]
mod platform {
    use crate::{BundleId, ShellError};

    pub const fn lock_device() -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }

    pub const fn open_switcher() -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }

    pub const fn open_application(_id: &BundleId) -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }

    pub const fn open_assistant() -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }

    pub const fn respring() -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }

    pub const fn reboot() -> Result<(), ShellError> {
        Err(ShellError::NotSupported)
    }
}

/// [`ShellBackend`] for the running OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeShell;

impl ShellBackend for NativeShell {
    fn lock_device(&self) -> Result<(), ShellError> {
        platform::lock_device()
    }

    fn open_switcher(&self) -> Result<(), ShellError> {
        platform::open_switcher()
    }

    fn open_application(&self, id: &BundleId) -> Result<(), ShellError> {
        platform::open_application(id)
    }

    fn open_assistant(&self) -> Result<(), ShellError> {
        platform::open_assistant()
    }

    fn respring(&self) -> Result<(), ShellError> {
        platform::respring()
    }

    fn reboot(&self) -> Result<(), ShellError> {
        platform::reboot()
    }
}
