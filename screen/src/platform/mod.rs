#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as native;

#[cfg(target_os = "ios")]
mod apple;
#[cfg(target_os = "ios")]
use apple as native;

// Fallback for docs or other platforms
#[cfg(not(any(target_os = "linux", target_os = "ios")))]
mod dummy {
    use crate::{DisplaySize, ScreenError};
    pub const fn display_size() -> Result<DisplaySize, ScreenError> { Err(ScreenError::Unsupported) }
    pub const fn brightness() -> Result<f32, ScreenError> { Err(ScreenError::Unsupported) }
    pub const fn set_brightness(_level: f32) -> Result<(), ScreenError> { Err(ScreenError::Unsupported) }
    pub const fn take_screenshot() -> Result<(), ScreenError> { Err(ScreenError::Unsupported) }
}
#[cfg(not(any(target_os = "linux", target_os = "ios")))]
use dummy as native;

use crate::{DisplaySize, ScreenBackend, ScreenError};

/// [`ScreenBackend`] for the running OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScreen;

impl ScreenBackend for NativeScreen {
    fn display_size(&self) -> Result<DisplaySize, ScreenError> {
        native::display_size()
    }

    fn brightness(&self) -> Result<f32, ScreenError> {
        native::brightness()
    }

    fn set_brightness(&self, level: f32) -> Result<(), ScreenError> {
        native::set_brightness(level)
    }

    fn take_screenshot(&self) -> Result<(), ScreenError> {
        native::take_screenshot()
    }
}
