//! # statkit-screen
//!
//! Display geometry, backlight brightness and screenshots.
//!
//! ## Features
//!
//! - **Display size**: height and width of the built-in display in points,
//!   reported in portrait so rotation does not change them.
//! - **Brightness**: read and write the backlight level as a fraction in
//!   `0.0..=1.0`.
//! - **Screenshot**: capture the screen and store it with the user's photos.
//!
//! ## Platform Specifics
//!
//! ### iOS
//! Runs inside SpringBoard. Screenshots go through SpringBoard's own
//! screenshot machinery and land in the camera roll.
//!
//! ### Linux
//! Display size comes from the first connected DRM connector, with internal
//! panels preferred. Sysfs modes are in pixels and Linux has no global
//! point scale, so width and height are reported one point per pixel.
//! Brightness is read from `/sys/class/backlight` and written through
//! logind, which needs no root. Screenshots use the xdg-desktop-portal
//! `Screenshot` interface without prompting; the portal saves the file in
//! the pictures directory.

mod platform;

pub use platform::NativeScreen;

/// Errors returned by screen operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    Platform(String),

    /// The requested feature is not supported on the current platform.
    #[error("Unsupported platform or feature")]
    Unsupported,

    /// A brightness level that is not a number was supplied.
    #[error("Brightness level must be a number")]
    InvalidBrightness,

    /// An I/O error occurred while reading sysfs.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Size of the display in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplaySize {
    /// Width in points.
    pub width: u32,
    /// Height in points.
    pub height: u32,
}

impl DisplaySize {
    /// The same size in portrait orientation (height is the longer side).
    #[must_use]
    pub const fn portrait(self) -> Self {
        if self.width > self.height {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }
}

/// A backlight level, always within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Brightness(f32);

impl Brightness {
    /// Fully dimmed.
    pub const MIN: Self = Self(0.0);
    /// Full brightness.
    pub const MAX: Self = Self(1.0);

    /// Build a level, clamping it into `0.0..=1.0`.
    ///
    /// # Errors
    /// Returns [`ScreenError::InvalidBrightness`] for NaN.
    pub fn new(level: f32) -> Result<Self, ScreenError> {
        if level.is_nan() {
            return Err(ScreenError::InvalidBrightness);
        }
        Ok(Self(level.clamp(0.0, 1.0)))
    }

    /// The level as a fraction.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Raw platform calls behind [`Screen`].
pub trait ScreenBackend: Send + Sync {
    /// Size of the built-in display in points, in any orientation.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the display cannot be queried.
    fn display_size(&self) -> Result<DisplaySize, ScreenError>;

    /// Current backlight level as reported by the platform.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the level cannot be read.
    fn brightness(&self) -> Result<f32, ScreenError>;

    /// Apply a backlight level already validated to lie in `0.0..=1.0`.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the level cannot be written.
    fn set_brightness(&self, level: f32) -> Result<(), ScreenError>;

    /// Capture the screen into the user's photo library.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the capture fails.
    fn take_screenshot(&self) -> Result<(), ScreenError>;
}

/// Screen facade over a [`ScreenBackend`].
#[derive(Debug, Clone, Default)]
pub struct Screen<B = NativeScreen> {
    backend: B,
}

impl Screen {
    /// A facade over the running OS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: ScreenBackend> Screen<B> {
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

    /// Display size in points, in portrait.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the display cannot be queried.
    pub fn display_size(&self) -> Result<DisplaySize, ScreenError> {
        Ok(self.backend.display_size()?.portrait())
    }

    /// Display height in points. Unaffected by rotation.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the display cannot be queried.
    pub fn display_height(&self) -> Result<u32, ScreenError> {
        Ok(self.display_size()?.height)
    }

    /// Display width in points. Unaffected by rotation.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the display cannot be queried.
    pub fn display_width(&self) -> Result<u32, ScreenError> {
        Ok(self.display_size()?.width)
    }

    /// Current backlight level.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the level cannot be read.
    pub fn brightness(&self) -> Result<Brightness, ScreenError> {
        Brightness::new(self.backend.brightness()?)
    }

    /// Set the backlight level. Values outside `0.0..=1.0` are clamped.
    ///
    /// # Errors
    /// Returns [`ScreenError::InvalidBrightness`] for NaN, or a platform error.
    pub fn set_brightness(&self, level: f32) -> Result<(), ScreenError> {
        let level = Brightness::new(level)?;
        log::debug!("setting brightness to {:.3}", level.value());
        self.backend.set_brightness(level.value())
    }

    /// Capture the screen and save it to the user's photos.
    ///
    /// # Errors
    /// Returns a [`ScreenError`] if the capture fails.
    pub fn take_screenshot(&self) -> Result<(), ScreenError> {
        self.backend.take_screenshot()
    }
}

/// Display size in points, in portrait.
///
/// # Errors
/// Returns a [`ScreenError`] if the display cannot be queried.
pub fn display_size() -> Result<DisplaySize, ScreenError> {
    Screen::new().display_size()
}

/// Display height in points.
///
/// # Errors
/// Returns a [`ScreenError`] if the display cannot be queried.
pub fn display_height() -> Result<u32, ScreenError> {
    Screen::new().display_height()
}

/// Display width in points.
///
/// # Errors
/// Returns a [`ScreenError`] if the display cannot be queried.
pub fn display_width() -> Result<u32, ScreenError> {
    Screen::new().display_width()
}

/// Get the current screen brightness level.
///
/// # Errors
/// Returns [`ScreenError::Platform`] if the brightness level cannot be retrieved.
pub fn brightness() -> Result<Brightness, ScreenError> {
    Screen::new().brightness()
}

/// Set the screen brightness level.
///
/// * `level` - A float between `0.0` and `1.0`. Values outside this range will be clamped.
///
/// # Errors
/// Returns [`ScreenError::Platform`] if the brightness level cannot be set.
pub fn set_brightness(level: f32) -> Result<(), ScreenError> {
    Screen::new().set_brightness(level)
}

/// Take a screenshot and save it to the user's photos.
///
/// # Errors
/// Returns [`ScreenError::Platform`] if the capture fails.
pub fn take_screenshot() -> Result<(), ScreenError> {
    Screen::new().take_screenshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FakeScreen {
        size: DisplaySize,
        level: Mutex<f32>,
        screenshots: Mutex<u32>,
    }

    impl FakeScreen {
        fn new(level: f32) -> Self {
            Self {
                size: DisplaySize {
                    width: 667,
                    height: 375,
                },
                level: Mutex::new(level),
                screenshots: Mutex::new(0),
            }
        }
    }

    impl ScreenBackend for FakeScreen {
        fn display_size(&self) -> Result<DisplaySize, ScreenError> {
            Ok(self.size)
        }

        fn brightness(&self) -> Result<f32, ScreenError> {
            Ok(*self.level.lock().unwrap())
        }

        fn set_brightness(&self, level: f32) -> Result<(), ScreenError> {
            *self.level.lock().unwrap() = level;
            Ok(())
        }

        fn take_screenshot(&self) -> Result<(), ScreenError> {
            *self.screenshots.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn display_size_ignores_rotation() {
        let screen = Screen::with_backend(FakeScreen::new(0.5));
        assert_eq!(screen.display_width().unwrap(), 375);
        assert_eq!(screen.display_height().unwrap(), 667);
    }

    #[test]
    fn brightness_round_trips() {
        let screen = Screen::with_backend(FakeScreen::new(0.5));
        for level in [0.0, 0.25, 0.8, 1.0] {
            screen.set_brightness(level).unwrap();
            let read = screen.brightness().unwrap().value();
            assert!((read - level).abs() < f32::EPSILON);
            assert!((0.0..=1.0).contains(&read));
        }
    }

    #[test]
    fn brightness_is_clamped() {
        let screen = Screen::with_backend(FakeScreen::new(0.5));
        screen.set_brightness(1.4).unwrap();
        assert_eq!(screen.brightness().unwrap(), Brightness::MAX);
        screen.set_brightness(-3.0).unwrap();
        assert_eq!(screen.brightness().unwrap(), Brightness::MIN);

        assert!(matches!(
            screen.set_brightness(f32::NAN),
            Err(ScreenError::InvalidBrightness)
        ));
        assert_eq!(screen.brightness().unwrap(), Brightness::MIN);
    }

    #[test]
    fn out_of_range_platform_reading_is_clamped() {
        let screen = Screen::with_backend(FakeScreen::new(1.2));
        assert_eq!(screen.brightness().unwrap(), Brightness::MAX);
    }

    #[test]
    fn screenshot_reaches_backend() {
        let screen = Screen::with_backend(FakeScreen::new(0.5));
        screen.take_screenshot().unwrap();
        assert_eq!(*screen.backend().screenshots.lock().unwrap(), 1);
    }
}
