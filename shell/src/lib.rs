//! Shell and power actions.
//!
//! This crate locks the device, opens the app switcher and the voice
//! assistant, launches applications by bundle identifier, restarts the
//! graphical shell ("respring") and reboots.
//!
//! On iOS the calls go to SpringBoard, which must be the hosting process.
//! On Linux they go to logind, the systemd user manager, GNOME Shell and
//! D-Bus activatable applications.

#![warn(missing_docs)]

mod bundle;

/// Platform-specific implementations.
mod sys;

pub use bundle::BundleId;
pub use sys::NativeShell;

/// Errors returned by shell actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    /// The running platform has no equivalent action.
    #[error("not supported on this platform")]
    NotSupported,

    /// The application identifier is malformed.
    #[error("invalid bundle identifier: {0:?}")]
    InvalidBundleId(String),

    /// The host OS call failed.
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Raw platform calls behind [`Shell`].
pub trait ShellBackend: Send + Sync {
    /// Lock the device.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn lock_device(&self) -> Result<(), ShellError>;

    /// Bring up the application switcher.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn open_switcher(&self) -> Result<(), ShellError>;

    /// Bring an application to the foreground, launching it if needed.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn open_application(&self, id: &BundleId) -> Result<(), ShellError>;

    /// Open the voice assistant.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn open_assistant(&self) -> Result<(), ShellError>;

    /// Restart the graphical shell.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn respring(&self) -> Result<(), ShellError>;

    /// Reboot the device.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    fn reboot(&self) -> Result<(), ShellError>;
}

/// Action facade over a [`ShellBackend`].
#[derive(Debug, Clone, Default)]
pub struct Shell<B = NativeShell> {
    backend: B,
}

impl Shell {
    /// A facade over the running OS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: ShellBackend> Shell<B> {
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

    /// Lock the device.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    pub fn lock_device(&self) -> Result<(), ShellError> {
        log::info!("locking device");
        self.backend.lock_device()
    }

    /// Open the application switcher.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    pub fn open_switcher(&self) -> Result<(), ShellError> {
        self.backend.open_switcher()
    }

    /// Launch the application with bundle identifier `id` to the foreground.
    ///
    /// # Errors
    /// Returns [`ShellError::InvalidBundleId`] for a malformed identifier,
    /// or a platform error if the launch fails.
    pub fn open_application(&self, id: &str) -> Result<(), ShellError> {
        let id = BundleId::parse(id)?;
        log::info!("opening {id}");
        self.backend.open_application(&id)
    }

    /// Open the voice assistant.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    pub fn open_assistant(&self) -> Result<(), ShellError> {
        self.backend.open_assistant()
    }

    /// Restart the graphical shell immediately.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    pub fn respring(&self) -> Result<(), ShellError> {
        log::info!("restarting the shell");
        self.backend.respring()
    }

    /// Reboot the device immediately.
    ///
    /// # Errors
    /// Returns a [`ShellError`] if the platform call fails.
    pub fn reboot(&self) -> Result<(), ShellError> {
        log::info!("rebooting");
        self.backend.reboot()
    }
}

/// Lock the device.
///
/// # Errors
/// Returns a [`ShellError`] if the platform call fails.
pub fn lock_device() -> Result<(), ShellError> {
    Shell::new().lock_device()
}

/// Open the application switcher.
///
/// # Errors
/// Returns a [`ShellError`] if the platform call fails.
pub fn open_switcher() -> Result<(), ShellError> {
    Shell::new().open_switcher()
}

/// Launch an application by bundle identifier.
///
/// # Errors
/// Returns [`ShellError::InvalidBundleId`] for a malformed identifier, or a
/// platform error if the launch fails.
pub fn open_application(id: &str) -> Result<(), ShellError> {
    Shell::new().open_application(id)
}

/// Open the voice assistant.
///
/// # Errors
/// Returns a [`ShellError`] if the platform call fails.
pub fn open_assistant() -> Result<(), ShellError> {
    Shell::new().open_assistant()
}

/// Restart the graphical shell.
///
/// # Errors
/// Returns a [`ShellError`] if the platform call fails.
pub fn respring() -> Result<(), ShellError> {
    Shell::new().respring()
}

/// Reboot the device.
///
/// # Errors
/// Returns a [`ShellError`] if the platform call fails.
pub fn reboot() -> Result<(), ShellError> {
    Shell::new().reboot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, call: impl Into<String>) -> Result<(), ShellError> {
            self.calls.lock().unwrap().push(call.into());
            Ok(())
        }
    }

    impl ShellBackend for Recorder {
        fn lock_device(&self) -> Result<(), ShellError> {
            self.record("lock")
        }

        fn open_switcher(&self) -> Result<(), ShellError> {
            self.record("switcher")
        }

        fn open_application(&self, id: &BundleId) -> Result<(), ShellError> {
            self.record(format!("open {id}"))
        }

        fn open_assistant(&self) -> Result<(), ShellError> {
            Err(ShellError::NotSupported)
        }

        fn respring(&self) -> Result<(), ShellError> {
            self.record("respring")
        }

        fn reboot(&self) -> Result<(), ShellError> {
            self.record("reboot")
        }
    }

    #[test]
    fn actions_pass_through() {
        let shell = Shell::with_backend(Recorder::default());
        shell.lock_device().unwrap();
        shell.open_switcher().unwrap();
        shell.open_application("com.apple.mobilesafari").unwrap();
        shell.respring().unwrap();
        shell.reboot().unwrap();
        assert_eq!(
            *shell.backend().calls.lock().unwrap(),
            ["lock", "switcher", "open com.apple.mobilesafari", "respring", "reboot"]
        );
    }

    #[test]
    fn malformed_identifier_never_reaches_platform() {
        let shell = Shell::with_backend(Recorder::default());
        assert_eq!(
            shell.open_application("not an id"),
            Err(ShellError::InvalidBundleId("not an id".into()))
        );
        assert!(shell.backend().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn platform_errors_are_passed_through() {
        let shell = Shell::with_backend(Recorder::default());
        assert_eq!(shell.open_assistant(), Err(ShellError::NotSupported));
    }
}
