//! # Statkit
//!
//! Device telemetry and system actions for home-screen widgets.
//!
//! Statkit gives widget authors one flat API for the numbers a status widget
//! shows (battery, memory, CPU, disk, display) and the buttons it offers
//! (lock, respring, brightness, low power mode). It runs inside SpringBoard
//! on jailbroken iOS and on Linux desktops and phones.
//!
//! ## Features
//!
//! Each concern lives in its own crate, enabled by a feature:
//!
//! - `device`: battery, RAM, CPU, free disk space, device identity, clock
//!   format and low power mode.
//! - `screen`: display size, brightness and screenshots.
//! - `haptic`: vibration honoring the vibrate-on-silent switch.
//! - `shell`: lock, app switcher, launching apps, Siri, respring and reboot.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! statkit = { version = "0.1", features = ["device", "screen"] }
//! ```
//!
//! ```rust,ignore
//! use statkit::{device, screen};
//!
//! fn widget_line() -> Result<String, Box<dyn std::error::Error>> {
//!     Ok(format!(
//!         "{}% {} | {} MB free | {}x{}",
//!         device::battery_percent()?,
//!         device::battery_state_label()?,
//!         device::ram_free_mb()?,
//!         screen::display_width()?,
//!         screen::display_height()?,
//!     ))
//! }
//! ```

#[cfg(feature = "device")]
pub use statkit_device as device;

#[cfg(feature = "screen")]
pub use statkit_screen as screen;

#[cfg(feature = "haptic")]
pub use statkit_haptic as haptic;

#[cfg(feature = "shell")]
pub use statkit_shell as shell;
