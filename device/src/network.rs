//! Network throughput.
//!
//! Throughput sampling is not implemented on any platform. The functions
//! exist so widgets written against the full surface still link; both always
//! return [`DeviceError::NotSupported`].

use crate::DeviceError;

/// Upload speed in kB/s.
///
/// # Errors
/// Always returns [`DeviceError::NotSupported`].
pub const fn network_speed_up() -> Result<f64, DeviceError> {
    Err(DeviceError::NotSupported)
}

/// Download speed in kB/s.
///
/// # Errors
/// Always returns [`DeviceError::NotSupported`].
pub const fn network_speed_down() -> Result<f64, DeviceError> {
    Err(DeviceError::NotSupported)
}
