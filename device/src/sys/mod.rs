//! Platform-specific device telemetry.

mod load;

#[cfg(target_os = "ios")]
mod apple;
#[cfg(target_os = "ios")]
use apple as platform;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as platform;

use crate::{BatteryReading, DeviceBackend, DeviceError, MemoryInfo};

/// [`DeviceBackend`] for the running OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDevice;

impl DeviceBackend for NativeDevice {
    fn battery(&self) -> Result<BatteryReading, DeviceError> {
        platform::battery()
    }

    fn memory(&self) -> Result<MemoryInfo, DeviceError> {
        load::memory()
    }

    fn cpu_usage(&self) -> Result<f64, DeviceError> {
        load::cpu_usage()
    }

    fn free_disk_bytes(&self) -> Result<u64, DeviceError> {
        load::free_disk_bytes(platform::DATA_VOLUME)
    }

    fn device_type(&self) -> Result<String, DeviceError> {
        platform::device_type()
    }

    fn device_model(&self) -> Result<String, DeviceError> {
        platform::device_model()
    }

    fn uses_24_hour_clock(&self) -> Result<bool, DeviceError> {
        platform::uses_24_hour_clock()
    }

    fn low_power_supported(&self) -> bool {
        platform::low_power_supported()
    }

    fn low_power_mode(&self) -> Result<bool, DeviceError> {
        platform::low_power_mode()
    }

    fn set_low_power_mode(&self, enabled: bool) -> Result<(), DeviceError> {
        platform::set_low_power_mode(enabled)
    }
}

// Fallback for unsupported platforms
#[cfg(not(any(target_os = "ios", target_os = "linux")))]
mod fallback {
    use crate::{BatteryReading, DeviceError};

    pub const DATA_VOLUME: &str = "/";

    pub const fn battery() -> Result<BatteryReading, DeviceError> {
        Err(DeviceError::NotSupported)
    }
    pub const fn device_type() -> Result<String, DeviceError> {
        Err(DeviceError::NotSupported)
    }
    pub const fn device_model() -> Result<String, DeviceError> {
        Err(DeviceError::NotSupported)
    }
    pub const fn uses_24_hour_clock() -> Result<bool, DeviceError> {
        Err(DeviceError::NotSupported)
    }
    pub const fn low_power_supported() -> bool {
        false
    }
    pub const fn low_power_mode() -> Result<bool, DeviceError> {
        Ok(false)
    }
    pub const fn set_low_power_mode(_enabled: bool) -> Result<(), DeviceError> {
        Ok(())
    }
}

#[cfg(not(any(target_os = "ios", target_os = "linux")))]
use fallback as platform;
