use crate::{BatteryReading, DeviceError, MemoryInfo};

/// Raw platform calls behind [`Device`](crate::Device).
///
/// [`NativeDevice`](crate::NativeDevice) talks to the running OS. Implement
/// this trait to drive the facade from a fixture instead.
pub trait DeviceBackend: Send + Sync {
    /// Battery level and charging state.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn battery(&self) -> Result<BatteryReading, DeviceError>;

    /// Physical memory snapshot.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn memory(&self) -> Result<MemoryInfo, DeviceError>;

    /// Aggregate CPU usage across all cores, in percent.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn cpu_usage(&self) -> Result<f64, DeviceError>;

    /// Available bytes on the volume holding user data.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn free_disk_bytes(&self) -> Result<u64, DeviceError>;

    /// Device class name, e.g. `"iPhone"`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn device_type(&self) -> Result<String, DeviceError>;

    /// Exact hardware model, e.g. `"iPhone7,2"`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn device_model(&self) -> Result<String, DeviceError>;

    /// Whether the user formats time with a 24-hour clock.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn uses_24_hour_clock(&self) -> Result<bool, DeviceError>;

    /// Whether the OS has a low power mode at all.
    fn low_power_supported(&self) -> bool;

    /// Current low power mode state.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn low_power_mode(&self) -> Result<bool, DeviceError>;

    /// Switch low power mode on or off.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform call fails.
    fn set_low_power_mode(&self, enabled: bool) -> Result<(), DeviceError>;
}

impl<T: DeviceBackend + ?Sized> DeviceBackend for &T {
    fn battery(&self) -> Result<BatteryReading, DeviceError> {
        (**self).battery()
    }

    fn memory(&self) -> Result<MemoryInfo, DeviceError> {
        (**self).memory()
    }

    fn cpu_usage(&self) -> Result<f64, DeviceError> {
        (**self).cpu_usage()
    }

    fn free_disk_bytes(&self) -> Result<u64, DeviceError> {
        (**self).free_disk_bytes()
    }

    fn device_type(&self) -> Result<String, DeviceError> {
        (**self).device_type()
    }

    fn device_model(&self) -> Result<String, DeviceError> {
        (**self).device_model()
    }

    fn uses_24_hour_clock(&self) -> Result<bool, DeviceError> {
        (**self).uses_24_hour_clock()
    }

    fn low_power_supported(&self) -> bool {
        (**self).low_power_supported()
    }

    fn low_power_mode(&self) -> Result<bool, DeviceError> {
        (**self).low_power_mode()
    }

    fn set_low_power_mode(&self, enabled: bool) -> Result<(), DeviceError> {
        (**self).set_low_power_mode(enabled)
    }
}
