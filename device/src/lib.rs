//! Device telemetry and power state.
//!
//! This crate reads battery, memory, CPU, disk, identity and clock data from
//! the running OS, and toggles low power mode.
//!
//! | Platform | Source |
//! |---|---|
//! | iOS | `UIDevice`, `NSProcessInfo`, `NSDateFormatter`, `sysctlbyname` |
//! | Linux | UPower, power-profiles-daemon, DMI / device tree, desktop settings portal, `nl_langinfo` |
//! | everywhere | `sysinfo` for memory, CPU and disks |
//!
//! # Usage
//!
//! ```no_run
//! use statkit_device::DiskUnit;
//!
//! # fn main() -> Result<(), statkit_device::DeviceError> {
//! println!("battery: {}%", statkit_device::battery_percent()?);
//! println!("free RAM: {} MB", statkit_device::ram_free_mb()?);
//! println!("free disk: {:.1} GB", statkit_device::free_disk_space(DiskUnit::Gigabytes)?);
//! # Ok(())
//! # }
//! ```
//!
//! Every free function goes through [`Device`] with the [`NativeDevice`]
//! backend. Build a [`Device`] yourself to change the battery labels or to run
//! against another [`DeviceBackend`].

#![warn(missing_docs)]

mod backend;
mod battery;
mod clock;
mod disk;
mod error;
mod identity;
mod memory;
mod network;

/// Platform-specific implementations.
mod sys;

pub use backend::DeviceBackend;
pub use battery::{BatteryLabels, BatteryReading, BatteryState};
pub use clock::{clock_format_is_24_hour, pattern_is_24_hour, time_format_is_24_hour};
pub use disk::DiskUnit;
pub use error::DeviceError;
pub use identity::{DeviceFamily, chassis_name, clean_firmware_string, devicetree_chassis_name};
pub use memory::MemoryInfo;
pub use network::{network_speed_down, network_speed_up};
pub use sys::NativeDevice;

/// Telemetry facade over a [`DeviceBackend`].
#[derive(Debug, Clone, Default)]
pub struct Device<B = NativeDevice> {
    backend: B,
    labels: BatteryLabels,
}

impl Device {
    /// A facade over the running OS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: DeviceBackend> Device<B> {
    /// A facade over `backend` with the default English battery labels.
    #[must_use]
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            labels: BatteryLabels::default(),
        }
    }

    /// Replace the battery state labels.
    #[must_use]
    pub fn with_labels(mut self, labels: BatteryLabels) -> Self {
        self.labels = labels;
        self
    }

    /// The backend this facade calls into.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Battery charge in percent, within `0..=100`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the battery cannot be read.
    pub fn battery_percent(&self) -> Result<u8, DeviceError> {
        Ok(self.backend.battery()?.percent())
    }

    /// Charging state.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the battery cannot be read.
    pub fn battery_state(&self) -> Result<BatteryState, DeviceError> {
        Ok(self.backend.battery()?.state)
    }

    /// Charging state rendered through the configured [`BatteryLabels`].
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the battery cannot be read.
    pub fn battery_state_label(&self) -> Result<String, DeviceError> {
        let state = self.battery_state()?;
        Ok(self.labels.label(state).to_owned())
    }

    /// Charging state as its stable integer code.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the battery cannot be read.
    pub fn battery_state_code(&self) -> Result<i32, DeviceError> {
        Ok(self.battery_state()?.code())
    }

    /// Full memory snapshot.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if memory statistics are unavailable.
    pub fn memory(&self) -> Result<MemoryInfo, DeviceError> {
        self.backend.memory()
    }

    /// Free RAM in megabytes, counting inactive memory as free.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if memory statistics are unavailable.
    pub fn ram_free_mb(&self) -> Result<u64, DeviceError> {
        Ok(self.memory()?.free_mb())
    }

    /// Used RAM in megabytes.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if memory statistics are unavailable.
    pub fn ram_used_mb(&self) -> Result<u64, DeviceError> {
        Ok(self.memory()?.used_mb())
    }

    /// Total physical RAM in megabytes.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if memory statistics are unavailable.
    pub fn ram_available_mb(&self) -> Result<u64, DeviceError> {
        Ok(self.memory()?.total_mb())
    }

    /// CPU usage in percent across all cores, within `0.0..=100.0`.
    ///
    /// Blocks for the sampling interval the platform needs between two reads.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if CPU statistics are unavailable.
    pub fn cpu_usage(&self) -> Result<f64, DeviceError> {
        let usage = self.backend.cpu_usage()?;
        Ok(if usage.is_finite() { usage.clamp(0.0, 100.0) } else { 0.0 })
    }

    /// Free space on the user data volume, in `unit`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the volume cannot be inspected.
    pub fn free_disk_space(&self, unit: DiskUnit) -> Result<f64, DeviceError> {
        Ok(unit.scale(self.backend.free_disk_bytes()?))
    }

    /// Free space on the user data volume, with the unit given as a format
    /// code: `0` bytes, `1` KB, `2` MB, `3` GB.
    ///
    /// # Errors
    /// Returns [`DeviceError::InvalidFormat`] for any other code.
    pub fn free_disk_space_in_format(&self, format: i32) -> Result<f64, DeviceError> {
        self.free_disk_space(DiskUnit::try_from(format)?)
    }

    /// Device class name, e.g. `"iPhone"`, `"iPad"` or `"Laptop"`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform does not report one.
    pub fn device_type(&self) -> Result<String, DeviceError> {
        self.backend.device_type()
    }

    /// [`Self::device_type`] classified into a [`DeviceFamily`].
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform does not report a device type.
    pub fn device_family(&self) -> Result<DeviceFamily, DeviceError> {
        Ok(DeviceFamily::classify(&self.device_type()?))
    }

    /// Exact hardware model, e.g. `"iPhone7,2"`.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the platform does not report one.
    pub fn device_model(&self) -> Result<String, DeviceError> {
        self.backend.device_model()
    }

    /// Whether time is shown on a 24-hour clock.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if the preference cannot be read.
    pub fn is_24_hour_clock(&self) -> Result<bool, DeviceError> {
        self.backend.uses_24_hour_clock()
    }

    /// Low power mode state. Reports `false` where the OS has no such mode.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if a supported platform fails to report it.
    pub fn low_power_mode(&self) -> Result<bool, DeviceError> {
        if !self.backend.low_power_supported() {
            return Ok(false);
        }
        self.backend.low_power_mode()
    }

    /// Switch low power mode. A no-op where the OS has no such mode.
    ///
    /// # Errors
    /// Returns a [`DeviceError`] if a supported platform rejects the change.
    pub fn set_low_power_mode(&self, enabled: bool) -> Result<(), DeviceError> {
        if !self.backend.low_power_supported() {
            log::warn!("low power mode is not available, ignoring request to set it to {enabled}");
            return Ok(());
        }
        log::debug!("setting low power mode to {enabled}");
        self.backend.set_low_power_mode(enabled)
    }
}

/// Battery charge in percent, within `0..=100`.
///
/// # Errors
/// Returns a [`DeviceError`] if the battery cannot be read.
pub fn battery_percent() -> Result<u8, DeviceError> {
    Device::new().battery_percent()
}

/// Charging state.
///
/// # Errors
/// Returns a [`DeviceError`] if the battery cannot be read.
pub fn battery_state() -> Result<BatteryState, DeviceError> {
    Device::new().battery_state()
}

/// Charging state as an English label such as `"Charging"`.
///
/// # Errors
/// Returns a [`DeviceError`] if the battery cannot be read.
pub fn battery_state_label() -> Result<String, DeviceError> {
    Device::new().battery_state_label()
}

/// Charging state as its integer code (see [`BatteryState`]).
///
/// # Errors
/// Returns a [`DeviceError`] if the battery cannot be read.
pub fn battery_state_code() -> Result<i32, DeviceError> {
    Device::new().battery_state_code()
}

/// Free RAM in megabytes.
///
/// # Errors
/// Returns a [`DeviceError`] if memory statistics are unavailable.
pub fn ram_free_mb() -> Result<u64, DeviceError> {
    Device::new().ram_free_mb()
}

/// Used RAM in megabytes.
///
/// # Errors
/// Returns a [`DeviceError`] if memory statistics are unavailable.
pub fn ram_used_mb() -> Result<u64, DeviceError> {
    Device::new().ram_used_mb()
}

/// Total physical RAM in megabytes.
///
/// # Errors
/// Returns a [`DeviceError`] if memory statistics are unavailable.
pub fn ram_available_mb() -> Result<u64, DeviceError> {
    Device::new().ram_available_mb()
}

/// CPU usage in percent across all cores.
///
/// # Errors
/// Returns a [`DeviceError`] if CPU statistics are unavailable.
pub fn cpu_usage() -> Result<f64, DeviceError> {
    Device::new().cpu_usage()
}

/// Free space on the user data volume.
///
/// # Errors
/// Returns a [`DeviceError`] if the volume cannot be inspected.
pub fn free_disk_space(unit: DiskUnit) -> Result<f64, DeviceError> {
    Device::new().free_disk_space(unit)
}

/// Free space on the user data volume, unit given as a format code `0..=3`.
///
/// # Errors
/// Returns [`DeviceError::InvalidFormat`] for codes outside `0..=3`.
pub fn free_disk_space_in_format(format: i32) -> Result<f64, DeviceError> {
    Device::new().free_disk_space_in_format(format)
}

/// Device class name.
///
/// # Errors
/// Returns a [`DeviceError`] if the platform does not report one.
pub fn device_type() -> Result<String, DeviceError> {
    Device::new().device_type()
}

/// Exact hardware model.
///
/// # Errors
/// Returns a [`DeviceError`] if the platform does not report one.
pub fn device_model() -> Result<String, DeviceError> {
    Device::new().device_model()
}

/// Whether time is shown on a 24-hour clock.
///
/// # Errors
/// Returns a [`DeviceError`] if the preference cannot be read.
pub fn is_24_hour_clock() -> Result<bool, DeviceError> {
    Device::new().is_24_hour_clock()
}

/// Low power mode state.
///
/// # Errors
/// Returns a [`DeviceError`] if a supported platform fails to report it.
pub fn low_power_mode() -> Result<bool, DeviceError> {
    Device::new().low_power_mode()
}

/// Switch low power mode on or off.
///
/// # Errors
/// Returns a [`DeviceError`] if a supported platform rejects the change.
pub fn set_low_power_mode(enabled: bool) -> Result<(), DeviceError> {
    Device::new().set_low_power_mode(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const FIXTURE_BYTES: u64 = 3 * 1024 * 1024 * 1024;

    #[derive(Debug)]
    struct FakeDevice {
        level: Option<f32>,
        state: BatteryState,
        cpu: f64,
        low_power_supported: bool,
        low_power: Mutex<bool>,
    }

    impl Default for FakeDevice {
        fn default() -> Self {
            Self {
                level: Some(0.5),
                state: BatteryState::Charging,
                cpu: 12.5,
                low_power_supported: true,
                low_power: Mutex::new(false),
            }
        }
    }

    impl DeviceBackend for FakeDevice {
        fn battery(&self) -> Result<BatteryReading, DeviceError> {
            Ok(BatteryReading {
                level: self.level,
                state: self.state,
            })
        }

        fn memory(&self) -> Result<MemoryInfo, DeviceError> {
            Ok(MemoryInfo::from_total_and_free(4_294_967_296, 1_073_741_824))
        }

        fn cpu_usage(&self) -> Result<f64, DeviceError> {
            Ok(self.cpu)
        }

        fn free_disk_bytes(&self) -> Result<u64, DeviceError> {
            Ok(FIXTURE_BYTES)
        }

        fn device_type(&self) -> Result<String, DeviceError> {
            Ok("iPhone".into())
        }

        fn device_model(&self) -> Result<String, DeviceError> {
            Ok("iPhone7,2".into())
        }

        fn uses_24_hour_clock(&self) -> Result<bool, DeviceError> {
            Ok(true)
        }

        fn low_power_supported(&self) -> bool {
            self.low_power_supported
        }

        fn low_power_mode(&self) -> Result<bool, DeviceError> {
            Ok(*self.low_power.lock().unwrap())
        }

        fn set_low_power_mode(&self, enabled: bool) -> Result<(), DeviceError> {
            *self.low_power.lock().unwrap() = enabled;
            Ok(())
        }
    }

    #[test]
    fn battery_percent_stays_in_range() {
        for level in [Some(-1.0), Some(0.0), Some(0.37), Some(1.0), Some(2.5), None] {
            let device = Device::with_backend(FakeDevice {
                level,
                ..FakeDevice::default()
            });
            let percent = device.battery_percent().unwrap();
            assert!(percent <= 100, "{level:?} gave {percent}");
        }
    }

    #[test]
    fn battery_state_label_and_code_agree() {
        let device = Device::with_backend(FakeDevice::default());
        assert_eq!(device.battery_state_code().unwrap(), 2);
        assert_eq!(device.battery_state_label().unwrap(), "Charging");

        let labels = BatteryLabels {
            charging: "Wird geladen".into(),
            ..BatteryLabels::default()
        };
        let device = device.with_labels(labels);
        assert_eq!(device.battery_state_label().unwrap(), "Wird geladen");
    }

    #[test]
    fn ram_in_megabytes() {
        let device = Device::with_backend(FakeDevice::default());
        assert_eq!(device.ram_free_mb().unwrap(), 1024);
        assert_eq!(device.ram_used_mb().unwrap(), 3072);
        assert_eq!(device.ram_available_mb().unwrap(), 4096);
    }

    #[test]
    fn cpu_usage_is_clamped() {
        let device = Device::with_backend(FakeDevice {
            cpu: 180.0,
            ..FakeDevice::default()
        });
        assert!((device.cpu_usage().unwrap() - 100.0).abs() < f64::EPSILON);

        let device = Device::with_backend(FakeDevice {
            cpu: f64::NAN,
            ..FakeDevice::default()
        });
        assert!(device.cpu_usage().unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn disk_space_scales_across_formats() {
        let device = Device::with_backend(FakeDevice::default());
        let expected = [3_221_225_472.0, 3_145_728.0, 3072.0, 3.0];
        for (format, want) in (0..4).zip(expected) {
            let got = device.free_disk_space_in_format(format).unwrap();
            assert!(got >= 0.0);
            assert!((got - want).abs() < f64::EPSILON, "format {format}: {got}");
        }
        assert_eq!(
            device.free_disk_space_in_format(7),
            Err(DeviceError::InvalidFormat(7))
        );
    }

    #[test]
    fn identity_passthrough() {
        let device = Device::with_backend(FakeDevice::default());
        assert_eq!(device.device_model().unwrap(), "iPhone7,2");
        assert_eq!(device.device_family().unwrap(), DeviceFamily::Phone);
        assert!(device.is_24_hour_clock().unwrap());
    }

    #[test]
    fn low_power_round_trip() {
        let fake = FakeDevice::default();
        let device = Device::with_backend(&fake);
        device.set_low_power_mode(true).unwrap();
        assert!(device.low_power_mode().unwrap());
        device.set_low_power_mode(false).unwrap();
        assert!(!device.low_power_mode().unwrap());
    }

    #[test]
    fn low_power_setter_is_noop_when_unsupported() {
        let device = Device::with_backend(FakeDevice {
            low_power_supported: false,
            ..FakeDevice::default()
        });
        device.set_low_power_mode(true).unwrap();
        assert!(!*device.backend().low_power.lock().unwrap());
        assert!(!device.low_power_mode().unwrap());
    }
}
