//! Linux telemetry.
//!
//! Battery state comes from UPower's display device and low power mode maps to
//! the `power-saver` profile of power-profiles-daemon, both over the system
//! bus. Identity is read from DMI, falling back to the device tree on ARM
//! boards and phones. The clock format follows the desktop setting, then the
//! locale's own time format.

use std::ffi::CStr;
use std::fs;
use std::path::Path;
use std::ptr;

use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::OwnedValue;

use crate::identity::{chassis_name, clean_firmware_string, devicetree_chassis_name};
use crate::{BatteryReading, BatteryState, DeviceError, clock};

pub const DATA_VOLUME: &str = "/";

const UPOWER_BUS: &str = "org.freedesktop.UPower";
const UPOWER_DISPLAY_DEVICE: &str = "/org/freedesktop/UPower/devices/DisplayDevice";
const UPOWER_DEVICE_IFACE: &str = "org.freedesktop.UPower.Device";

const PROFILES_BUS: &str = "net.hadess.PowerProfiles";
const PROFILES_PATH: &str = "/net/hadess/PowerProfiles";
const PROFILES_IFACE: &str = "net.hadess.PowerProfiles";
const POWER_SAVER: &str = "power-saver";
const BALANCED: &str = "balanced";

const PORTAL_BUS: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const PORTAL_SETTINGS_IFACE: &str = "org.freedesktop.portal.Settings";
const GNOME_INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";
const CLOCK_FORMAT_KEY: &str = "clock-format";

const DMI_DIR: &str = "/sys/class/dmi/id";
const DEVICE_TREE_DIR: &str = "/proc/device-tree";

fn platform_error(e: impl std::fmt::Display) -> DeviceError {
    DeviceError::Platform(e.to_string())
}

fn system_proxy(
    destination: &'static str,
    path: &'static str,
    interface: &'static str,
) -> Result<Proxy<'static>, DeviceError> {
    let conn = Connection::system().map_err(platform_error)?;
    Proxy::new(&conn, destination, path, interface).map_err(platform_error)
}

/// Map a UPower `State` value onto [`BatteryState`].
const fn upower_state(state: u32) -> BatteryState {
    match state {
        // Charging, PendingCharge
        1 | 5 => BatteryState::Charging,
        // Discharging, Empty, PendingDischarge
        2 | 3 | 6 => BatteryState::Unplugged,
        4 => BatteryState::Full,
        _ => BatteryState::Unknown,
    }
}

pub fn battery() -> Result<BatteryReading, DeviceError> {
    let proxy = system_proxy(UPOWER_BUS, UPOWER_DISPLAY_DEVICE, UPOWER_DEVICE_IFACE)?;

    let present: bool = proxy.get_property("IsPresent").map_err(platform_error)?;
    if !present {
        log::debug!("UPower reports no battery");
        return Ok(BatteryReading::default());
    }

    let percentage: f64 = proxy.get_property("Percentage").map_err(platform_error)?;
    let state: u32 = proxy.get_property("State").map_err(platform_error)?;
    log::debug!("UPower battery: {percentage}% state={state}");

    #[allow(clippy::cast_possible_truncation)]
    Ok(BatteryReading {
        level: Some((percentage / 100.0) as f32),
        state: upower_state(state),
    })
}

fn read_firmware(path: &Path) -> Option<String> {
    fs::read(path).ok().and_then(|raw| clean_firmware_string(&raw))
}

fn device_type_from(dmi: &Path, device_tree: &Path) -> Option<&'static str> {
    if let Some(code) = read_firmware(&dmi.join("chassis_type")) {
        if let Ok(code) = code.parse::<u32>() {
            return Some(chassis_name(code));
        }
    }
    read_firmware(&device_tree.join("chassis-type")).map(|value| devicetree_chassis_name(&value))
}

fn device_model_from(dmi: &Path, device_tree: &Path) -> Option<String> {
    read_firmware(&dmi.join("product_name")).or_else(|| read_firmware(&device_tree.join("model")))
}

pub fn device_type() -> Result<String, DeviceError> {
    device_type_from(Path::new(DMI_DIR), Path::new(DEVICE_TREE_DIR))
        .map(str::to_owned)
        .ok_or(DeviceError::NotSupported)
}

pub fn device_model() -> Result<String, DeviceError> {
    device_model_from(Path::new(DMI_DIR), Path::new(DEVICE_TREE_DIR))
        .ok_or(DeviceError::NotSupported)
}

/// The desktop's own clock setting, read through the settings portal.
fn desktop_clock_format() -> Result<String, DeviceError> {
    let conn = Connection::session().map_err(platform_error)?;
    let settings = Proxy::new(&conn, PORTAL_BUS, PORTAL_PATH, PORTAL_SETTINGS_IFACE)
        .map_err(platform_error)?;
    let value: OwnedValue = settings
        .call("ReadOne", &(GNOME_INTERFACE_SCHEMA, CLOCK_FORMAT_KEY))
        .map_err(platform_error)?;
    String::try_from(value).map_err(platform_error)
}

/// glibc's `T_FMT` for the locale the environment selects.
fn locale_time_format() -> Option<String> {
    unsafe {
        let locale = libc::newlocale(libc::LC_TIME_MASK, c"".as_ptr(), ptr::null_mut());
        if locale.is_null() {
            return None;
        }
        let format = libc::nl_langinfo_l(libc::T_FMT, locale);
        let format =
            (!format.is_null()).then(|| CStr::from_ptr(format).to_string_lossy().into_owned());
        libc::freelocale(locale);
        format
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn uses_24_hour_clock() -> Result<bool, DeviceError> {
    match desktop_clock_format() {
        Ok(value) => {
            if let Some(is_24) = clock::clock_format_is_24_hour(&value) {
                return Ok(is_24);
            }
            log::debug!("unexpected clock-format {value:?}");
        }
        Err(e) => log::debug!("desktop clock-format unavailable: {e}"),
    }

    let format = locale_time_format();
    log::debug!("locale time format: {format:?}");
    // The C locale's "%H:%M:%S" when no locale can be loaded.
    Ok(format.is_none_or(|format| clock::time_format_is_24_hour(&format)))
}

fn active_profile() -> Result<String, DeviceError> {
    let proxy = system_proxy(PROFILES_BUS, PROFILES_PATH, PROFILES_IFACE)?;
    proxy.get_property("ActiveProfile").map_err(platform_error)
}

pub fn low_power_supported() -> bool {
    match active_profile() {
        Ok(_) => true,
        Err(e) => {
            log::debug!("power-profiles-daemon unavailable: {e}");
            false
        }
    }
}

pub fn low_power_mode() -> Result<bool, DeviceError> {
    Ok(active_profile()? == POWER_SAVER)
}

/// The profile to switch to, or `None` when low power mode is already as asked.
///
/// Only `power-saver` counts as low power; leaving it restores `balanced`, and
/// other profiles such as `performance` are left alone when disabling.
fn next_profile(current: &str, enabled: bool) -> Option<&'static str> {
    match (current == POWER_SAVER, enabled) {
        (false, true) => Some(POWER_SAVER),
        (true, false) => Some(BALANCED),
        _ => None,
    }
}

pub fn set_low_power_mode(enabled: bool) -> Result<(), DeviceError> {
    let proxy = system_proxy(PROFILES_BUS, PROFILES_PATH, PROFILES_IFACE)?;
    let current: String = proxy.get_property("ActiveProfile").map_err(platform_error)?;
    let Some(profile) = next_profile(&current, enabled) else {
        log::debug!("profile {current} already matches low power mode {enabled}");
        return Ok(());
    };
    log::debug!("switching power profile {current} -> {profile}");
    proxy
        .set_property("ActiveProfile", profile)
        .map_err(platform_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upower_states() {
        assert_eq!(upower_state(1), BatteryState::Charging);
        assert_eq!(upower_state(2), BatteryState::Unplugged);
        assert_eq!(upower_state(4), BatteryState::Full);
        assert_eq!(upower_state(0), BatteryState::Unknown);
    }

    #[test]
    fn low_power_only_touches_power_saver() {
        assert_eq!(next_profile("balanced", true), Some(POWER_SAVER));
        assert_eq!(next_profile("performance", true), Some(POWER_SAVER));
        assert_eq!(next_profile("power-saver", false), Some(BALANCED));
        assert_eq!(next_profile("power-saver", true), None);
        assert_eq!(next_profile("balanced", false), None);
        assert_eq!(next_profile("performance", false), None);
    }

    #[test]
    fn dmi_takes_precedence() {
        let dmi = tempfile::tempdir().unwrap();
        let tree = tempfile::tempdir().unwrap();
        fs::write(dmi.path().join("chassis_type"), "10\n").unwrap();
        fs::write(dmi.path().join("product_name"), "20XW0055US\n").unwrap();
        fs::write(tree.path().join("model"), b"PINE64 PinePhone\0").unwrap();

        assert_eq!(device_type_from(dmi.path(), tree.path()), Some("Laptop"));
        assert_eq!(
            device_model_from(dmi.path(), tree.path()).as_deref(),
            Some("20XW0055US")
        );
    }

    #[test]
    fn device_tree_fallback() {
        let dmi = tempfile::tempdir().unwrap();
        let tree = tempfile::tempdir().unwrap();
        fs::write(tree.path().join("chassis-type"), b"handset\0").unwrap();
        fs::write(tree.path().join("model"), b"PINE64 PinePhone\0").unwrap();

        assert_eq!(device_type_from(dmi.path(), tree.path()), Some("Phone"));
        assert_eq!(
            device_model_from(dmi.path(), tree.path()).as_deref(),
            Some("PINE64 PinePhone")
        );
    }

    #[test]
    fn nothing_to_read() {
        let empty = tempfile::tempdir().unwrap();
        assert_eq!(device_type_from(empty.path(), empty.path()), None);
        assert_eq!(device_model_from(empty.path(), empty.path()), None);
    }
}
