//! iOS telemetry through UIKit and Foundation.
//!
//! Runs inside SpringBoard, so UIKit classes are already loaded. Private
//! classes are looked up by name and treated as optional.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::ptr;

use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{msg_send, sel};
use objc2_foundation::NSString;

use crate::identity::clean_firmware_string;
use crate::{BatteryReading, BatteryState, DeviceError, clock};

pub const DATA_VOLUME: &str = "/private/var";

unsafe extern "C" {
    fn sysctlbyname(
        name: *const c_char,
        oldp: *mut c_void,
        oldlenp: *mut usize,
        newp: *mut c_void,
        newlen: usize,
    ) -> c_int;
}

fn class(name: &CStr) -> Result<&'static AnyClass, DeviceError> {
    AnyClass::get(name).ok_or_else(|| {
        DeviceError::Platform(format!("class {} is not loaded", name.to_string_lossy()))
    })
}

fn non_nil<T>(object: Option<Retained<T>>, what: &str) -> Result<Retained<T>, DeviceError> {
    object.ok_or_else(|| DeviceError::Platform(format!("{what} returned nil")))
}

fn current_device() -> Result<Retained<AnyObject>, DeviceError> {
    let cls = class(c"UIDevice")?;
    let device: Option<Retained<AnyObject>> = unsafe { msg_send![cls, currentDevice] };
    non_nil(device, "UIDevice.currentDevice")
}

fn process_info() -> Result<Retained<AnyObject>, DeviceError> {
    let cls = class(c"NSProcessInfo")?;
    let info: Option<Retained<AnyObject>> = unsafe { msg_send![cls, processInfo] };
    non_nil(info, "NSProcessInfo.processInfo")
}

/// The whole percent the status bar shows, from SpringBoard.
///
/// `UIDevice.batteryLevel` is quantised to 5% steps, so it is only a fallback.
fn status_bar_percent() -> Option<i64> {
    let cls = AnyClass::get(c"SBUIController")?;
    let controller: Option<Retained<AnyObject>> = unsafe { msg_send![cls, sharedInstance] };
    let controller = controller?;
    let responds: bool = unsafe {
        msg_send![&*controller, respondsToSelector: sel!(batteryCapacityAsPercentage)]
    };
    if !responds {
        return None;
    }
    let percent: c_int = unsafe { msg_send![&*controller, batteryCapacityAsPercentage] };
    Some(i64::from(percent))
}

pub fn battery() -> Result<BatteryReading, DeviceError> {
    let device = current_device()?;
    let (level, state) = unsafe {
        let _: () = msg_send![&*device, setBatteryMonitoringEnabled: true];
        let level: f32 = msg_send![&*device, batteryLevel];
        let state: isize = msg_send![&*device, batteryState];
        (level, state)
    };
    log::debug!("UIDevice battery: level={level} state={state}");

    let level = match status_bar_percent() {
        Some(percent) => {
            log::debug!("status bar battery: {percent}%");
            BatteryReading::level_from_percent(percent)
        }
        // -1.0 while monitoring is off or the level is unknown.
        None => (level >= 0.0).then_some(level),
    };

    Ok(BatteryReading {
        level,
        state: BatteryState::from_code(i64::try_from(state).unwrap_or_default()),
    })
}

pub fn device_type() -> Result<String, DeviceError> {
    let device = current_device()?;
    let model: Option<Retained<NSString>> = unsafe { msg_send![&*device, model] };
    Ok(non_nil(model, "UIDevice.model")?.to_string())
}

pub fn device_model() -> Result<String, DeviceError> {
    let name = c"hw.machine";
    let mut len = 0usize;
    let rc = unsafe {
        sysctlbyname(name.as_ptr(), ptr::null_mut(), &raw mut len, ptr::null_mut(), 0)
    };
    if rc != 0 || len == 0 {
        return Err(DeviceError::Platform(format!(
            "sysctl hw.machine: {}",
            std::io::Error::last_os_error()
        )));
    }

    let mut buf = vec![0u8; len];
    let rc = unsafe {
        sysctlbyname(
            name.as_ptr(),
            buf.as_mut_ptr().cast(),
            &raw mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(DeviceError::Platform(format!(
            "sysctl hw.machine: {}",
            std::io::Error::last_os_error()
        )));
    }
    buf.truncate(len);

    clean_firmware_string(&buf)
        .ok_or_else(|| DeviceError::Platform("sysctl hw.machine is empty".into()))
}

pub fn uses_24_hour_clock() -> Result<bool, DeviceError> {
    let locale_class = class(c"NSLocale")?;
    let formatter_class = class(c"NSDateFormatter")?;
    let template = NSString::from_str("j");

    let locale: Option<Retained<AnyObject>> = unsafe { msg_send![locale_class, currentLocale] };
    let locale = non_nil(locale, "NSLocale.currentLocale")?;

    // "j" expands to the locale's preferred hour format, honouring the user's
    // 24-Hour Time switch.
    let pattern: Option<Retained<NSString>> = unsafe {
        msg_send![
            formatter_class,
            dateFormatFromTemplate: &*template,
            options: 0usize,
            locale: &*locale
        ]
    };
    let pattern = non_nil(pattern, "NSDateFormatter.dateFormatFromTemplate")?;

    Ok(clock::pattern_is_24_hour(&pattern.to_string()))
}

pub fn low_power_supported() -> bool {
    // isLowPowerModeEnabled arrived in iOS 9.
    process_info().is_ok_and(|info| unsafe {
        msg_send![&*info, respondsToSelector: sel!(isLowPowerModeEnabled)]
    })
}

pub fn low_power_mode() -> Result<bool, DeviceError> {
    let info = process_info()?;
    Ok(unsafe { msg_send![&*info, isLowPowerModeEnabled] })
}

pub fn set_low_power_mode(enabled: bool) -> Result<(), DeviceError> {
    let cls = class(c"_CDBatterySaver")?;
    let saver: Option<Retained<AnyObject>> = unsafe { msg_send![cls, batterySaver] };
    let saver = non_nil(saver, "_CDBatterySaver.batterySaver")?;

    let accepted: bool = unsafe {
        msg_send![
            &*saver,
            setPowerMode: i64::from(enabled),
            error: ptr::null_mut::<*mut AnyObject>()
        ]
    };
    if accepted {
        Ok(())
    } else {
        Err(DeviceError::Platform("CoreDuet rejected the power mode change".into()))
    }
}
