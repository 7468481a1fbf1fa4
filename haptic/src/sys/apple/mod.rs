//! iOS vibration through AudioToolbox.

use std::time::Duration;

use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};
use objc2_foundation::NSString;

use crate::HapticError;

/// `kSystemSoundID_Vibrate`.
const SYSTEM_SOUND_VIBRATE: u32 = 4095;

const SPRINGBOARD_DOMAIN: &str = "com.apple.springboard";
const SILENT_VIBRATE_KEY: &str = "silent-vibrate";

#[link(name = "AudioToolbox", kind = "framework")]
unsafe extern "C" {
    fn AudioServicesPlayAlertSound(sound: u32);
    fn AudioServicesPlaySystemSoundWithVibration(
        sound: u32,
        ignored: *mut AnyObject,
        pattern: *mut AnyObject,
    );
}

fn class(name: &std::ffi::CStr) -> Result<&'static AnyClass, HapticError> {
    AnyClass::get(name).ok_or_else(|| {
        HapticError::Unknown(format!("class {} is not loaded", name.to_string_lossy()))
    })
}

pub fn vibrate_on_silent() -> Result<bool, HapticError> {
    let defaults_class = class(c"NSUserDefaults")?;
    let domain = NSString::from_str(SPRINGBOARD_DOMAIN);
    let key = NSString::from_str(SILENT_VIBRATE_KEY);

    let value: Option<Retained<AnyObject>> = unsafe {
        let defaults: Option<Retained<AnyObject>> =
            msg_send![defaults_class, standardUserDefaults];
        let Some(defaults) = defaults else {
            return Ok(true);
        };
        let prefs: Option<Retained<AnyObject>> =
            msg_send![&*defaults, persistentDomainForName: &*domain];
        let Some(prefs) = prefs else {
            return Ok(true);
        };
        msg_send![&*prefs, objectForKey: &*key]
    };

    // The key is absent until the user first flips the switch; it defaults on.
    Ok(value.is_none_or(|value| unsafe { msg_send![&*value, boolValue] }))
}

fn can_vibrate() -> bool {
    let Ok(cls) = class(c"UIDevice") else {
        return false;
    };
    let model: Option<Retained<NSString>> = unsafe {
        let device: Option<Retained<AnyObject>> = msg_send![cls, currentDevice];
        match device {
            Some(device) => msg_send![&*device, model],
            None => None,
        }
    };
    model.is_some_and(|model| model.to_string().contains("iPhone"))
}

fn vibe_pattern(duration: Duration) -> Result<Retained<AnyObject>, HapticError> {
    let number = class(c"NSNumber")?;
    let array_class = class(c"NSMutableArray")?;
    let dictionary_class = class(c"NSMutableDictionary")?;
    let pattern_key = NSString::from_str("VibePattern");
    let intensity_key = NSString::from_str("Intensity");

    #[allow(clippy::cast_precision_loss)]
    let millis = duration.as_millis() as f64;

    unsafe {
        let on: Retained<AnyObject> = msg_send![number, numberWithBool: true];
        let length: Retained<AnyObject> = msg_send![number, numberWithDouble: millis];
        let intensity: Retained<AnyObject> = msg_send![number, numberWithDouble: 1.0f64];

        // [on, millis]: vibrate for millis milliseconds.
        let steps: Retained<AnyObject> = msg_send![array_class, array];
        let _: () = msg_send![&*steps, addObject: &*on];
        let _: () = msg_send![&*steps, addObject: &*length];

        let pattern: Retained<AnyObject> = msg_send![dictionary_class, dictionary];
        let _: () = msg_send![&*pattern, setObject: &*steps, forKey: &*pattern_key];
        let _: () = msg_send![&*pattern, setObject: &*intensity, forKey: &*intensity_key];
        Ok(pattern)
    }
}

pub fn pulse(duration: Duration) -> Result<(), HapticError> {
    if !can_vibrate() {
        log::debug!("no vibration motor, playing alert sound");
        unsafe { AudioServicesPlayAlertSound(SYSTEM_SOUND_VIBRATE) };
        return Ok(());
    }

    let pattern = vibe_pattern(duration)?;
    log::debug!("vibrating for {duration:?}");
    unsafe {
        AudioServicesPlaySystemSoundWithVibration(
            SYSTEM_SOUND_VIBRATE,
            std::ptr::null_mut(),
            Retained::as_ptr(&pattern).cast_mut(),
        );
    }
    Ok(())
}
