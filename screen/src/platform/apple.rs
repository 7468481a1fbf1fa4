use std::ffi::CStr;

use objc2::encode::{Encode, Encoding};
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{msg_send, sel};

use crate::{DisplaySize, ScreenError};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
struct CGPoint {
    x: f64,
    y: f64,
}

unsafe impl Encode for CGPoint {
    const ENCODING: Encoding = Encoding::Struct("CGPoint", &[f64::ENCODING, f64::ENCODING]);
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
struct CGSize {
    width: f64,
    height: f64,
}

unsafe impl Encode for CGSize {
    const ENCODING: Encoding = Encoding::Struct("CGSize", &[f64::ENCODING, f64::ENCODING]);
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
struct CGRect {
    origin: CGPoint,
    size: CGSize,
}

unsafe impl Encode for CGRect {
    const ENCODING: Encoding = Encoding::Struct("CGRect", &[CGPoint::ENCODING, CGSize::ENCODING]);
}

fn class(name: &CStr) -> Option<&'static AnyClass> {
    AnyClass::get(name)
}

fn required_class(name: &CStr) -> Result<&'static AnyClass, ScreenError> {
    class(name).ok_or_else(|| {
        ScreenError::Platform(format!("class {} is not loaded", name.to_string_lossy()))
    })
}

fn shared(cls: &AnyClass, what: &str) -> Result<Retained<AnyObject>, ScreenError> {
    let object: Option<Retained<AnyObject>> = unsafe { msg_send![cls, sharedInstance] };
    object.ok_or_else(|| ScreenError::Platform(format!("{what} returned nil")))
}

fn main_screen() -> Result<Retained<AnyObject>, ScreenError> {
    let cls = required_class(c"UIScreen")?;
    let screen: Option<Retained<AnyObject>> = unsafe { msg_send![cls, mainScreen] };
    screen.ok_or_else(|| ScreenError::Platform("UIScreen.mainScreen returned nil".into()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn display_size() -> Result<DisplaySize, ScreenError> {
    let screen = main_screen()?;
    let bounds: CGRect = unsafe { msg_send![&*screen, bounds] };
    Ok(DisplaySize {
        width: bounds.size.width.round() as u32,
        height: bounds.size.height.round() as u32,
    })
}

#[allow(clippy::cast_possible_truncation)]
pub fn brightness() -> Result<f32, ScreenError> {
    let screen = main_screen()?;
    let level: f64 = unsafe { msg_send![&*screen, brightness] };
    Ok(level as f32)
}

pub fn set_brightness(level: f32) -> Result<(), ScreenError> {
    // SpringBoard's controller keeps the Control Center slider and the
    // stored preference in sync; UIScreen only changes the panel.
    if let Some(cls) = class(c"SBBrightnessController") {
        let controller: Option<Retained<AnyObject>> =
            unsafe { msg_send![cls, sharedBrightnessController] };
        if let Some(controller) = controller {
            let _: () = unsafe { msg_send![&*controller, setBrightnessLevel: level] };
            return Ok(());
        }
    }

    let screen = main_screen()?;
    let _: () = unsafe { msg_send![&*screen, setBrightness: f64::from(level)] };
    Ok(())
}

pub fn take_screenshot() -> Result<(), ScreenError> {
    // iOS 9.3 and later route screenshots through SpringBoard's manager.
    let app_class = required_class(c"UIApplication")?;
    let app: Option<Retained<AnyObject>> = unsafe { msg_send![app_class, sharedApplication] };
    if let Some(app) = app {
        let has_manager: bool =
            unsafe { msg_send![&*app, respondsToSelector: sel!(screenshotManager)] };
        if has_manager {
            let manager: Option<Retained<AnyObject>> =
                unsafe { msg_send![&*app, screenshotManager] };
            if let Some(manager) = manager {
                log::debug!("saving screenshot via SBScreenshotManager");
                let _: () = unsafe { msg_send![&*manager, saveScreenshots] };
                return Ok(());
            }
        }
    }

    let shotter = shared(required_class(c"SBScreenShotter")?, "SBScreenShotter.sharedInstance")?;
    log::debug!("saving screenshot via SBScreenShotter");
    let _: () = unsafe { msg_send![&*shotter, saveScreenshot: true] };
    Ok(())
}
