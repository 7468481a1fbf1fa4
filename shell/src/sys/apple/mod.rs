//! SpringBoard actions.
//!
//! Every call here talks to private SpringBoard classes, so it only works
//! when loaded into the SpringBoard process. Newer selectors are probed with
//! `respondsToSelector:` before the older fallback is tried.

use std::ffi::{CStr, c_int};

use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject, Sel};
use objc2::{msg_send, sel};
use objc2_foundation::NSString;

use crate::{BundleId, ShellError};

/// `SBAssistantController` button source for the home button. The selector
/// takes a C `int`.
const SIRI_SOURCE_HOME_BUTTON: c_int = 1;

fn class(name: &CStr) -> Option<&'static AnyClass> {
    AnyClass::get(name)
}

fn responds(object: &AnyObject, selector: Sel) -> bool {
    unsafe { msg_send![object, respondsToSelector: selector] }
}

fn springboard() -> Result<Retained<AnyObject>, ShellError> {
    let cls = class(c"UIApplication")
        .ok_or_else(|| ShellError::Platform("UIKit is not loaded".into()))?;
    let app: Option<Retained<AnyObject>> = unsafe { msg_send![cls, sharedApplication] };
    app.ok_or_else(|| ShellError::Platform("not running inside SpringBoard".into()))
}

fn shared_instance(name: &CStr) -> Option<Retained<AnyObject>> {
    let cls = class(name)?;
    unsafe { msg_send![cls, sharedInstance] }
}

fn missing(what: &str) -> ShellError {
    ShellError::Platform(format!("{what} is unavailable in this SpringBoard"))
}

pub fn lock_device() -> Result<(), ShellError> {
    let app = springboard()?;
    if responds(&app, sel!(_simulateLockButtonPress)) {
        let _: () = unsafe { msg_send![&*app, _simulateLockButtonPress] };
        return Ok(());
    }

    let agent: Option<Retained<AnyObject>> = match class(c"SBUserAgent") {
        Some(cls) => unsafe { msg_send![cls, sharedUserAgent] },
        None => None,
    };
    let agent = agent.ok_or_else(|| missing("lock button"))?;
    log::debug!("locking via SBUserAgent");
    let _: () = unsafe { msg_send![&*agent, lockAndDimDevice] };
    Ok(())
}

pub fn open_switcher() -> Result<(), ShellError> {
    // iOS 10 moved the switcher out of SBUIController.
    for name in [c"SBMainSwitcherViewController", c"SBUIController"] {
        let Some(controller) = shared_instance(name) else {
            continue;
        };
        if responds(&controller, sel!(activateSwitcherNoninteractively)) {
            log::debug!("switcher via {}", name.to_string_lossy());
            let _: bool = unsafe { msg_send![&*controller, activateSwitcherNoninteractively] };
            return Ok(());
        }
    }
    Err(missing("app switcher"))
}

pub fn open_application(id: &BundleId) -> Result<(), ShellError> {
    let app = springboard()?;
    let identifier = NSString::from_str(id.as_str());
    let launched: bool = unsafe {
        msg_send![&*app, launchApplicationWithIdentifier: &*identifier, suspended: false]
    };
    if launched {
        Ok(())
    } else {
        Err(ShellError::Platform(format!("SpringBoard could not launch {id}")))
    }
}

pub fn open_assistant() -> Result<(), ShellError> {
    let assistant = shared_instance(c"SBAssistantController").ok_or_else(|| missing("Siri"))?;

    if responds(&assistant, sel!(handleSiriButtonUpEventFromSource:)) {
        let _: () = unsafe {
            msg_send![&*assistant, handleSiriButtonUpEventFromSource: SIRI_SOURCE_HOME_BUTTON]
        };
    } else if responds(&assistant, sel!(_activateSiriForPPT)) {
        let _: () = unsafe { msg_send![&*assistant, _activateSiriForPPT] };
    } else {
        return Err(missing("Siri activation"));
    }
    Ok(())
}

pub fn respring() -> Result<(), ShellError> {
    let app = springboard()?;
    if responds(&app, sel!(_relaunchSpringBoardNow)) {
        let _: () = unsafe { msg_send![&*app, _relaunchSpringBoardNow] };
        return Ok(());
    }

    let service = shared_instance(c"FBSystemService").ok_or_else(|| missing("respring"))?;
    log::debug!("respring via FBSystemService");
    let _: () = unsafe { msg_send![&*service, exitAndRelaunch: true] };
    Ok(())
}

pub fn reboot() -> Result<(), ShellError> {
    let service = shared_instance(c"FBSystemService").ok_or_else(|| missing("reboot"))?;
    let _: () = unsafe { msg_send![&*service, shutdownAndReboot: true] };
    Ok(())
}

#[cfg(test)]
mod tests {
    use objc2::encode::{Encode, Encoding};

    use super::*;

    #[test]
    fn siri_source_is_a_c_int() {
        assert_eq!(<c_int as Encode>::ENCODING, Encoding::Int);
    }
}
