//! Linux haptic implementation via feedbackd.
//!
//! feedbackd drives the vibration motor on Linux phones (Librem 5,
//! PinePhone). Its `silent` profile is the vibrate-on-silent switch turned
//! off: in that profile no haptic feedback is played.

use std::collections::HashMap;
use std::time::Duration;

use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::Value;

use crate::HapticError;

const FEEDBACKD_BUS: &str = "org.sigxcpu.Feedback";
const FEEDBACKD_PATH: &str = "/org/sigxcpu/Feedback";
const FEEDBACKD_IFACE: &str = "org.sigxcpu.Feedback";

const APP_ID: &str = "org.statkit.Haptic";
/// An event whose feedback loops until ended.
const EVENT: &str = "phone-incoming-call";
/// Caps feedback at haptics so the ringtone never plays.
const MAX_PROFILE: &str = "quiet";
/// Loop until `EndFeedback`.
const UNTIL_ENDED: i32 = 0;

fn feedbackd() -> Result<Proxy<'static>, HapticError> {
    let unavailable = |e: zbus::Error| {
        log::debug!("feedbackd unavailable: {e}");
        HapticError::NotSupported
    };
    let conn = Connection::session().map_err(unavailable)?;
    Proxy::new(&conn, FEEDBACKD_BUS, FEEDBACKD_PATH, FEEDBACKD_IFACE).map_err(unavailable)
}

fn profile_allows_vibration(profile: &str) -> bool {
    profile != "silent"
}

pub fn vibrate_on_silent() -> Result<bool, HapticError> {
    let proxy = feedbackd()?;
    let profile: String = proxy.get_property("Profile").map_err(|e| {
        log::debug!("feedbackd profile unreadable: {e}");
        HapticError::NotSupported
    })?;
    Ok(profile_allows_vibration(&profile))
}

pub fn pulse(duration: Duration) -> Result<(), HapticError> {
    let proxy = feedbackd()?;

    let mut hints: HashMap<&str, Value<'_>> = HashMap::new();
    hints.insert("profile", Value::from(MAX_PROFILE));
    let id: u32 = proxy
        .call("TriggerFeedback", &(APP_ID, EVENT, hints, UNTIL_ENDED))
        .map_err(|e| HapticError::Unknown(e.to_string()))?;
    log::debug!("feedbackd event {id} started for {duration:?}");

    std::thread::sleep(duration);

    let (): () = proxy
        .call("EndFeedback", &(id,))
        .map_err(|e| HapticError::Unknown(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_profile_blocks_vibration() {
        assert!(profile_allows_vibration("full"));
        assert!(profile_allows_vibration("quiet"));
        assert!(!profile_allows_vibration("silent"));
    }
}
