use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::{DisplaySize, ScreenError};

const DRM_DIR: &str = "/sys/class/drm";
const BACKLIGHT_DIR: &str = "/sys/class/backlight";

const LOGIND_BUS: &str = "org.freedesktop.login1";
const LOGIND_SESSION_PATH: &str = "/org/freedesktop/login1/session/auto";
const LOGIND_SESSION_IFACE: &str = "org.freedesktop.login1.Session";

const PORTAL_BUS: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const SCREENSHOT_IFACE: &str = "org.freedesktop.portal.Screenshot";
const REQUEST_IFACE: &str = "org.freedesktop.portal.Request";

fn platform_error(e: impl std::fmt::Display) -> ScreenError {
    ScreenError::Platform(e.to_string())
}

/// Parse one line of a DRM connector's `modes` file, e.g. `1920x1080`.
fn parse_mode(line: &str) -> Option<DisplaySize> {
    let (width, height) = line.trim().split_once('x')?;
    // Interlaced modes carry a trailing "i".
    let height = height.trim_end_matches(|c: char| !c.is_ascii_digit());
    Some(DisplaySize {
        width: width.parse().ok()?,
        height: height.parse().ok()?,
    })
}

fn is_internal_panel(connector: &str) -> bool {
    ["eDP", "LVDS", "DSI"]
        .iter()
        .any(|kind| connector.contains(kind))
}

/// List a sysfs class directory. A missing class means the kernel has no such
/// subsystem here.
fn read_class_dir(dir: &Path) -> Result<fs::ReadDir, ScreenError> {
    fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScreenError::Unsupported,
        _ => e.into(),
    })
}

fn display_size_in(drm: &Path) -> Result<Option<DisplaySize>, ScreenError> {
    let mut connectors: Vec<(String, PathBuf)> = read_class_dir(drm)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            (name.starts_with("card") && name.contains('-')).then(|| (name, entry.path()))
        })
        .collect();
    connectors.sort_by_cached_key(|(name, _)| (!is_internal_panel(name), name.clone()));

    for (name, path) in connectors {
        let status = fs::read_to_string(path.join("status")).unwrap_or_default();
        if status.trim() != "connected" {
            continue;
        }
        let modes = fs::read_to_string(path.join("modes")).unwrap_or_default();
        if let Some(size) = modes.lines().next().and_then(parse_mode) {
            log::debug!("display {name}: {}x{}", size.width, size.height);
            return Ok(Some(size));
        }
    }
    Ok(None)
}

pub fn display_size() -> Result<DisplaySize, ScreenError> {
    display_size_in(Path::new(DRM_DIR))?
        .ok_or_else(|| ScreenError::Platform("no connected display".into()))
}

#[derive(Debug, PartialEq, Eq)]
struct Backlight {
    name: String,
    current: u32,
    max: u32,
}

fn read_u32(path: &Path) -> Result<u32, ScreenError> {
    fs::read_to_string(path)?
        .trim()
        .parse()
        .map_err(|e| ScreenError::Platform(format!("{}: {e}", path.display())))
}

fn find_backlight(dir: &Path) -> Result<Backlight, ScreenError> {
    let mut names: Vec<String> = read_class_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    let name = names.into_iter().next().ok_or(ScreenError::Unsupported)?;

    let base = dir.join(&name);
    let max = read_u32(&base.join("max_brightness"))?;
    let current = read_u32(&base.join("brightness"))?;
    Ok(Backlight { name, current, max })
}

#[allow(clippy::cast_precision_loss)]
fn level_from_raw(raw: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (raw as f32 / max as f32).clamp(0.0, 1.0)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn raw_from_level(level: f32, max: u32) -> u32 {
    (level.clamp(0.0, 1.0) * max as f32).round() as u32
}

pub fn brightness() -> Result<f32, ScreenError> {
    let backlight = find_backlight(Path::new(BACKLIGHT_DIR))?;
    log::debug!(
        "backlight {}: {}/{}",
        backlight.name,
        backlight.current,
        backlight.max
    );
    Ok(level_from_raw(backlight.current, backlight.max))
}

pub fn set_brightness(level: f32) -> Result<(), ScreenError> {
    let backlight = find_backlight(Path::new(BACKLIGHT_DIR))?;
    let raw = raw_from_level(level, backlight.max);

    let conn = Connection::system().map_err(platform_error)?;
    let session = Proxy::new(&conn, LOGIND_BUS, LOGIND_SESSION_PATH, LOGIND_SESSION_IFACE)
        .map_err(platform_error)?;
    log::debug!("logind SetBrightness backlight {} {raw}", backlight.name);
    let (): () = session
        .call("SetBrightness", &("backlight", backlight.name.as_str(), raw))
        .map_err(platform_error)?;
    Ok(())
}

/// Object path the portal will use for a request, known before the call so
/// the response signal can be subscribed to without a race.
fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("{PORTAL_PATH}/request/{sender}/{token}")
}

pub fn take_screenshot() -> Result<(), ScreenError> {
    let conn = Connection::session().map_err(platform_error)?;
    let unique_name = conn
        .unique_name()
        .ok_or_else(|| ScreenError::Platform("session bus gave no unique name".into()))?
        .to_string();
    let token = format!("statkit_{}", std::process::id());

    let request_path = request_path(&unique_name, &token);
    let request = Proxy::new(&conn, PORTAL_BUS, request_path.as_str(), REQUEST_IFACE)
        .map_err(platform_error)?;
    let mut responses = request.receive_signal("Response").map_err(platform_error)?;

    let portal =
        Proxy::new(&conn, PORTAL_BUS, PORTAL_PATH, SCREENSHOT_IFACE).map_err(platform_error)?;
    let mut options: HashMap<&str, Value<'_>> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));
    options.insert("interactive", Value::from(false));
    let handle: OwnedObjectPath = portal
        .call("Screenshot", &("", options))
        .map_err(platform_error)?;
    log::debug!("screenshot request {}", handle.as_str());

    let response = responses
        .next()
        .ok_or_else(|| ScreenError::Platform("portal closed the screenshot request".into()))?;
    let (code, results): (u32, HashMap<String, OwnedValue>) =
        response.body().deserialize().map_err(platform_error)?;

    match code {
        0 => {
            log::info!("screenshot saved: {:?}", results.get("uri"));
            Ok(())
        }
        1 => Err(ScreenError::Platform("screenshot was cancelled".into())),
        other => Err(ScreenError::Platform(format!(
            "screenshot portal failed with response {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(drm: &Path, name: &str, status: &str, modes: &str) {
        let dir = drm.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("status"), status).unwrap();
        fs::write(dir.join("modes"), modes).unwrap();
    }

    #[test]
    fn parses_modes() {
        assert_eq!(
            parse_mode("1920x1080\n"),
            Some(DisplaySize {
                width: 1920,
                height: 1080
            })
        );
        assert_eq!(
            parse_mode("1920x1080i"),
            Some(DisplaySize {
                width: 1920,
                height: 1080
            })
        );
        assert_eq!(parse_mode("garbage"), None);
    }

    #[test]
    fn internal_panel_wins() {
        let drm = tempfile::tempdir().unwrap();
        connector(drm.path(), "card0-HDMI-A-1", "connected\n", "3840x2160\n");
        connector(drm.path(), "card0-eDP-1", "connected\n", "2256x1504\n1920x1200\n");
        connector(drm.path(), "card0-DP-1", "disconnected\n", "");

        assert_eq!(
            display_size_in(drm.path()).unwrap(),
            Some(DisplaySize {
                width: 2256,
                height: 1504
            })
        );
    }

    #[test]
    fn no_connected_display() {
        let drm = tempfile::tempdir().unwrap();
        connector(drm.path(), "card0-DP-1", "disconnected\n", "");
        fs::create_dir_all(drm.path().join("renderD128")).unwrap();
        assert_eq!(display_size_in(drm.path()).unwrap(), None);
    }

    #[test]
    fn missing_drm_class_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            display_size_in(&dir.path().join("drm")),
            Err(ScreenError::Unsupported)
        ));
    }

    #[test]
    fn backlight_from_sysfs() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("intel_backlight");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("max_brightness"), "96000\n").unwrap();
        fs::write(device.join("brightness"), "48000\n").unwrap();

        let backlight = find_backlight(dir.path()).unwrap();
        assert_eq!(backlight.name, "intel_backlight");
        assert!((level_from_raw(backlight.current, backlight.max) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_backlight_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_backlight(&dir.path().join("backlight")),
            Err(ScreenError::Unsupported)
        ));
        assert!(matches!(
            find_backlight(dir.path()),
            Err(ScreenError::Unsupported)
        ));
    }

    #[test]
    fn raw_levels() {
        assert_eq!(raw_from_level(0.5, 255), 128);
        assert_eq!(raw_from_level(1.0, 255), 255);
        assert_eq!(raw_from_level(0.0, 255), 0);
        assert!(level_from_raw(10, 0).abs() < f32::EPSILON);
        assert!((level_from_raw(300, 255) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn portal_request_path() {
        assert_eq!(
            request_path(":1.42", "statkit_7"),
            "/org/freedesktop/portal/desktop/request/1_42/statkit_7"
        );
    }
}
