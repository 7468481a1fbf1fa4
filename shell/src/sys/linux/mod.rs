//! Linux shell actions over D-Bus.
//!
//! Locking and rebooting go through logind on the system bus. The switcher
//! is GNOME Shell's overview, applications are started by D-Bus activation,
//! and a respring restarts the desktop shell's systemd user unit.

use std::collections::HashMap;

use zbus::blocking::{Connection, Proxy};
use zbus::fdo;
use zbus::zvariant::{OwnedObjectPath, Value};

use crate::{BundleId, ShellError};

const LOGIND_BUS: &str = "org.freedesktop.login1";
const LOGIND_PATH: &str = "/org/freedesktop/login1";
const LOGIND_MANAGER_IFACE: &str = "org.freedesktop.login1.Manager";
const LOGIND_SESSION_PATH: &str = "/org/freedesktop/login1/session/auto";
const LOGIND_SESSION_IFACE: &str = "org.freedesktop.login1.Session";

const SYSTEMD_BUS: &str = "org.freedesktop.systemd1";
const SYSTEMD_PATH: &str = "/org/freedesktop/systemd1";
const SYSTEMD_MANAGER_IFACE: &str = "org.freedesktop.systemd1.Manager";

const GNOME_SHELL_BUS: &str = "org.gnome.Shell";
const GNOME_SHELL_PATH: &str = "/org/gnome/Shell";
const GNOME_SHELL_IFACE: &str = "org.gnome.Shell";

const APPLICATION_IFACE: &str = "org.freedesktop.Application";

/// Overrides the unit restarted by a respring.
const SHELL_UNIT_VAR: &str = "STATKIT_SHELL_UNIT";

fn platform_error(e: impl std::fmt::Display) -> ShellError {
    ShellError::Platform(e.to_string())
}

fn system_proxy(path: &'static str, iface: &'static str) -> Result<Proxy<'static>, ShellError> {
    let conn = Connection::system().map_err(platform_error)?;
    Proxy::new(&conn, LOGIND_BUS, path, iface).map_err(platform_error)
}

pub fn lock_device() -> Result<(), ShellError> {
    let session = system_proxy(LOGIND_SESSION_PATH, LOGIND_SESSION_IFACE)?;
    let (): () = session.call("Lock", &()).map_err(platform_error)?;
    Ok(())
}

/// A call failed because nothing owns the destination name.
fn no_such_service(e: &fdo::Error) -> bool {
    match e {
        fdo::Error::ServiceUnknown(_) | fdo::Error::NameHasNoOwner(_) => true,
        fdo::Error::ZBus(zbus::Error::MethodError(name, ..)) => matches!(
            name.as_str(),
            "org.freedesktop.DBus.Error.ServiceUnknown"
                | "org.freedesktop.DBus.Error.NameHasNoOwner"
        ),
        _ => false,
    }
}

fn switcher_error(e: fdo::Error) -> ShellError {
    if no_such_service(&e) {
        log::debug!("GNOME Shell unavailable: {e}");
        ShellError::NotSupported
    } else {
        platform_error(e)
    }
}

pub fn open_switcher() -> Result<(), ShellError> {
    let conn = Connection::session().map_err(platform_error)?;
    let shell = Proxy::new(&conn, GNOME_SHELL_BUS, GNOME_SHELL_PATH, GNOME_SHELL_IFACE)
        .map_err(platform_error)?;
    shell
        .set_property("OverviewActive", true)
        .map_err(switcher_error)
}

/// The bus name an application is activated by.
fn bus_name(id: &BundleId) -> Result<&str, ShellError> {
    if id.is_bus_name() {
        Ok(id.as_str())
    } else {
        Err(ShellError::InvalidBundleId(id.to_string()))
    }
}

pub fn open_application(id: &BundleId) -> Result<(), ShellError> {
    let name = bus_name(id)?;
    let conn = Connection::session().map_err(platform_error)?;
    let path = id.object_path();
    let app = Proxy::new(&conn, name, path.as_str(), APPLICATION_IFACE)
        .map_err(platform_error)?;
    let platform_data: HashMap<&str, Value<'_>> = HashMap::new();
    // The bus starts the application if it is not running yet.
    let (): () = app
        .call("Activate", &(platform_data,))
        .map_err(platform_error)?;
    Ok(())
}

pub const fn open_assistant() -> Result<(), ShellError> {
    Err(ShellError::NotSupported)
}

/// The systemd user unit running the desktop shell.
fn shell_unit(
    explicit: Option<&str>,
    desktop: Option<&str>,
    session_type: Option<&str>,
) -> Option<String> {
    if let Some(unit) = explicit.filter(|unit| !unit.is_empty()) {
        return Some(unit.to_owned());
    }

    let desktop = desktop?;
    // XDG_CURRENT_DESKTOP is a colon separated list, e.g. "ubuntu:GNOME".
    desktop.split(':').find_map(|name| match name {
        "KDE" => Some("plasma-plasmashell.service".to_owned()),
        "GNOME" => {
            let backend = match session_type {
                Some("x11") => "x11",
                _ => "wayland",
            };
            Some(format!("org.gnome.Shell@{backend}.service"))
        }
        _ => None,
    })
}

pub fn respring() -> Result<(), ShellError> {
    let var = |name: &str| std::env::var(name).ok();
    let unit = shell_unit(
        var(SHELL_UNIT_VAR).as_deref(),
        var("XDG_CURRENT_DESKTOP").as_deref(),
        var("XDG_SESSION_TYPE").as_deref(),
    )
    .ok_or(ShellError::NotSupported)?;

    let conn = Connection::session().map_err(platform_error)?;
    let systemd = Proxy::new(&conn, SYSTEMD_BUS, SYSTEMD_PATH, SYSTEMD_MANAGER_IFACE)
        .map_err(platform_error)?;
    let job: OwnedObjectPath = systemd
        .call("RestartUnit", &(unit.as_str(), "replace"))
        .map_err(platform_error)?;
    log::debug!("restarting {unit}: job {}", job.as_str());
    Ok(())
}

pub fn reboot() -> Result<(), ShellError> {
    let manager = system_proxy(LOGIND_PATH, LOGIND_MANAGER_IFACE)?;
    // No polkit prompt; fail if the caller lacks the right.
    let (): () = manager.call("Reboot", &(false,)).map_err(platform_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_gnome_shell_is_unsupported() {
        assert_eq!(
            switcher_error(fdo::Error::ServiceUnknown("org.gnome.Shell".into())),
            ShellError::NotSupported
        );
        assert_eq!(
            switcher_error(fdo::Error::NameHasNoOwner("org.gnome.Shell".into())),
            ShellError::NotSupported
        );
        assert!(matches!(
            switcher_error(fdo::Error::AccessDenied("no".into())),
            ShellError::Platform(_)
        ));
    }

    #[test]
    fn only_bus_names_are_activated() {
        let id = BundleId::parse("com.1password.app").unwrap();
        assert_eq!(
            bus_name(&id),
            Err(ShellError::InvalidBundleId("com.1password.app".into()))
        );
        let id = BundleId::parse("org.gnome.Nautilus").unwrap();
        assert_eq!(bus_name(&id), Ok("org.gnome.Nautilus"));
    }

    #[test]
    fn explicit_unit_wins() {
        assert_eq!(
            shell_unit(Some("my-shell.service"), Some("GNOME"), Some("wayland")).as_deref(),
            Some("my-shell.service")
        );
        assert_eq!(
            shell_unit(Some(""), Some("KDE"), None).as_deref(),
            Some("plasma-plasmashell.service")
        );
    }

    #[test]
    fn unit_from_desktop() {
        assert_eq!(
            shell_unit(None, Some("ubuntu:GNOME"), Some("wayland")).as_deref(),
            Some("org.gnome.Shell@wayland.service")
        );
        assert_eq!(
            shell_unit(None, Some("GNOME"), Some("x11")).as_deref(),
            Some("org.gnome.Shell@x11.service")
        );
        assert_eq!(shell_unit(None, Some("XFCE"), Some("x11")), None);
        assert_eq!(shell_unit(None, None, None), None);
    }
}
