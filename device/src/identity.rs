//! Device class and hardware model.

use std::fmt;

/// Broad class of device, derived from the raw device type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// A handset (iPhone, Linux phones).
    Phone,
    /// A tablet (iPad).
    Tablet,
    /// A media player (iPod touch).
    Pod,
    /// A desktop or server chassis.
    Desktop,
    /// A laptop or convertible.
    Laptop,
    /// Anything else.
    Unknown,
}

impl DeviceFamily {
    /// Classify a device type string such as `"iPhone"` or `"Laptop"`.
    #[must_use]
    pub fn classify(device_type: &str) -> Self {
        let lower = device_type.to_ascii_lowercase();
        if lower.contains("iphone") || lower.contains("phone") || lower.contains("handset") {
            Self::Phone
        } else if lower.contains("ipad") || lower.contains("tablet") {
            Self::Tablet
        } else if lower.contains("ipod") {
            Self::Pod
        } else if lower.contains("laptop")
            || lower.contains("notebook")
            || lower.contains("convertible")
        {
            Self::Laptop
        } else if lower.contains("desktop") || lower.contains("server") || lower.contains("tower")
        {
            Self::Desktop
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::Pod => "Pod",
            Self::Desktop => "Desktop",
            Self::Laptop => "Laptop",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Trim a firmware-provided string (DMI, device tree, sysctl).
///
/// These come NUL-terminated or newline-terminated; blank and placeholder
/// values are dropped.
#[must_use]
pub fn clean_firmware_string(raw: &[u8]) -> Option<String> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let text = String::from_utf8_lossy(&raw[..end]);
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("to be filled by o.e.m.") {
        None
    } else {
        Some(text.to_owned())
    }
}

/// Name for an SMBIOS chassis type code (`/sys/class/dmi/id/chassis_type`).
#[must_use]
pub const fn chassis_name(code: u32) -> &'static str {
    match code {
        3..=7 | 13 | 15 | 16 | 17 | 23 | 24 => "Desktop",
        8..=10 | 14 | 31 | 32 => "Laptop",
        30 => "Tablet",
        _ => "Unknown",
    }
}

/// Name for a device-tree `chassis-type` string.
#[must_use]
pub fn devicetree_chassis_name(value: &str) -> &'static str {
    match value {
        "handset" => "Phone",
        "tablet" => "Tablet",
        "laptop" | "convertible" => "Laptop",
        "desktop" | "server" => "Desktop",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_apple_types() {
        assert_eq!(DeviceFamily::classify("iPhone"), DeviceFamily::Phone);
        assert_eq!(DeviceFamily::classify("iPad"), DeviceFamily::Tablet);
        assert_eq!(DeviceFamily::classify("iPod touch"), DeviceFamily::Pod);
        assert_eq!(DeviceFamily::classify("Laptop"), DeviceFamily::Laptop);
        assert_eq!(DeviceFamily::classify("Toaster"), DeviceFamily::Unknown);
    }

    #[test]
    fn firmware_strings() {
        assert_eq!(
            clean_firmware_string(b"PINE64 PinePhone\0"),
            Some("PINE64 PinePhone".to_owned())
        );
        assert_eq!(
            clean_firmware_string(b"ThinkPad X1 Carbon\n"),
            Some("ThinkPad X1 Carbon".to_owned())
        );
        assert_eq!(clean_firmware_string(b"To Be Filled By O.E.M.\n"), None);
        assert_eq!(clean_firmware_string(b"\n"), None);
    }

    #[test]
    fn chassis_codes() {
        assert_eq!(chassis_name(3), "Desktop");
        assert_eq!(chassis_name(10), "Laptop");
        assert_eq!(chassis_name(30), "Tablet");
        assert_eq!(chassis_name(2), "Unknown");
        assert_eq!(devicetree_chassis_name("handset"), "Phone");
    }
}
