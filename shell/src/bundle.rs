use std::fmt;
use std::str::FromStr;

use crate::ShellError;

const MAX_LEN: usize = 255;

/// A reverse-DNS application identifier such as `com.apple.mobilesafari`.
///
/// Elements are separated by dots; there are at least two, none empty, and
/// each is made of ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleId(String);

impl BundleId {
    /// Validate `id`.
    ///
    /// # Errors
    /// Returns [`ShellError::InvalidBundleId`] if `id` is not a valid identifier.
    pub fn parse(id: &str) -> Result<Self, ShellError> {
        let invalid = || ShellError::InvalidBundleId(id.to_owned());
        if id.is_empty() || id.len() > MAX_LEN {
            return Err(invalid());
        }

        let mut elements = 0;
        for element in id.split('.') {
            let valid = !element.is_empty()
                && element
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
            if !valid {
                return Err(invalid());
            }
            elements += 1;
        }
        if elements < 2 {
            return Err(invalid());
        }
        Ok(Self(id.to_owned()))
    }

    /// The identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is also a valid well-known D-Bus bus name.
    ///
    /// Bus names forbid elements that start with a digit, so identifiers such
    /// as `com.1password.app` cannot be activated over D-Bus.
    #[must_use]
    pub fn is_bus_name(&self) -> bool {
        self.0
            .split('.')
            .all(|element| !element.starts_with(|c: char| c.is_ascii_digit()))
    }

    /// Object path an application exports under the freedesktop
    /// `org.freedesktop.Application` convention.
    #[must_use]
    pub fn object_path(&self) -> String {
        let mut path = String::with_capacity(self.0.len() + 1);
        for element in self.0.split('.') {
            path.push('/');
            path.extend(element.chars().map(|c| if c == '-' { '_' } else { c }));
        }
        path
    }
}

impl FromStr for BundleId {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BundleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reverse_dns() {
        for id in [
            "com.apple.mobilesafari",
            "org.gnome.Nautilus",
            "org.example.my-app",
            "net.x_y.App2",
        ] {
            assert_eq!(BundleId::parse(id).unwrap().as_str(), id);
        }
    }

    #[test]
    fn rejects_malformed() {
        for id in ["", "safari", "com..apple", ".com.apple", "com.apple.", "com.app le", "com/apple"] {
            assert_eq!(
                BundleId::parse(id),
                Err(ShellError::InvalidBundleId(id.to_owned())),
                "{id:?}"
            );
        }
        assert!(BundleId::parse(&"a.".repeat(200)).is_err());
    }

    #[test]
    fn leading_digits_are_not_bus_names() {
        let id = BundleId::parse("com.1password.app").unwrap();
        assert!(!id.is_bus_name());
        assert!(BundleId::parse("org.gnome.Nautilus").unwrap().is_bus_name());
        assert!(BundleId::parse("org.example.app2").unwrap().is_bus_name());
    }

    #[test]
    fn object_paths() {
        let id: BundleId = "org.gnome.Nautilus".parse().unwrap();
        assert_eq!(id.object_path(), "/org/gnome/Nautilus");
        let id: BundleId = "org.example.my-app".parse().unwrap();
        assert_eq!(id.object_path(), "/org/example/my_app");
    }
}
