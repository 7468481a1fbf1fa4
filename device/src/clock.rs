//! 12/24-hour clock preference.

/// Whether a localized hour pattern (the expansion of the `j` skeleton) is 24-hour.
///
/// A pattern is 12-hour when it carries a day-period field (`a`, `b`, `B`) or a
/// 12-hour hour field (`h`, `K`). Quoted literals are ignored.
#[must_use]
pub fn pattern_is_24_hour(pattern: &str) -> bool {
    let mut quoted = false;
    for ch in pattern.chars() {
        match ch {
            '\'' => quoted = !quoted,
            'a' | 'b' | 'B' | 'h' | 'K' if !quoted => return false,
            _ => {}
        }
    }
    true
}

/// Whether a `strftime` time format such as glibc's `T_FMT` is 24-hour.
///
/// A format is 12-hour when it uses `%I`, `%l`, `%r`, `%p` or `%P`. Escaped
/// `%%` and the `E`/`O` modifiers are understood.
#[must_use]
pub fn time_format_is_24_hour(format: &str) -> bool {
    let mut chars = format.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            continue;
        }
        let mut conversion = chars.next();
        // glibc flags and width, e.g. "%-I" or "%_2l".
        while let Some(c) = conversion {
            if matches!(c, '-' | '_' | '0' | '^' | '#' | 'E' | 'O') || c.is_ascii_digit() {
                conversion = chars.next();
            } else {
                break;
            }
        }
        if matches!(conversion, Some('I' | 'l' | 'r' | 'p' | 'P')) {
            return false;
        }
    }
    true
}

/// Interpret GNOME's `org.gnome.desktop.interface clock-format` value.
#[must_use]
pub fn clock_format_is_24_hour(value: &str) -> Option<bool> {
    match value {
        "24h" => Some(true),
        "12h" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns() {
        assert!(pattern_is_24_hour("HH"));
        assert!(pattern_is_24_hour("H 'h'"));
        assert!(!pattern_is_24_hour("h a"));
        assert!(!pattern_is_24_hour("a h"));
        assert!(!pattern_is_24_hour("K:mm"));
    }

    #[test]
    fn glibc_time_formats() {
        assert!(!time_format_is_24_hour("%r"));
        assert!(time_format_is_24_hour("%T"));
        assert!(time_format_is_24_hour("%H:%M:%S"));
        assert!(!time_format_is_24_hour("%H시 %M분 %S초 %p"));
        assert!(!time_format_is_24_hour("%p %I時%M分%S秒"));
        assert!(!time_format_is_24_hour("%l:%M %P"));
        assert!(!time_format_is_24_hour("%-I:%M"));
        assert!(time_format_is_24_hour("%%p %H"));
        assert!(time_format_is_24_hour(""));
    }

    #[test]
    fn gnome_clock_format() {
        assert_eq!(clock_format_is_24_hour("24h"), Some(true));
        assert_eq!(clock_format_is_24_hour("12h"), Some(false));
        assert_eq!(clock_format_is_24_hour(""), None);
    }
}
