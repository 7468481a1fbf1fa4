//! Battery level and charging state.

use serde::{Deserialize, Serialize};

/// Charging state of the battery.
///
/// The discriminants are the stable integer codes handed to widgets that
/// want to supply their own strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryState {
    /// The state could not be determined.
    #[default]
    Unknown = 0,
    /// Running on battery power.
    Unplugged = 1,
    /// Plugged in and charging.
    Charging = 2,
    /// Plugged in and fully charged.
    Full = 3,
}

impl BatteryState {
    /// The integer code for this state.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Map an integer code back to a state. Unknown codes map to [`BatteryState::Unknown`].
    ///
    /// The codes line up with `UIDeviceBatteryState`.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Unplugged,
            2 => Self::Charging,
            3 => Self::Full,
            _ => Self::Unknown,
        }
    }
}

/// A raw battery sample as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryReading {
    /// Charge as a fraction in `0.0..=1.0`, or `None` when no battery is present
    /// or the level is unknown.
    pub level: Option<f32>,
    /// Charging state.
    pub state: BatteryState,
}

impl BatteryReading {
    /// Charge in whole percent, the same value the status bar shows.
    ///
    /// Always within `0..=100`; an unknown level reports `0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        match self.level {
            Some(level) if level.is_finite() => (level * 100.0).round().clamp(0.0, 100.0) as u8,
            _ => 0,
        }
    }

    /// Level from a whole-percent reading such as the status bar's.
    ///
    /// Negative values mean the level is unknown.
    #[cfg(any(target_os = "ios", test))]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn level_from_percent(percent: i64) -> Option<f32> {
        (percent >= 0).then(|| percent.min(100) as f32 / 100.0)
    }
}

/// User-facing strings for each [`BatteryState`].
///
/// Defaults to English. Load a translated table with `serde` to localise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryLabels {
    /// Label for [`BatteryState::Unknown`].
    pub unknown: String,
    /// Label for [`BatteryState::Unplugged`].
    pub unplugged: String,
    /// Label for [`BatteryState::Charging`].
    pub charging: String,
    /// Label for [`BatteryState::Full`].
    pub full: String,
}

impl Default for BatteryLabels {
    fn default() -> Self {
        Self {
            unknown: "Unknown".into(),
            unplugged: "Unplugged".into(),
            charging: "Charging".into(),
            full: "Fully Charged".into(),
        }
    }
}

impl BatteryLabels {
    /// The label for `state`.
    #[must_use]
    pub fn label(&self, state: BatteryState) -> &str {
        match state {
            BatteryState::Unknown => &self.unknown,
            BatteryState::Unplugged => &self.unplugged,
            BatteryState::Charging => &self.charging,
            BatteryState::Full => &self.full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        let reading = |level| BatteryReading {
            level,
            state: BatteryState::Unplugged,
        };
        assert_eq!(reading(Some(0.456)).percent(), 46);
        assert_eq!(reading(Some(1.0)).percent(), 100);
        assert_eq!(reading(Some(1.7)).percent(), 100);
        assert_eq!(reading(Some(-1.0)).percent(), 0);
        assert_eq!(reading(Some(f32::NAN)).percent(), 0);
        assert_eq!(reading(None).percent(), 0);
    }

    #[test]
    fn status_bar_percent_is_kept_exactly() {
        for percent in 0..=100u8 {
            let reading = BatteryReading {
                level: BatteryReading::level_from_percent(i64::from(percent)),
                state: BatteryState::Unplugged,
            };
            assert_eq!(reading.percent(), percent);
        }
        assert_eq!(BatteryReading::level_from_percent(-1), None);
        assert_eq!(BatteryReading::level_from_percent(140), Some(1.0));
    }

    #[test]
    fn codes_are_stable() {
        for state in [
            BatteryState::Unknown,
            BatteryState::Unplugged,
            BatteryState::Charging,
            BatteryState::Full,
        ] {
            assert_eq!(BatteryState::from_code(i64::from(state.code())), state);
        }
        assert_eq!(BatteryState::Full.code(), 3);
        assert_eq!(BatteryState::from_code(42), BatteryState::Unknown);
    }

    #[test]
    fn partial_label_table_keeps_defaults() {
        let labels: BatteryLabels =
            serde_json::from_str(r#"{ "charging": "En charge" }"#).unwrap();
        assert_eq!(labels.label(BatteryState::Charging), "En charge");
        assert_eq!(labels.label(BatteryState::Full), "Fully Charged");
    }
}
