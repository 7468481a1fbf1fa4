//! Free disk space and its unit conversions.

use std::path::Path;

use crate::DeviceError;

/// Unit for [`free_disk_space`](crate::free_disk_space). Scaling is 1024-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiskUnit {
    /// Raw bytes (format code `0`).
    #[default]
    Bytes,
    /// Kilobytes (format code `1`).
    Kilobytes,
    /// Megabytes (format code `2`).
    Megabytes,
    /// Gigabytes (format code `3`).
    Gigabytes,
}

impl DiskUnit {
    /// Every unit, smallest first.
    pub const ALL: [Self; 4] = [Self::Bytes, Self::Kilobytes, Self::Megabytes, Self::Gigabytes];

    /// The integer format code for this unit.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Bytes => 0,
            Self::Kilobytes => 1,
            Self::Megabytes => 2,
            Self::Gigabytes => 3,
        }
    }

    /// Number of bytes in one of this unit.
    #[must_use]
    pub const fn divisor(self) -> u64 {
        1 << (10 * self.code())
    }

    /// Convert a byte count into this unit.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scale(self, bytes: u64) -> f64 {
        bytes as f64 / self.divisor() as f64
    }

    /// Short suffix used when printing.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::Kilobytes => "KB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
        }
    }
}

impl TryFrom<i32> for DiskUnit {
    type Error = DeviceError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Bytes),
            1 => Ok(Self::Kilobytes),
            2 => Ok(Self::Megabytes),
            3 => Ok(Self::Gigabytes),
            other => Err(DeviceError::InvalidFormat(other)),
        }
    }
}

/// Available bytes on the volume that holds `target`.
///
/// Picks the mount point that is the longest path prefix of `target`.
pub(crate) fn free_space_on<'a, I>(volumes: I, target: &Path) -> Option<u64>
where
    I: IntoIterator<Item = (&'a Path, u64)>,
{
    volumes
        .into_iter()
        .filter(|(mount, _)| target.starts_with(mount))
        .max_by_key(|(mount, _)| mount.components().count())
        .map(|(_, available)| available)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: u64 = 5 * 1024 * 1024 * 1024 + 512 * 1024 * 1024;

    #[test]
    fn scaling_across_units() {
        assert!((DiskUnit::Bytes.scale(FIXTURE) - 5_905_580_032.0).abs() < f64::EPSILON);
        assert!((DiskUnit::Kilobytes.scale(FIXTURE) - 5_767_168.0).abs() < f64::EPSILON);
        assert!((DiskUnit::Megabytes.scale(FIXTURE) - 5632.0).abs() < f64::EPSILON);
        assert!((DiskUnit::Gigabytes.scale(FIXTURE) - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn format_codes() {
        for unit in DiskUnit::ALL {
            assert_eq!(DiskUnit::try_from(unit.code()), Ok(unit));
        }
        assert_eq!(DiskUnit::try_from(4), Err(DeviceError::InvalidFormat(4)));
        assert_eq!(DiskUnit::try_from(-1), Err(DeviceError::InvalidFormat(-1)));
    }

    #[test]
    fn longest_mount_prefix_wins() {
        let volumes = [
            (Path::new("/"), 10),
            (Path::new("/private/var"), 30),
            (Path::new("/private"), 20),
            (Path::new("/private/variable"), 40),
        ];
        assert_eq!(free_space_on(volumes, Path::new("/private/var")), Some(30));
        assert_eq!(free_space_on(volumes, Path::new("/home/mobile")), Some(10));
        assert_eq!(free_space_on([], Path::new("/")), None);
    }
}
